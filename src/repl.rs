use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use colored::Colorize;
use log::debug;
use crate::interpreter::ast::Stmt;
use crate::interpreter::environment::Environment;
use crate::interpreter::error::{ParseError, RuntimeError};
use crate::interpreter::object::Object;

pub const PROMPT: &str = ">> ";

const EXIT: &str = "exit";
const HELP: &str = "help";
const ENV: &str = "env";

/// Reads lines from `input` until `exit` or end of input, evaluating each one against a single
/// session environment. Results and diagnostics go to `output`.
pub fn start<R: BufRead, W: Write>(prompt: &str, input: R, mut output: W) -> io::Result<()> {
    let environment = crate::new_environment();
    let mut lines = input.lines();

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(output)?;
                return Ok(());
            },
        };

        match line.trim() {
            "" => continue,
            EXIT => {
                writeln!(output, "Exiting interpreter. Goodbye!")?;
                return Ok(());
            },
            HELP => write_help(&mut output)?,
            ENV => writeln!(output, "{}", environment.borrow().names().join(" "))?,
            source => execute(source, &environment, &mut output)?,
        }
    }
}

fn execute<W: Write>(source: &str, environment: &Rc<RefCell<Environment>>, output: &mut W) -> io::Result<()> {
    let (program, errors) = crate::parse(crate::lex(source));

    if !errors.is_empty() {
        debug!("Skipping evaluation, {} parse error(s)", errors.len());
        return write_parse_errors(output, &errors);
    }

    let result = crate::evaluate(&program, environment);

    match &*result {
        Object::Error(error) => write_runtime_error(output, error),
        // A line ending in a binding has nothing to show
        _ if matches!(program.statements.last(), Some(Stmt::Let { .. })) => Ok(()),
        _ => writeln!(output, "{}", result.inspect()),
    }
}

fn write_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Available commands:")?;
    writeln!(output, "  {}       - Show this help message", HELP.bold())?;
    writeln!(output, "  {}        - List the variables bound in this session", ENV.bold())?;
    writeln!(output, "  {}       - Exit the interpreter", EXIT.bold())
}

pub fn write_parse_errors<W: Write>(output: &mut W, errors: &[ParseError]) -> io::Result<()> {
    for error in errors {
        writeln!(output, "{}: {} {}", "parse error".red().bold(), error.to_string().bold(), error.pos().to_string().dimmed())?;
    }

    Ok(())
}

pub fn write_runtime_error<W: Write>(output: &mut W, error: &RuntimeError) -> io::Result<()> {
    writeln!(output, "{}: {}", "runtime error".red().bold(), error.to_string().bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> String {
        colored::control::set_override(false);

        let mut output = Vec::new();
        start(PROMPT, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn evaluates_lines_in_one_environment() {
        let output = session("manau a = 5;\nmanau b = a * 2;\na + b\n");
        assert_eq!(">> >> >> 15\n>> \n", output);
    }

    #[test]
    fn exit_stops_the_session() {
        let output = session("1\nexit\n2\n");
        assert_eq!(">> 1\n>> Exiting interpreter. Goodbye!\n", output);
    }

    #[test]
    fn empty_lines_are_ignored() {
        let output = session("\n   \n7\n");
        assert_eq!(">> >> >> 7\n>> \n", output);
    }

    #[test]
    fn help_lists_commands() {
        let output = session("help\n");

        assert!(output.contains("Available commands:"));
        assert!(output.contains("exit"));
        assert!(output.contains("env"));
    }

    #[test]
    fn env_lists_bindings() {
        let output = session("manau y = 1;\nmanau x = 2;\nenv\n");
        assert!(output.contains("x y\n"));
    }

    #[test]
    fn parse_errors_do_not_end_the_session() {
        let output = session("manau = 5;\n3\n");

        assert!(output.contains("parse error: expected next token to be IDENTIFIER, got = instead [line 1 column 7]"));
        assert!(output.ends_with(">> 3\n>> \n"));
    }

    #[test]
    fn runtime_errors_are_reported() {
        let output = session("5 + satya\nfoo\n");

        assert!(output.contains("runtime error: type mismatch: INTEGER + BOOLEAN\n"));
        assert!(output.contains("runtime error: identifier not found: foo\n"));
    }

    #[test]
    fn null_and_booleans_are_shown() {
        let output = session("yadi (jhuth) { 1 }\n1 < 2\n");
        assert_eq!(">> null\n>> true\n>> \n", output);
    }
}
