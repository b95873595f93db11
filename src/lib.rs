pub mod util;
pub mod interpreter;
pub mod repl;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use clap::Parser as ClapParser;
use log::info;
use thiserror::Error as ThisError;
use crate::interpreter::ast::Program;
use crate::interpreter::environment::Environment;
use crate::interpreter::error::{ParseError, RuntimeError};
use crate::interpreter::evaluator::Evaluator;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::object::Object;
use crate::interpreter::parser::Parser;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Script to run; starts a REPL if omitted")]
    pub input: Option<PathBuf>,
    #[clap(long, default_value = repl::PROMPT, help = "REPL prompt")]
    pub prompt: String,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("program rejected with {} parse error(s)", .0.len())]
    Parse(Vec<ParseError>),
    #[error("evaluation failed: {0}")]
    Runtime(RuntimeError),
}

impl Error {
    /// Parse and runtime failures are printed by [`run`] before it returns them.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::Runtime(_))
    }
}

pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

pub fn parse(lexer: Lexer<'_>) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    (program, parser.into_errors())
}

pub fn evaluate(program: &Program, environment: &Rc<RefCell<Environment>>) -> Arc<Object> {
    Evaluator::new(Rc::clone(environment)).evaluate_program(program)
}

pub fn new_environment() -> Rc<RefCell<Environment>> {
    Environment::new_global()
}

pub fn new_enclosed_environment(outer: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
    Environment::new_with_parent(outer)
}

/// Parses and evaluates a complete source text in a fresh environment.
pub fn run_source(source: &str) -> Result<Arc<Object>, Error> {
    let (program, errors) = parse(lex(source));

    if !errors.is_empty() {
        return Err(Error::Parse(errors));
    }

    let result = evaluate(&program, &new_environment());

    match &*result {
        Object::Error(error) => Err(Error::Runtime(error.clone())),
        _ => Ok(result),
    }
}

pub fn run(config: &Config) -> Result<(), Error> {
    let path = match &config.input {
        Some(path) => path,
        None => {
            info!("Starting REPL");
            let stdin = std::io::stdin();
            return Ok(repl::start(&config.prompt, stdin.lock(), std::io::stdout())?);
        },
    };

    info!("Running {}", path.display());
    let source = std::fs::read_to_string(path)?;
    let mut stderr = std::io::stderr();

    match run_source(&source) {
        Ok(result) => {
            println!("{}", result.inspect());
            Ok(())
        },
        Err(Error::Parse(errors)) => {
            repl::write_parse_errors(&mut stderr, &errors)?;
            Err(Error::Parse(errors))
        },
        Err(Error::Runtime(error)) => {
            repl::write_runtime_error(&mut stderr, &error)?;
            Err(Error::Runtime(error))
        },
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_source_reports_parse_errors() {
        match run_source("manau = 1;") {
            Err(Error::Parse(errors)) => assert_eq!(1, errors.len()),
            other => panic!("expected parse errors, got {:?}", other),
        }
    }

    #[test]
    fn run_source_reports_runtime_errors() {
        match run_source("1 / 0") {
            Err(Error::Runtime(error)) => assert_eq!(RuntimeError::DivisionByZero, error),
            other => panic!("expected a runtime error, got {:?}", other),
        }
    }

    #[test]
    fn only_io_errors_are_left_to_the_caller() {
        let parse_error = run_source("manau = 1;").unwrap_err();
        let runtime_error = run_source("satya + 1").unwrap_err();
        let io_error = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));

        assert!(parse_error.is_reported());
        assert!(runtime_error.is_reported());
        assert!(!io_error.is_reported());
    }

    #[test]
    fn run_source_returns_result() {
        assert_eq!(Object::Integer(3), *run_source("manau a = 1; a + 2").unwrap());
    }

    #[test]
    fn config_defaults() {
        let config = Config::parse_from(["verbal_lang"]);

        assert_eq!(None, config.input);
        assert_eq!(">> ", config.prompt);
        assert!(!config.verbose);
    }

    #[test]
    fn config_with_file() {
        let config = Config::parse_from(["verbal_lang", "-v", "--prompt", "$ ", "main.verbal"]);

        assert_eq!(Some(PathBuf::from("main.verbal")), config.input);
        assert_eq!("$ ", config.prompt);
        assert!(config.verbose);
    }
}
