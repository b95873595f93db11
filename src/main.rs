use std::process::ExitCode;
use clap::Parser as ClapParser;
use log::{debug, error, LevelFilter};
use verbal_lang::Config;

fn main() -> ExitCode {
    let config: Config = Config::parse();

    env_logger::Builder::new()
        .filter_level(if config.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();

    match verbal_lang::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_reported() => {
            debug!("{}", err);
            ExitCode::FAILURE
        },
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        },
    }
}
