mod cli;
mod commands;

use std::process::ExitCode;

use cli::{SearchParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let params = SearchParams::from_matches(&matches);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(params.log_level()))
        .format_timestamp(None)
        .init();

    commands::search::run(params.into())
}
