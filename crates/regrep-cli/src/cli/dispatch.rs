//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::search::SearchArgs;

pub struct SearchParams {
    pub pattern: String,
    pub paths: Vec<PathBuf>,
    pub recursive: bool,
    pub color: ColorChoice,
    pub verbose: u8,
    pub fuel: Option<u32>,
    pub print_ast: bool,
}

impl SearchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: m.get_one::<String>("pattern").cloned().unwrap_or_default(),
            paths: m
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            recursive: m.get_flag("recursive"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
            fuel: m.get_one::<u32>("fuel").copied(),
            print_ast: m.get_flag("print_ast"),
        }
    }

    /// Default `env_logger` filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl From<SearchParams> for SearchArgs {
    fn from(p: SearchParams) -> Self {
        Self {
            pattern: p.pattern,
            paths: p.paths,
            recursive: p.recursive,
            fuel: p.fuel,
            print_ast: p.print_ast,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
