//! Shared argument builders.
//!
//! Each function returns a `clap::Arg` that `commands.rs` composes into the
//! command. Ids are the keys `dispatch.rs` reads back from `ArgMatches`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Pattern to search for (-E).
pub fn pattern_arg() -> Arg {
    Arg::new("pattern")
        .short('E')
        .value_name("PATTERN")
        .required(true)
        .allow_hyphen_values(true)
        .help("Pattern to search for")
}

/// Files or directories to search (positional, repeatable).
pub fn paths_arg() -> Arg {
    Arg::new("paths")
        .value_name("PATH")
        .num_args(0..)
        .value_parser(value_parser!(PathBuf))
        .help("Files or directories to search (reads stdin when omitted)")
}

/// Descend into directories (-r).
pub fn recursive_arg() -> Arg {
    Arg::new("recursive")
        .short('r')
        .long("recursive")
        .action(ArgAction::SetTrue)
        .help("Search directories recursively")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v info, -vv debug, -vvv trace)")
}

/// Matcher fuel (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Node visit budget per line")
}

/// Print the parsed pattern and exit (--print-ast).
pub fn print_ast_arg() -> Arg {
    Arg::new("print_ast")
        .long("print-ast")
        .action(ArgAction::SetTrue)
        .help("Print the parsed pattern and exit")
}
