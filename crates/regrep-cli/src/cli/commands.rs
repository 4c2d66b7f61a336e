//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("regrep")
        .about("Search lines with a backtracking regular expression")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("regrep [-r] -E <PATTERN> [PATH]...")
        .after_help(
            r#"EXAMPLES:
  regrep -E 'd\w+' notes.txt             # unanchored search
  regrep -E '^(\w+) \1$' a.txt b.txt     # backreference, prefixed output
  regrep -r -E 'TODO' src                # walk a directory tree
  cat log.txt | regrep -E 'error|warn'   # read stdin
  regrep -E '(a|b)+c' --print-ast        # show the parsed pattern"#,
        )
        .arg(pattern_arg())
        .arg(paths_arg())
        .arg(recursive_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(print_ast_arg())
}
