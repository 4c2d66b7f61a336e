//! The search command: print every input line the pattern matches.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use regrep_lib::parser::NodePrinter;
use regrep_lib::{FuelLimits, Pattern};

const STDIN_NAME: &str = "(standard input)";

pub struct SearchArgs {
    pub pattern: String,
    pub paths: Vec<PathBuf>,
    pub recursive: bool,
    pub fuel: Option<u32>,
    pub print_ast: bool,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Pattern(#[from] regrep_lib::Error),

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Match {
        path: PathBuf,
        source: regrep_lib::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// What a finished search saw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub matched: bool,
    /// Inputs that could not be read or matched to the end.
    pub errors: usize,
}

impl Outcome {
    /// grep convention: 0 matched, 1 nothing matched, 2 something failed.
    pub fn exit_status(self) -> u8 {
        if self.errors > 0 {
            2
        } else if self.matched {
            0
        } else {
            1
        }
    }
}

pub fn run(args: SearchArgs) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match search(&args, stdin.lock(), stdout.lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(CliError::Pattern(err)) => {
            eprintln!("{}", err.render(args.color));
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

/// Runs a whole search. Only pattern and output failures abort; a bad
/// input is reported and counted in [`Outcome::errors`].
pub fn search(
    args: &SearchArgs,
    stdin: impl BufRead,
    mut out: impl Write,
) -> Result<Outcome, CliError> {
    let limits = match args.fuel {
        Some(fuel) => FuelLimits::new().exec_fuel(fuel),
        None => FuelLimits::new(),
    };
    let pattern = Pattern::compile(&args.pattern, limits)?;

    if args.print_ast {
        print_ast(&pattern, &mut out).map_err(CliError::Output)?;
        return Ok(Outcome {
            matched: true,
            errors: 0,
        });
    }

    let mut searcher = Searcher {
        pattern: &pattern,
        out,
        prefix: args.paths.len() > 1 || args.recursive,
        recursive: args.recursive,
        outcome: Outcome::default(),
    };

    if args.paths.is_empty() {
        log::info!("reading standard input");
        searcher.search_reader(Path::new(STDIN_NAME), stdin)?;
    } else {
        for path in &args.paths {
            searcher.search_path(path)?;
        }
    }

    searcher.out.flush().map_err(CliError::Output)?;
    Ok(searcher.outcome)
}

fn print_ast(pattern: &Pattern, out: &mut impl Write) -> io::Result<()> {
    let anchors = pattern.anchors();
    writeln!(out, "pattern: {}", pattern.source())?;
    writeln!(out, "anchors: start={} end={}", anchors.start, anchors.end)?;
    writeln!(out, "groups: {}", pattern.group_count())?;
    write!(out, "{}", NodePrinter::new(pattern.root()).dump())
}

struct Searcher<'p, W> {
    pattern: &'p Pattern,
    out: W,
    prefix: bool,
    recursive: bool,
    outcome: Outcome,
}

impl<W: Write> Searcher<'_, W> {
    fn search_path(&mut self, path: &Path) -> Result<(), CliError> {
        if path.is_dir() {
            if self.recursive {
                return self.search_dir(path);
            }
            log::warn!("{}: is a directory", path.display());
            return Ok(());
        }

        match File::open(path) {
            Ok(file) => {
                log::info!("searching {}", path.display());
                self.search_reader(path, BufReader::new(file))
            }
            Err(err) => {
                self.report(CliError::io(path, err));
                Ok(())
            }
        }
    }

    /// Visits entries in sorted order so output is deterministic.
    fn search_dir(&mut self, dir: &Path) -> Result<(), CliError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.report(CliError::io(dir, err));
                return Ok(());
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        paths.sort();

        log::debug!("{}: {} entries", dir.display(), paths.len());
        for path in paths {
            self.search_path(&path)?;
        }
        Ok(())
    }

    /// Matches line by line. Bytes that are not UTF-8 are replaced with
    /// U+FFFD before matching. A line that exhausts its fuel is reported
    /// and skipped. A read failure stops this input only.
    fn search_reader(&mut self, path: &Path, mut reader: impl BufRead) -> Result<(), CliError> {
        let mut hits = 0usize;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    self.report(CliError::io(path, err));
                    return Ok(());
                }
            }
            trim_line_ending(&mut buf);
            let line = String::from_utf8_lossy(&buf);

            let matched = match self.pattern.is_match(&line) {
                Ok(matched) => matched,
                Err(source) => {
                    self.report(CliError::Match {
                        path: path.to_owned(),
                        source,
                    });
                    continue;
                }
            };

            if matched {
                hits += 1;
                self.outcome.matched = true;
                self.print_line(path, &line).map_err(CliError::Output)?;
            }
        }

        log::debug!("{}: {} matching line(s)", path.display(), hits);
        Ok(())
    }

    fn print_line(&mut self, path: &Path, line: &str) -> io::Result<()> {
        if self.prefix {
            writeln!(self.out, "{}:{}", path.display(), line)
        } else {
            writeln!(self.out, "{}", line)
        }
    }

    fn report(&mut self, err: CliError) {
        eprintln!("error: {}", err);
        self.outcome.errors += 1;
    }
}

/// Drops a trailing `\n` or `\r\n`.
fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
