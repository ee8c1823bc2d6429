//! Command-line argument parsing for the rgrep binary.
//!
//! Builds the flag table of the external interface and resolves it into a
//! `Config` plus the list of input paths. `-e`/`-f` patterns accumulate
//! ahead of any positional pattern; when neither is given, the first
//! positional argument is the pattern and the rest are files.

use std::fs;

use clap::{Arg, ArgAction, Command};
use rgrep::{Config, Context};

/// Build the clap `Command` describing rgrep's CLI. Kept separate from
/// `parse()` so the flag table itself stays easy to read and to unit test.
pub fn build_cli() -> Command {
    Command::new("rgrep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A line-oriented text search tool with a self-contained regex engine")
        .arg(
            Arg::new("extended-regexp")
                .short('E')
                .long("extended-regexp")
                .action(ArgAction::SetTrue)
                .help("Accepted for compatibility; no behavioral effect"),
        )
        .arg(
            Arg::new("regexp")
                .short('e')
                .long("regexp")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Add PATTERN to the set of patterns (repeatable)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Read patterns from FILE, one per line; empty lines are ignored"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .short_alias('R')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Treat each FILE argument as a directory to descend"),
        )
        .arg(
            Arg::new("line-number")
                .short('n')
                .long("line-number")
                .action(ArgAction::SetTrue)
                .help("Prefix output with the 1-based line number"),
        )
        .arg(
            Arg::new("ignore-case")
                .short('i')
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Case-insensitive matching"),
        )
        .arg(
            Arg::new("invert-match")
                .short('v')
                .long("invert-match")
                .action(ArgAction::SetTrue)
                .help("Emit non-matching lines instead"),
        )
        .arg(
            Arg::new("count")
                .short('c')
                .long("count")
                .action(ArgAction::SetTrue)
                .help("Emit per-source match counts only"),
        )
        .arg(
            Arg::new("after-context")
                .short('A')
                .long("after-context")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize))
                .help("Print NUM lines of trailing context after a hit"),
        )
        .arg(
            Arg::new("before-context")
                .short('B')
                .long("before-context")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize))
                .help("Print NUM lines of leading context before a hit"),
        )
        .arg(
            Arg::new("context")
                .short('C')
                .long("context")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize))
                .help("Equivalent to -A NUM -B NUM"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .visible_alias("silent")
                .action(ArgAction::SetTrue)
                .help("Suppress all output; only the exit status is meaningful"),
        )
        .arg(
            Arg::new("max-count")
                .short('m')
                .long("max-count")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize))
                .help("Stop after NUM hits per source (0 = unlimited)"),
        )
        .arg(
            Arg::new("files-with-matches")
                .short('l')
                .long("files-with-matches")
                .action(ArgAction::SetTrue)
                .conflicts_with("files-without-match")
                .help("Emit only the names of sources containing a hit"),
        )
        .arg(
            Arg::new("files-without-match")
                .short('L')
                .long("files-without-match")
                .action(ArgAction::SetTrue)
                .help("Emit only the names of sources with no hit"),
        )
        .arg(
            Arg::new("pattern_or_file")
                .num_args(0..)
                .value_name("PATTERN / FILE")
                .help("Positional pattern (when -e/-f is absent) followed by input files; use - for stdin"),
        )
}

/// Read one `-f FILE` pattern file into its non-empty lines.
fn read_pattern_file(path: &str) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("rgrep: {}: {}", path, e.to_string().to_lowercase()))?;
    Ok(content
        .lines()
        .map(str::to_string)
        .filter(|l| !l.is_empty())
        .collect())
}

/// Parse CLI arguments into a `Config` and input file list. Clap itself
/// handles `--help`/`--version` (exit 0) and numeric-parse failures for
/// `-A`/`-B`/`-C`/`-m` (exit 2); everything else that reaches `Err` here
/// is likewise a fatal `ArgumentError` the caller should exit(2) on.
pub fn parse() -> Result<(Config, Vec<String>), String> {
    let matches = build_cli().get_matches();

    let mut cfg = Config::default();
    cfg.invert = matches.get_flag("invert-match");
    cfg.count = matches.get_flag("count");
    cfg.quiet = matches.get_flag("quiet");
    cfg.recursive = matches.get_flag("recursive");
    cfg.case_insensitive = matches.get_flag("ignore-case");
    cfg.line_number = matches.get_flag("line-number");
    cfg.files_with_matches = matches.get_flag("files-with-matches");
    cfg.files_without_match = matches.get_flag("files-without-match");

    if cfg.files_with_matches && cfg.files_without_match {
        return Err("rgrep: -l and -L are mutually exclusive".into());
    }

    let before = matches.get_one::<usize>("before-context").copied().unwrap_or(0);
    let after = matches.get_one::<usize>("after-context").copied().unwrap_or(0);
    cfg.context = match matches.get_one::<usize>("context").copied() {
        Some(n) => Context { before: n, after: n },
        None => Context { before, after },
    };

    cfg.max_count = matches.get_one::<usize>("max-count").copied().unwrap_or(0);

    let mut patterns: Vec<String> = Vec::new();
    if let Some(vals) = matches.get_many::<String>("regexp") {
        patterns.extend(vals.cloned());
    }
    if let Some(files) = matches.get_many::<String>("file") {
        for f in files {
            patterns.extend(read_pattern_file(f)?);
        }
    }

    let rest: Vec<String> = matches
        .get_many::<String>("pattern_or_file")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let inputs = if patterns.is_empty() {
        let mut rest = rest.into_iter();
        let first = rest
            .next()
            .ok_or_else(|| "rgrep: no pattern provided; use -e PATTERN or supply one positionally".to_string())?;
        patterns.push(first);
        rest.collect()
    } else {
        rest
    };

    cfg.patterns = patterns;
    Ok((cfg, inputs))
}
