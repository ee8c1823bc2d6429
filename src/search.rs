//! Line searcher: applies the compiled pattern set to each line of a
//! source and renders hits (and their surrounding context) through
//! [`crate::output`].

use std::collections::{HashSet, VecDeque};
use std::io::Read;

use crate::config::{Config, ExitStatus, RunResult};
use crate::error::Error;
use crate::fs_utils::{expand_inputs, is_binary_path};
use crate::io_utils::open_input;
use crate::matcher;
use crate::output;
use crate::pattern::{self, ParsedPattern};
use crate::source::LineIter;

/// Parses every raw pattern string in `cfg.patterns` up front. Patterns
/// that fail to parse are reported as diagnostics and dropped from the
/// active OR-set rather than aborting the run; `degraded` records that at
/// least one was malformed, which the caller uses to decide the exit code
/// when nothing else hits.
fn compile_patterns(cfg: &Config) -> (Vec<ParsedPattern>, Vec<String>, bool) {
    let mut compiled = Vec::new();
    let mut diagnostics = Vec::new();
    let mut degraded = false;
    for raw in &cfg.patterns {
        match pattern::parse(raw) {
            Ok(p) => compiled.push(p),
            Err(e) => {
                diagnostics.push(e.diagnostic());
                degraded = true;
            }
        }
    }
    (compiled, diagnostics, degraded)
}

fn line_hits(patterns: &[ParsedPattern], line: &str, ignore_case: bool) -> bool {
    patterns.iter().any(|p| matcher::matches(p, line, ignore_case))
}

struct SourceOutcome {
    buffer: String,
    matched: bool,
    match_count: usize,
}

/// Walks the lines of one reader, deciding per line whether it is a hit
/// (after inversion), buffering before-context, trailing after-context,
/// and honoring the early-termination flags (`quiet`, `-l`, `-m`).
///
/// `name` distinguishes a file source (`Some`, context buffering active)
/// from stdin (`None`, context silently ignored). `show_filename` is
/// decided by the caller based on how many sources are in play.
fn search_source<R: Read>(
    cfg: &Config,
    patterns: &[ParsedPattern],
    reader: R,
    name: Option<&str>,
    show_filename: bool,
) -> (SourceOutcome, Option<String>) {
    let context_active = name.is_some();
    let before_context = if context_active { cfg.context.before } else { 0 };
    let after_context = if context_active { cfg.context.after } else { 0 };

    let mut buffer = String::new();
    let mut matched = false;
    let mut match_count = 0usize;
    let mut printed: HashSet<usize> = HashSet::new();
    let mut before_buf: VecDeque<(usize, String)> = VecDeque::new();
    let mut after_remaining = 0usize;
    let mut decode_error: Option<String> = None;

    let suppress_line_output =
        cfg.count || cfg.quiet || cfg.files_with_matches || cfg.files_without_match;

    'lines: for item in LineIter::new(reader) {
        let (line_no, text) = match item {
            Ok(pair) => pair,
            Err(e) => {
                decode_error = Some(
                    Error::SourceUnreadable {
                        source: name.unwrap_or("(standard input)").to_string(),
                        reason: e.to_string(),
                    }
                    .diagnostic(),
                );
                break;
            }
        };

        let raw_hit = line_hits(patterns, &text, cfg.case_insensitive);
        let hit = raw_hit != cfg.invert;

        if hit {
            matched = true;
            match_count += 1;
        }

        if !suppress_line_output {
            if hit {
                if before_context > 0 {
                    while let Some((bno, btext)) = before_buf.pop_front() {
                        if printed.insert(bno) {
                            output::format_line(
                                &mut buffer,
                                show_filename.then_some(name.unwrap_or_default()),
                                cfg.line_number,
                                bno,
                                &btext,
                            );
                        }
                    }
                }
                if printed.insert(line_no) {
                    // Inverted hits have no "matched span" to speak of — they
                    // are lines that failed every pattern — so only the
                    // direct, non-inverted case gets highlighted.
                    let rendered = if cfg.color && !cfg.invert {
                        output::highlight_line(&text, patterns, cfg.case_insensitive)
                    } else {
                        text.clone()
                    };
                    output::format_line(
                        &mut buffer,
                        show_filename.then_some(name.unwrap_or_default()),
                        cfg.line_number,
                        line_no,
                        &rendered,
                    );
                }
                after_remaining = after_context;
            } else {
                if before_context > 0 {
                    before_buf.push_back((line_no, text.clone()));
                    while before_buf.len() > before_context {
                        before_buf.pop_front();
                    }
                }
                if after_remaining > 0 {
                    if printed.insert(line_no) {
                        output::format_line(
                            &mut buffer,
                            show_filename.then_some(name.unwrap_or_default()),
                            cfg.line_number,
                            line_no,
                            &text,
                        );
                    }
                    after_remaining -= 1;
                }
            }
        }

        if hit {
            if cfg.quiet || cfg.files_with_matches {
                break 'lines;
            }
            if cfg.max_count > 0 && match_count >= cfg.max_count {
                break 'lines;
            }
        }
    }

    (
        SourceOutcome {
            buffer,
            matched,
            match_count,
        },
        decode_error,
    )
}

fn check_usage(cfg: &Config) -> Result<(), String> {
    if cfg.patterns.is_empty() {
        return Err(Error::ArgumentError("no pattern provided".into()).to_string());
    }
    if cfg.files_with_matches && cfg.files_without_match {
        return Err(Error::ArgumentError("-l and -L are mutually exclusive".into()).to_string());
    }
    Ok(())
}

/// Search a single already-open reader (a file, stdin, or an in-memory
/// buffer in tests). Because this is inherently a single source, the
/// filename prefix rule never fires here regardless of `name`; `name`'s
/// only other job is enabling context buffering (`Some` = file-like,
/// `None` = stdin-like).
pub fn run_on_reader<R: Read>(
    cfg: &Config,
    reader: R,
    name: Option<&str>,
) -> Result<RunResult, String> {
    check_usage(cfg)?;

    let (patterns, mut diagnostics, degraded) = compile_patterns(cfg);
    let (outcome, decode_err) = search_source(cfg, &patterns, reader, name, false);
    if let Some(d) = decode_err {
        diagnostics.push(d);
    }

    let mut output = outcome.buffer;
    if cfg.count && !cfg.quiet {
        output.clear();
        output::format_count(&mut output, None, outcome.match_count);
    } else if cfg.files_with_matches && !cfg.quiet {
        output.clear();
        if outcome.matched {
            output::format_source_name(&mut output, name.unwrap_or("(standard input)"));
        }
    } else if cfg.files_without_match && !cfg.quiet {
        output.clear();
        if !outcome.matched {
            output::format_source_name(&mut output, name.unwrap_or("(standard input)"));
        }
    } else if cfg.quiet {
        output.clear();
    }

    let status = if outcome.matched {
        ExitStatus::MatchFound
    } else {
        ExitStatus::NoMatch
    };

    Ok(RunResult {
        output,
        status,
        diagnostics,
        degraded,
    })
}

/// Search across `inputs` (files, directories when `cfg.recursive`, or
/// stdin when `inputs` is empty), in the order given on the command line.
pub fn run(cfg: &Config, inputs: &[String]) -> Result<RunResult, String> {
    check_usage(cfg)?;

    let (patterns, mut diagnostics, degraded) = compile_patterns(cfg);
    let files = expand_inputs(cfg, inputs);
    let show_filename = files.len() > 1 || cfg.recursive;

    let mut combined = String::new();
    let mut matched_any = false;

    for name in &files {
        let is_stdin = name == "-";

        if !is_stdin && is_binary_path(name) {
            diagnostics.push(
                Error::SourceUnreadable {
                    source: name.clone(),
                    reason: "binary file".to_string(),
                }
                .diagnostic(),
            );
            continue;
        }

        let reader = match open_input(name) {
            Ok(r) => r,
            Err(e) => {
                diagnostics.push(
                    Error::SourceUnreadable {
                        source: name.clone(),
                        reason: e.to_string(),
                    }
                    .diagnostic(),
                );
                continue;
            }
        };

        let source_name = if is_stdin { None } else { Some(name.as_str()) };
        let display_name = if is_stdin { "(standard input)" } else { name.as_str() };

        let (outcome, decode_err) = search_source(cfg, &patterns, reader, source_name, show_filename);
        if let Some(d) = decode_err {
            diagnostics.push(d);
            continue;
        }

        if outcome.matched {
            matched_any = true;
        }

        if cfg.quiet {
            // Nothing to render; stop at the first source that hits.
            if matched_any {
                break;
            }
            continue;
        }

        if cfg.count {
            output::format_count(
                &mut combined,
                show_filename.then_some(display_name),
                outcome.match_count,
            );
        } else if cfg.files_with_matches {
            if outcome.matched {
                output::format_source_name(&mut combined, display_name);
            }
        } else if cfg.files_without_match {
            if !outcome.matched {
                output::format_source_name(&mut combined, display_name);
            }
        } else {
            combined.push_str(&outcome.buffer);
        }
    }

    let status = if matched_any {
        ExitStatus::MatchFound
    } else {
        ExitStatus::NoMatch
    };

    Ok(RunResult {
        output: combined,
        status,
        diagnostics,
        degraded,
    })
}
