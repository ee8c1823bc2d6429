//! rgrep: a line-oriented text search tool built around a self-contained
//! regular-expression engine.
//!
//! The engine is a two-stage pipeline: [`pattern::parse`] turns a pattern
//! string into a token tree, and [`matcher::matches`] evaluates that tree
//! against a line with recursive backtracking and backreference support.
//! Everything else — source discovery, per-line decisions, and output
//! formatting — is ambient plumbing around that core.
//!
//! Quick example: search a string buffer
//!
//! ```no_run
//! use rgrep::{Config, run_on_reader, ExitStatus};
//! let mut cfg = Config::default();
//! cfg.patterns = vec!["error".into()];
//! let res = run_on_reader(&cfg, "ok\nerror\n".as_bytes(), None).unwrap();
//! assert_eq!(res.status, ExitStatus::MatchFound);
//! println!("{}", res.output);
//! ```
//!
//! Quick example: search files, recursively
//!
//! ```no_run
//! use rgrep::{Config, run};
//! let mut cfg = Config::default();
//! cfg.patterns = vec!["TODO".into()];
//! cfg.recursive = true;
//! let result = run(&cfg, &["./src".into()]).unwrap();
//! println!("{}", result.output);
//! ```

pub mod config;
pub mod error;
pub mod fs_utils;
pub mod io_utils;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod search;
pub mod source;

pub use config::{Config, Context, ExitStatus, RunResult};
pub use error::Error;
pub use search::{run, run_on_reader};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn cfg(patterns: &[&str]) -> Config {
        Config {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            color: false,
            ..Default::default()
        }
    }

    // Six end-to-end scenarios, each pinned to its expected stdout and
    // exit status.

    #[test]
    fn scenario_basic_match() {
        let res = run_on_reader(&cfg(&["an"]), Cursor::new("apple\nbanana\ncherry\n"), None).unwrap();
        assert_eq!(res.output, "banana\n");
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn scenario_line_number_and_invert() {
        let mut c = cfg(&["line2"]);
        c.invert = true;
        c.line_number = true;
        let res = run_on_reader(&c, Cursor::new("line1\nline2\nline3\n"), None).unwrap();
        assert_eq!(res.output, "1:line1\n3:line3\n");
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn scenario_backreference() {
        let res = run_on_reader(
            &cfg(&[r"(\w+) and \1"]),
            Cursor::new("cat and cat\ndog and cat\n"),
            None,
        )
        .unwrap();
        assert_eq!(res.output, "cat and cat\n");
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn scenario_count() {
        let mut c = cfg(&["Error"]);
        c.count = true;
        let res = run_on_reader(&c, Cursor::new("Error: A\nError: B\nError: C\n"), None).unwrap();
        assert_eq!(res.output, "3\n");
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn scenario_before_and_after_context() {
        let mut c = cfg(&["c"]);
        c.context = Context { before: 1, after: 1 };
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("letters.txt");
        fs::write(&path, b"a\nb\nc\nd\ne\n").unwrap();
        let res = run(&c, &[path.to_string_lossy().to_string()]).unwrap();
        assert_eq!(res.output, "b\nc\nd\n");
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn scenario_files_with_matches() {
        let td = tempfile::tempdir().unwrap();
        let a = td.path().join("A");
        let b = td.path().join("B");
        fs::write(&a, b"x\n").unwrap();
        fs::write(&b, b"y\n").unwrap();

        let mut c = cfg(&["y"]);
        c.files_with_matches = true;
        let inputs = vec![
            a.to_string_lossy().to_string(),
            b.to_string_lossy().to_string(),
        ];
        let res = run(&c, &inputs).unwrap();
        assert_eq!(res.output.trim(), b.to_string_lossy());
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn no_pattern_is_an_argument_error() {
        let res = run_on_reader(&Config::default(), Cursor::new(b"hello".as_ref()), None);
        assert!(res.is_err());
    }

    #[test]
    fn malformed_pattern_degrades_exit_status_but_does_not_abort() {
        let mut c = cfg(&["(unterminated"]);
        let res = run_on_reader(&c, Cursor::new("hello\n"), None).unwrap();
        assert_eq!(res.status, ExitStatus::NoMatch);
        assert!(res.degraded);
        assert!(!res.diagnostics.is_empty());

        // A valid pattern alongside a malformed one still finds its hits;
        // a genuine hit always wins over the degraded flag.
        c.patterns.push("hello".into());
        let res = run_on_reader(&c, Cursor::new("hello\n"), None).unwrap();
        assert_eq!(res.status, ExitStatus::MatchFound);
    }

    #[test]
    fn files_with_matches_and_without_match_are_mutually_exclusive() {
        let mut c = cfg(&["x"]);
        c.files_with_matches = true;
        c.files_without_match = true;
        let res = run_on_reader(&c, Cursor::new(b"x".as_ref()), None);
        assert!(res.is_err());
    }

    #[test]
    fn case_insensitive_matching() {
        let mut c = cfg(&["hello"]);
        c.case_insensitive = true;
        let res = run_on_reader(&c, Cursor::new("HeLLo world\nbye"), None).unwrap();
        assert_eq!(res.status, ExitStatus::MatchFound);
        assert!(res.output.contains("HeLLo world"));
    }

    #[test]
    fn max_count_caps_hits_per_source() {
        let mut c = cfg(&["x"]);
        c.max_count = 2;
        let res = run_on_reader(&c, Cursor::new("x\nx\nx\nx\n"), None).unwrap();
        assert_eq!(res.output.lines().count(), 2);
    }

    #[test]
    fn recursive_traversal_finds_nested_files() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        let sub = root.join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(root.join("a.txt"), b"foo\nbar\n").unwrap();
        fs::write(sub.join("b.txt"), b"baz\nmatchme\n").unwrap();

        let mut c = cfg(&["matchme"]);
        c.recursive = true;
        let inputs = vec![root.to_string_lossy().to_string()];
        let res = run(&c, &inputs).unwrap();
        assert_eq!(res.status, ExitStatus::MatchFound);
        assert!(res.output.contains("matchme"));
    }

    #[test]
    fn binary_files_are_skipped_with_a_diagnostic() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        fs::write(root.join("bin.dat"), [0u8, 159, 146, 150]).unwrap();
        fs::write(root.join("t.txt"), b"nothing here").unwrap();

        let mut c = cfg(&["zzzz"]);
        c.recursive = true;
        let inputs = vec![root.to_string_lossy().to_string()];
        let res = run(&c, &inputs).unwrap();
        assert_eq!(res.status, ExitStatus::NoMatch);
        assert!(res.diagnostics.iter().any(|d| d.contains("bin.dat")));
    }
}
