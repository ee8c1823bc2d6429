#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub patterns: Vec<String>,
    pub invert: bool,              // -v
    pub count: bool,               // -c
    pub quiet: bool,               // -q / --silent
    pub context: Context,          // -A, -B, -C
    pub color: bool,               // syntax highlighting
    pub recursive: bool,           // -r / -R
    pub case_insensitive: bool,    // -i
    pub line_number: bool,         // -n
    pub max_count: usize,          // -m; 0 = unlimited
    pub files_with_matches: bool,  // -l
    pub files_without_match: bool, // -L
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: vec![],
            invert: false,
            count: false,
            quiet: false,
            context: Context::default(),
            color: true,
            recursive: false,
            case_insensitive: false,
            line_number: false,
            max_count: 0,
            files_with_matches: false,
            files_without_match: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    MatchFound = 0,
    NoMatch = 1,
}

/// Result of a full invocation: the rendered output, the overall exit
/// status, any diagnostics that should go to stderr, and whether a
/// malformed pattern degraded the run (affects exit code when no hit was
/// found — see `search::run`).
pub struct RunResult {
    pub output: String,
    pub status: ExitStatus,
    pub diagnostics: Vec<String>,
    pub degraded: bool,
}
