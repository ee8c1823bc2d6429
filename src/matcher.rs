//! Recursive-backtracking matcher for patterns parsed by [`crate::pattern`].
//!
//! Matching runs over `Vec<char>` rather than raw byte slices so that
//! wildcard/class/quantifier semantics stay defined in terms of "one
//! character" regardless of UTF-8 encoding width.

use crate::pattern::{ParsedPattern, Quantifier, Token, TokenKind};

const MAX_GROUPS: usize = 9;

#[derive(Clone, Copy, Default)]
struct Captures {
    slots: [Option<(usize, usize)>; MAX_GROUPS],
}

impl Captures {
    fn get(&self, n: usize) -> Option<(usize, usize)> {
        if n == 0 || n > MAX_GROUPS {
            None
        } else {
            self.slots[n - 1]
        }
    }

    fn set(&mut self, n: usize, span: (usize, usize)) {
        if n >= 1 && n <= MAX_GROUPS {
            self.slots[n - 1] = Some(span);
        }
    }
}

fn char_eq(a: char, b: char, ignore_case: bool) -> bool {
    if ignore_case {
        a.to_ascii_lowercase() == b.to_ascii_lowercase()
    } else {
        a == b
    }
}

fn token_min_len(token: &Token) -> usize {
    let base = match &token.kind {
        TokenKind::Group { alternatives, .. } => alternatives
            .iter()
            .map(|alt| alt.iter().map(token_min_len).sum::<usize>())
            .min()
            .unwrap_or(0),
        _ => 1,
    };
    match token.quantifier {
        Some(Quantifier::ZeroOrOne) => 0,
        _ => base,
    }
}

/// Smallest number of input characters the whole token sequence could ever
/// consume. Used to bound which starting positions are worth trying.
fn min_match_length(tokens: &[Token]) -> usize {
    tokens.iter().map(token_min_len).sum()
}

/// Attempts to consume exactly one occurrence of `token` starting at `j`.
/// Mutates `captures` only on success (groups record their span; nested
/// failed alternatives are rolled back internally).
fn consume(token: &Token, input: &[char], j: usize, captures: &mut Captures, ignore_case: bool) -> Option<usize> {
    match &token.kind {
        TokenKind::Literal(c) => {
            if j < input.len() && char_eq(input[j], *c, ignore_case) {
                Some(j + 1)
            } else {
                None
            }
        }
        TokenKind::Wildcard => {
            if j < input.len() {
                Some(j + 1)
            } else {
                None
            }
        }
        TokenKind::EscapeDigit => {
            if j < input.len() && input[j].is_ascii_digit() {
                Some(j + 1)
            } else {
                None
            }
        }
        TokenKind::EscapeWord => {
            if j < input.len() && (input[j].is_ascii_alphanumeric() || input[j] == '_') {
                Some(j + 1)
            } else {
                None
            }
        }
        TokenKind::CharClass { set, negated } => {
            if j >= input.len() {
                return None;
            }
            let c = input[j];
            let hit = set.iter().any(|s| char_eq(*s, c, ignore_case));
            if hit != *negated {
                Some(j + 1)
            } else {
                None
            }
        }
        TokenKind::Backreference(n) => {
            let (s, e) = captures.get(*n)?;
            let len = e - s;
            if j + len > input.len() {
                return None;
            }
            let needed = &input[s..e];
            let candidate = &input[j..j + len];
            let eq = needed
                .iter()
                .zip(candidate.iter())
                .all(|(a, b)| char_eq(*a, *b, ignore_case));
            if eq {
                Some(j + len)
            } else {
                None
            }
        }
        TokenKind::Group { alternatives, number } => {
            for alt in alternatives {
                let snapshot = *captures;
                if let Some(end) = try_match_seq(alt, 0, j, captures, ignore_case, false, input) {
                    captures.set(*number, (j, end));
                    return Some(end);
                }
                *captures = snapshot;
            }
            None
        }
    }
}

/// Tries to match `tokens[i..]` starting at input position `j`. On success,
/// returns the input position just past the match. `end_anchor` requires the
/// match to reach the end of `input` exactly; it is only ever `true` for the
/// top-level call, never for a group's inner alternatives.
fn try_match_seq(
    tokens: &[Token],
    i: usize,
    j: usize,
    captures: &mut Captures,
    ignore_case: bool,
    end_anchor: bool,
    input: &[char],
) -> Option<usize> {
    if i == tokens.len() {
        return if !end_anchor || j == input.len() { Some(j) } else { None };
    }

    let token = &tokens[i];
    match token.quantifier {
        None => {
            let next_j = consume(token, input, j, captures, ignore_case)?;
            try_match_seq(tokens, i + 1, next_j, captures, ignore_case, end_anchor, input)
        }
        Some(Quantifier::ZeroOrOne) => {
            let snapshot = *captures;
            if let Some(next_j) = consume(token, input, j, captures, ignore_case) {
                if let Some(end) = try_match_seq(tokens, i + 1, next_j, captures, ignore_case, end_anchor, input) {
                    return Some(end);
                }
            }
            *captures = snapshot;
            try_match_seq(tokens, i + 1, j, captures, ignore_case, end_anchor, input)
        }
        Some(Quantifier::OneOrMore) => {
            let mut positions = vec![j];
            let mut snapshots = vec![*captures];
            loop {
                let cur_j = *positions.last().unwrap();
                match consume(token, input, cur_j, captures, ignore_case) {
                    Some(next_j) => {
                        let no_progress = next_j == cur_j;
                        positions.push(next_j);
                        snapshots.push(*captures);
                        if no_progress {
                            break;
                        }
                    }
                    None => break,
                }
            }
            let k_max = positions.len() - 1;
            if k_max == 0 {
                *captures = snapshots[0];
                return None;
            }
            for k in (1..=k_max).rev() {
                *captures = snapshots[k];
                if let Some(end) =
                    try_match_seq(tokens, i + 1, positions[k], captures, ignore_case, end_anchor, input)
                {
                    return Some(end);
                }
            }
            *captures = snapshots[0];
            None
        }
    }
}

fn find_match_positions(pattern: &ParsedPattern, chars: &[char], ignore_case: bool) -> Option<(usize, usize)> {
    let min_len = min_match_length(&pattern.tokens);
    let len = chars.len();

    let positions: Vec<usize> = if pattern.starts_with_start_anchor {
        vec![0]
    } else if len >= min_len {
        (0..=(len - min_len)).collect()
    } else {
        Vec::new()
    };

    for p in positions {
        let mut captures = Captures::default();
        if let Some(end) =
            try_match_seq(&pattern.tokens, 0, p, &mut captures, ignore_case, pattern.ends_with_end_anchor, chars)
        {
            return Some((p, end));
        }
    }
    None
}

/// Does `pattern` match anywhere in `input`?
pub fn matches(pattern: &ParsedPattern, input: &str, ignore_case: bool) -> bool {
    let chars: Vec<char> = input.chars().collect();
    find_match_positions(pattern, &chars, ignore_case).is_some()
}

/// Leftmost match span as byte offsets into `input`, for highlighting.
pub fn find_first(pattern: &ParsedPattern, input: &str, ignore_case: bool) -> Option<(usize, usize)> {
    let chars: Vec<char> = input.chars().collect();
    let (cs, ce) = find_match_positions(pattern, &chars, ignore_case)?;
    let byte_start: usize = chars[..cs].iter().map(|c| c.len_utf8()).sum();
    let byte_end: usize = byte_start + chars[cs..ce].iter().map(|c| c.len_utf8()).sum::<usize>();
    Some((byte_start, byte_end))
}
