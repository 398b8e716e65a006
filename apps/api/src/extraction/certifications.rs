//! Certification phrase detection.
//!
//! Three phrasings are recognised, case-insensitively:
//! "certified in X", "X certification" and "X certified".
//! Captures are trimmed and kept in document order; duplicates are NOT removed.
//!
//! Two capture modes:
//! - `Greedy`: X is the full run of word characters and whitespace next to the keyword,
//!   exactly as a single backtracking alternation would capture it. On running prose
//!   this swallows the whole clause ("I am AWS certified" -> "I am AWS").
//! - `Nearest` (default): anchors on the keyword and keeps only the capitalised phrase
//!   adjacent to it on the side the phrasing names, or the single adjacent word when
//!   nothing is capitalised ("I am AWS certified" -> "AWS"). "X certified in Y" yields
//!   both X and Y when X is capitalised; plural "certifications" is an anchor too.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static GREEDY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)certified in ([\w\s]+)|([\w\s]+) certification|([\w\s]+) certified")
        .expect("certification pattern is valid")
});

// "certified in" must come first so it wins over the bare "certified" anchor.
static ANCHOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(certified[ \t]+in)|certifications?|certified)\b")
        .expect("certification anchor pattern is valid")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    Nearest,
    Greedy,
}

#[derive(Debug, Error)]
#[error("unknown certification capture mode '{0}' (expected 'nearest' or 'greedy')")]
pub struct UnknownCaptureMode(String);

impl FromStr for CaptureMode {
    type Err = UnknownCaptureMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(CaptureMode::Nearest),
            "greedy" => Ok(CaptureMode::Greedy),
            other => Err(UnknownCaptureMode(other.to_string())),
        }
    }
}

/// Returns every certification phrase found in `text`, source casing preserved.
pub fn find_certifications(text: &str, mode: CaptureMode) -> Vec<String> {
    match mode {
        CaptureMode::Greedy => greedy_captures(text),
        CaptureMode::Nearest => nearest_captures(text),
    }
}

fn greedy_captures(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for caps in GREEDY_PATTERN.captures_iter(text) {
        for group in caps.iter().skip(1).flatten() {
            // Non-empty before trimming: a whitespace-only capture survives as "".
            if !group.as_str().is_empty() {
                found.push(group.as_str().trim().to_string());
            }
        }
    }
    found
}

fn nearest_captures(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut previous_end = 0;

    for caps in ANCHOR_PATTERN.captures_iter(text) {
        let Some(anchor) = caps.get(0) else {
            continue;
        };
        let before = preceding_run(text, previous_end, anchor.start());
        // "certified in X" names the phrase after the keyword, the other two before it.
        if caps.get(1).is_some() {
            // "AWS certified in Scrum": the holder-side name counts as well.
            found.extend(proper_trailing_phrase(before));
            found.extend(leading_phrase(following_run(text, anchor.end())));
        } else {
            found.extend(trailing_phrase(before));
        }
        previous_end = anchor.end();
    }
    found
}

// Phrases never cross line breaks: resumes are line-oriented.
fn is_phrase_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || (c.is_whitespace() && c != '\n' && c != '\r')
}

fn preceding_run(text: &str, floor: usize, end: usize) -> &str {
    let window = &text[floor..end];
    let start = window
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_phrase_char(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(window.len());
    &window[start..]
}

fn following_run(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let len = rest
        .char_indices()
        .find(|(_, c)| !is_phrase_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..len]
}

fn is_proper_word(word: &str) -> bool {
    word.chars()
        .next()
        .map(|c| c.is_uppercase() || c.is_ascii_digit())
        .unwrap_or(false)
}

fn is_connector(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "and" | "&" | "of")
}

/// Number of leading words forming a capitalised phrase. Connectors ("AWS and Azure")
/// are allowed between capitalised words but never at either end.
fn proper_span(words: &[&str]) -> usize {
    let mut span = 0;
    let mut i = 0;
    while let Some(word) = words.get(i) {
        if is_proper_word(word) {
            i += 1;
            span = i;
        } else if span > 0
            && is_connector(word)
            && words.get(i + 1).is_some_and(|w| is_proper_word(w))
        {
            i += 1;
        } else {
            break;
        }
    }
    span
}

fn leading_phrase(segment: &str) -> Option<String> {
    let words: Vec<&str> = segment.split_whitespace().collect();
    let proper = proper_span(&words);
    if proper > 0 {
        Some(words[..proper].join(" "))
    } else {
        words.first().map(|w| w.to_string())
    }
}

fn proper_trailing_phrase(segment: &str) -> Option<String> {
    let mut words: Vec<&str> = segment.split_whitespace().collect();
    words.reverse();
    let proper = proper_span(&words);
    if proper == 0 {
        return None;
    }
    let mut phrase = words[..proper].to_vec();
    phrase.reverse();
    Some(phrase.join(" "))
}

fn trailing_phrase(segment: &str) -> Option<String> {
    proper_trailing_phrase(segment).or_else(|| {
        segment
            .split_whitespace()
            .next_back()
            .map(|w| w.to_string())
    })
}
