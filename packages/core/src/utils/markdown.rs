//! Markdown flattening for search excerpts
//!
//! Page bodies are markdown; search results show a short plain-text excerpt.
//! Rendering is out of scope, so this only strips the common inline and
//! line-start syntax.

use regex::Regex;
use std::sync::LazyLock;

/// Inline patterns, applied to the whole text in order.
///
/// Images run before links (`![..](..)` contains a link) and bold before
/// italic (`**` contains `*`).
static INLINE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"!\[([^\]]*)\]\([^)]+\)", "$1"),
        (r"\[([^\]]+)\]\([^)]+\)", "$1"),
        (r"`{3}[^\n]*", ""),
        (r"`([^`]+)`", "$1"),
        (r"\*\*([^*]+)\*\*", "$1"),
        (r"__([^_]+)__", "$1"),
        (r"~~([^~]+)~~", "$1"),
        (r"\*([^*]+)\*", "$1"),
        (r"<[^>]+>", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (compile(pattern), replacement))
    .collect()
});

/// Line-start markers: headers, quotes, list bullets, rules
static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^\s*(#{1,6}\s+|>\s?|\d+\.\s+|[-*+]\s+|[-*_]{3,}\s*$)"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals above; a failure here is a programming error
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid markdown pattern {pattern:?}: {e}"))
}

/// Strip markdown syntax and collapse whitespace
///
/// # Examples
///
/// ```
/// use courseway_core::utils::plain_text;
///
/// assert_eq!(plain_text("## Setup\n\nRun **cargo**."), "Setup Run cargo.");
/// assert_eq!(plain_text("See [the guide](/guide)"), "See the guide");
/// ```
pub fn plain_text(markdown: &str) -> String {
    let mut text = LINE_PATTERN.replace_all(markdown, "").into_owned();
    for (pattern, replacement) in INLINE_PATTERNS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Plain-text excerpt of at most `max_chars` characters, ellipsized when cut
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let text = plain_text(markdown);
    if text.chars().count() <= max_chars {
        return text;
    }

    let cut: String = text.chars().take(max_chars).collect();
    // Prefer ending on a word boundary
    let cut = match cut.rfind(' ') {
        Some(i) if i > 0 => &cut[..i],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}
