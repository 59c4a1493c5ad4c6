//! Utility functions for text processing: `MarkdownV2` escaping, token
//! redaction and safe truncation.
//!
//! This module uses the `lazy-regex` crate so patterns are validated at
//! compile time and initialized on first use.

// Allow non_std_lazy_statics because we use lazy_regex! macro which uses once_cell internally
#![allow(clippy::non_std_lazy_statics)]

use lazy_regex::lazy_regex;

/// Bot token embedded in a URL path: `bot<id>:<secret>`
static RE_TOKEN_IN_URL: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+");

/// Bare bot token: `<id>:<35-char secret>`
static RE_BARE_TOKEN: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"[0-9]{8,10}:[A-Za-z0-9_-]{35}");

/// Characters `MarkdownV2` requires escaping outside code entities
const MARKDOWN_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escape all `MarkdownV2` reserved characters in `text`.
///
/// Used by callers composing `send_message` bodies out of untrusted text.
///
/// # Examples
///
/// ```
/// use oxide_relay::utils::escape_markdown;
/// assert_eq!(escape_markdown("a_b.c"), "a\\_b\\.c");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Replace bot-token shapes in `text` with `[TELEGRAM_TOKEN]`.
///
/// Applied to anything the engine logs: request URLs embed the token in
/// the path, and upstream error descriptions occasionally echo it back.
#[must_use]
pub fn redact_token(text: &str) -> String {
    let pass = RE_TOKEN_IN_URL.replace_all(text, "$1[TELEGRAM_TOKEN]");
    RE_BARE_TOKEN
        .replace_all(pass.as_ref(), "[TELEGRAM_TOKEN]")
        .into_owned()
}

/// Truncate `text` to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_str(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
