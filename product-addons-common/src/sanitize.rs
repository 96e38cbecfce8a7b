//! Free-text sanitizing and slug normalization.
//!
//! Anything a customer types ends up in cart records, order notes and admin
//! screens, so submitted text passes through a [`TextSanitizer`] before it is
//! stored. [`slugify`] produces the canonical key form the storefront uses when
//! it serializes an option label into a request value.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("script/style pattern is valid")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").expect("tag pattern is valid"));
static SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));
static OCTET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("octet pattern is valid"));

/// Cleans untrusted free text before it enters a cart record.
pub trait TextSanitizer {
    /// Single-line text: markup removed, whitespace collapsed, trimmed.
    fn sanitize_text(&self, raw: &str) -> String;

    /// Multi-line text: like [`TextSanitizer::sanitize_text`] but line breaks survive.
    fn sanitize_textarea(&self, raw: &str) -> String;
}

/// Default sanitizer: strips markup, percent-encoded octets and control
/// characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSanitizer;

impl PlainTextSanitizer {
    pub fn new() -> Self {
        Self
    }

    fn clean(raw: &str, keep_newlines: bool) -> String {
        let mut text = raw.replace("\r\n", "\n");

        if text.contains('<') {
            text = SCRIPT_STYLE.replace_all(&text, "").into_owned();
            text = TAG.replace_all(&text, "").into_owned();
            text = text.replace('<', "&lt;");
        }

        if !keep_newlines {
            text = SPACES.replace_all(&text, " ").into_owned();
        }

        // Removing one octet can expose another, e.g. "%%4141".
        while OCTET.is_match(&text) {
            text = OCTET.replace_all(&text, "").into_owned();
        }

        text.chars()
            .filter(|c| !c.is_control() || (keep_newlines && (*c == '\n' || *c == '\t')))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl TextSanitizer for PlainTextSanitizer {
    fn sanitize_text(&self, raw: &str) -> String {
        Self::clean(raw, false)
    }

    fn sanitize_textarea(&self, raw: &str) -> String {
        Self::clean(raw, true)
    }
}

/// Convert a label to the slug form used as a request key.
///
/// Lowercases, drops markup and punctuation, and collapses runs of
/// whitespace, dots, slashes and dashes into a single `-`. Underscores are
/// kept.
pub fn slugify(input: &str) -> String {
    let lowered = TAG.replace_all(input, "").to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for c in lowered.chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
        } else if c.is_whitespace() || matches!(c, '-' | '.' | '/') {
            slug.push('-');
        }
    }

    slug.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
