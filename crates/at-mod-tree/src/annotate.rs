//! Description mining from leading docstrings and comments.
//!
//! This is heuristic string matching, not parsing. The recognised shapes form a
//! closed set, tried in priority order:
//!
//! 1. A docstring as the first statement: triple-quoted (`"""` or `'''`, optional
//!    `r`/`u`/`b` prefix), whose first non-empty line wins, or a one-line `"..."`
//!    or `'...'` literal.
//! 2. Otherwise the first line comment before any code: `#`, `//` (also `///`
//!    and `//!`), `--`, or a one-line `<!-- ... -->`.
//!
//! Shebangs and Python encoding cookies are skipped. C preprocessor directives
//! (`#include`, `#pragma`, ...) count as code. Comments with no
//! alphanumeric content (rulers like `# -----`) are skipped too.
//! Directories take the description of their package initializer.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthChar;

use at_base::constants::{DEFAULT_INITIALIZERS, ELLIPSIS, SCAN_BYTE_LIMIT, SCAN_LINE_LIMIT};

use crate::types::PathEntry;

static DOCSTRING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?i:[rub]{0,2})("""|''')(.*)$"#).expect("docstring pattern"));

/// A docstring that opens and closes on one line with a single `"` or `'`.
static DOCSTRING_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?i:[rub]{0,2})(?:"([^"]*)"|'([^']*)')\s*$"#).expect("inline docstring pattern")
});

/// C preprocessor directives are structure, not comments.
static PREPROCESSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:include|define|undef|pragma|ifdef|ifndef|if|elif|else|endif|error|warning|line|import)\b")
        .expect("preprocessor pattern")
});

static ENCODING_COOKIE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#.*coding[:=]\s*[-\w.]+").expect("encoding cookie pattern"));

/// Line comment shapes, each capturing the comment body.
static LINE_COMMENTS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^<!--\s*(.*?)\s*(?:-->)?$").expect("html comment pattern"),
        Regex::new(r"^//[/!]?(.*)$").expect("slash comment pattern"),
        Regex::new(r"^#+(?:([^!\[].*))?$").expect("hash comment pattern"),
        Regex::new(r"^--(?:\s(.*))?$").expect("dash comment pattern"),
    ]
});

/// Produces descriptions for tree entries.
#[derive(Debug, Clone)]
pub struct Annotator {
    initializers: Vec<String>,
    max_width: Option<usize>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(DEFAULT_INITIALIZERS.iter().map(|s| s.to_string()).collect(), None)
    }
}

impl Annotator {
    pub fn new(initializers: Vec<String>, max_width: Option<usize>) -> Self {
        Self { initializers, max_width }
    }

    /// Description for a file or directory, or `None`. Never fails: unreadable
    /// and binary files simply have no description.
    pub fn annotate(&self, entry: &PathEntry) -> Option<String> {
        let raw = if entry.is_directory {
            self.initializer(&entry.path).and_then(|init| describe_file(&init))
        } else {
            describe_file(&entry.path)
        }?;
        normalize(&raw, self.max_width)
    }

    /// The first configured initializer file present directly inside `dir`.
    pub fn initializer(&self, dir: &Path) -> Option<PathBuf> {
        self.initializers.iter().map(|name| dir.join(name)).find(|path| path.is_file())
    }
}

/// Raw description of a single file, before normalisation.
pub fn describe_file(path: &Path) -> Option<String> {
    let text = read_leading_text(path)?;
    extract_description(&text)
}

/// Apply the matchers to the leading text of a file.
pub fn extract_description(text: &str) -> Option<String> {
    let mut first_comment: Option<String> = None;
    let mut seen = 0;
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        seen += 1;
        if seen > SCAN_LINE_LIMIT {
            break;
        }
        let shebang = seen == 1 && trimmed.starts_with("#!") && !trimmed.starts_with("#![");
        // Encoding cookies only count on the first two lines
        if shebang || (seen <= 2 && ENCODING_COOKIE.is_match(trimmed)) {
            continue;
        }
        if let Some(caps) = DOCSTRING_OPEN.captures(trimmed) {
            let quote = caps.get(1).map_or("\"\"\"", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            return docstring_first_line(quote, rest, &mut lines).or(first_comment);
        }
        if let Some(caps) = DOCSTRING_INLINE.captures(trimmed) {
            let body = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str().trim());
            return if body.is_empty() { first_comment } else { Some(body.to_string()) };
        }
        match comment_body(trimmed) {
            Some(body) => {
                if first_comment.is_none() && body.chars().any(char::is_alphanumeric) {
                    first_comment = Some(body.to_string());
                }
            }
            None => break,
        }
    }

    first_comment
}

/// First non-empty line inside a docstring opened with `quote`.
/// `rest` is what followed the opening delimiter on its own line.
fn docstring_first_line<'a>(quote: &str, rest: &'a str, lines: &mut impl Iterator<Item = &'a str>) -> Option<String> {
    let mut candidate = rest;
    loop {
        let (content, closed) = match candidate.find(quote) {
            Some(idx) => (&candidate[..idx], true),
            None => (candidate, false),
        };
        let content = content.trim();
        if !content.is_empty() {
            return Some(content.to_string());
        }
        if closed {
            return None;
        }
        candidate = lines.next()?.trim();
    }
}

/// Body of a recognised line comment, or `None` if the line is code.
fn comment_body(line: &str) -> Option<&str> {
    if PREPROCESSOR.is_match(line) {
        return None;
    }
    LINE_COMMENTS.iter().find_map(|re| re.captures(line)).map(|caps| caps.get(1).map_or("", |m| m.as_str().trim()))
}

/// Read the head of a file as text. Binary or non-UTF-8 content yields `None`.
fn read_leading_text(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut buf = Vec::new();
    file.take(SCAN_BYTE_LIMIT).read_to_end(&mut buf).ok()?;
    if buf.contains(&0) {
        return None;
    }
    let text = match std::str::from_utf8(&buf) {
        Ok(text) => text,
        // The byte cap may split a multi-byte character; keep the valid prefix
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&buf[..e.valid_up_to()]).ok()?,
        Err(_) => return None,
    };
    Some(text.trim_start_matches('\u{feff}').to_string())
}

/// Collapse whitespace onto one line and cut to `max_width` display columns.
pub fn normalize(raw: &str, max_width: Option<usize>) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    let Some(max) = max_width else { return Some(collapsed) };
    if unicode_width::UnicodeWidthStr::width(collapsed.as_str()) <= max {
        return Some(collapsed);
    }

    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in collapsed.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    Some(out)
}
