use unicode_width::UnicodeWidthStr;

use at_base::constants::{ANNOTATION_MARKER, BRANCH, LAST, SPACE, TEE};

/// The formatted tree: entry lines plus counters for the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTree {
    pub lines: Vec<String>,
    pub directories: usize,
    pub files: usize,
    /// The line limit cut the walk short
    pub truncated: bool,
}

impl RenderedTree {
    pub fn summary(&self) -> String {
        summary_line(self.directories, self.files)
    }

    /// Entry lines followed by the summary, newline-separated, no trailing newline.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.summary());
        out
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.directories + self.files
    }
}

/// `{N} director{y|ies}, {M} file{|s}`
pub fn summary_line(directories: usize, files: usize) -> String {
    let dir_word = if directories == 1 { "directory" } else { "directories" };
    let file_word = if files == 1 { "file" } else { "files" };
    format!("{} {}, {} {}", directories, dir_word, files, file_word)
}

/// Line appended when the line limit stops the walk.
pub fn limit_line(limit: usize) -> String {
    format!("... line limit of {} reached", limit)
}

/// Indentation contributed by the ancestors of an entry.
pub fn branch_prefix(ancestors_last: &[bool]) -> String {
    ancestors_last.iter().map(|&last| if last { SPACE } else { BRANCH }).collect()
}

/// One tree line. The annotation is padded to `column` display columns,
/// with at least one space before the marker.
pub fn entry_line(prefix: &str, is_last: bool, name: &str, annotation: Option<&str>, column: usize) -> String {
    let mut line = format!("{}{}{}", prefix, if is_last { LAST } else { TEE }, name);
    if let Some(text) = annotation {
        let width = line.width();
        let pad = if width < column { column - width } else { 1 };
        line.extend(std::iter::repeat_n(' ', pad));
        line.push_str(ANNOTATION_MARKER);
        line.push_str(text);
    }
    line
}
