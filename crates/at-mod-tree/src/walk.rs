//! Directory walk driven by an explicit frame stack.
//!
//! Each frame carries the "is last sibling" bit of every ancestor, so the line
//! prefix and the depth check are pure functions of the frame.

use std::path::Path;

use at_base::{AnnotreeError, Result, TreeOptions};

use crate::annotate::Annotator;
use crate::filter::IgnoreRuleset;
use crate::render::{self, RenderedTree};
use crate::types::PathEntry;

/// One pending entry of the walk.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub entry: PathEntry,
    pub ancestors_last: Vec<bool>,
    pub is_last: bool,
}

impl Frame {
    pub fn prefix(&self) -> String {
        render::branch_prefix(&self.ancestors_last)
    }

    /// Whether this entry's children fall within the depth limit.
    pub fn can_descend(&self, max_depth: Option<usize>) -> bool {
        self.entry.is_directory && !self.entry.is_symlink && max_depth.is_none_or(|max| self.entry.depth < max)
    }

    fn child_ancestors(&self) -> Vec<bool> {
        let mut bits = self.ancestors_last.clone();
        bits.push(self.is_last);
        bits
    }
}

/// Push `children` so they pop in display order.
fn push_children(stack: &mut Vec<Frame>, children: Vec<PathEntry>, ancestors_last: &[bool]) {
    let count = children.len();
    for (i, entry) in children.into_iter().enumerate().rev() {
        stack.push(Frame { entry, ancestors_last: ancestors_last.to_vec(), is_last: i + 1 == count });
    }
}

/// Walk `root` and render it. `root` must be an existing directory.
pub fn build_tree(
    root: &Path,
    options: &TreeOptions,
    ruleset: &IgnoreRuleset,
    annotator: &Annotator,
) -> Result<RenderedTree> {
    let mut rendered = RenderedTree::default();
    if options.max_depth == Some(0) {
        return Ok(rendered);
    }

    let root_entry = PathEntry::root(root);
    let children = root_entry.children(ruleset, options.directories_only).map_err(|e| AnnotreeError::io(root, e))?;
    let mut stack = Vec::new();
    push_children(&mut stack, children, &[]);

    while let Some(frame) = stack.pop() {
        if let Some(limit) = options.line_limit
            && rendered.entry_count() >= limit
        {
            rendered.truncated = true;
            rendered.lines.push(render::limit_line(limit));
            break;
        }

        let annotation = if options.annotate { annotator.annotate(&frame.entry) } else { None };
        rendered.lines.push(render::entry_line(
            &frame.prefix(),
            frame.is_last,
            &frame.entry.name,
            annotation.as_deref(),
            options.annotation_column,
        ));

        if !frame.entry.is_directory {
            rendered.files += 1;
            continue;
        }
        rendered.directories += 1;

        if !frame.can_descend(options.max_depth) {
            continue;
        }
        let mut children = match frame.entry.children(ruleset, options.directories_only) {
            Ok(children) => children,
            Err(e) => {
                log::warn!("cannot list {}: {}", frame.entry.path.display(), e);
                continue;
            }
        };
        // An initializer that described its folder is shown on the folder line instead
        if annotation.is_some()
            && let Some(init) = annotator.initializer(&frame.entry.path)
        {
            children.retain(|child| child.is_directory || child.path != init);
        }
        push_children(&mut stack, children, &frame.child_ancestors());
    }

    Ok(rendered)
}
