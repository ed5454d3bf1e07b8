use std::collections::HashSet;

use tree_sitter::Node;

use super::rows_text;
use crate::capture::{Capture, CaptureKind};
use crate::chunks::CapturedChunk;
use crate::context::ParseContext;

/// HTML and Vue: comments, `<template>`, `<script>` and `<style>` blocks kept in
/// full.
///
/// Dedup uses `label:start_row`, not the text: identical fragments at different
/// offsets are both legitimate output.
pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
    context: &ParseContext<'_>,
) -> Option<CapturedChunk> {
    match capture.label.kind {
        CaptureKind::Definition(_) => {}
        // Comments inside a kept `<template>` are already part of its text.
        CaptureKind::Comment if !inside_template(capture.node, context.raw_text) => {}
        _ => return None,
    }

    let start = capture.start_row();
    let key = format!("{}:{}", capture.label.as_str(), start);
    if !dedup.insert(key) {
        return None;
    }

    let end = capture.end_row().min(lines.len() - 1);
    let text = rows_text(lines, start, end)?;
    if text.trim().is_empty() {
        return None;
    }
    Some(CapturedChunk::new(text, start, end))
}

fn inside_template(node: Node<'_>, source: &str) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "element" && tag_name(ancestor, source) == Some("template") {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

fn tag_name<'s>(element: Node<'_>, source: &'s str) -> Option<&'s str> {
    let start_tag = element.named_child(0).filter(|child| child.kind() == "start_tag")?;
    let name = start_tag.named_child(0).filter(|child| child.kind() == "tag_name")?;
    source.get(name.byte_range())
}
