use std::collections::HashSet;

use super::{emit, verbatim};
use crate::capture::{Capture, CaptureKind, DefinitionKind};
use crate::chunks::CapturedChunk;

/// Comments whole; selectors and at-rules reduced to their opening line.
pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    match capture.label.kind {
        CaptureKind::Comment => verbatim(capture, lines, dedup),
        CaptureKind::Import
        | CaptureKind::Definition(DefinitionKind::Selector | DefinitionKind::AtRule) => {
            if capture.label.is_name {
                return None;
            }
            let row = capture.start_row();
            emit(dedup, first_line_head(lines[row]).to_string(), row, row)
        }
        _ => None,
    }
}

/// The part of a line before its `{`, right-trimmed.
fn first_line_head(line: &str) -> &str {
    line.split('{').next().unwrap_or(line).trim_end()
}
