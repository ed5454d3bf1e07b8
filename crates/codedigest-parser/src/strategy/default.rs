use std::collections::HashSet;

use super::verbatim;
use crate::capture::Capture;
use crate::chunks::CapturedChunk;

/// Definition names, comments and imports, each as its full line range.
///
/// For a `name.` capture the node is the identifier, so the kept text is the
/// line that declares it.
pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    let label = capture.label;
    if label.is_name || label.is_comment() || label.is_import() {
        verbatim(capture, lines, dedup)
    } else {
        None
    }
}
