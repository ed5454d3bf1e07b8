use std::collections::HashSet;

use super::{emit, function_signature, verbatim};
use crate::capture::{Capture, CaptureKind, DefinitionKind};
use crate::chunks::CapturedChunk;

pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    let label = capture.label;
    if label.is_comment() {
        return verbatim(capture, lines, dedup);
    }
    if label.is_name {
        return None;
    }

    match label.kind {
        CaptureKind::Import | CaptureKind::Require => verbatim(capture, lines, dedup),
        CaptureKind::Definition(kind) => match kind {
            DefinitionKind::Package => {
                let row = capture.start_row();
                emit(dedup, lines[row].trim_end().to_string(), row, row)
            }
            // `import (...)`, `const (...)` and `var (...)` blocks stay whole.
            DefinitionKind::Import
            | DefinitionKind::Constant
            | DefinitionKind::Variable
            | DefinitionKind::Type => verbatim(capture, lines, dedup),
            DefinitionKind::Function | DefinitionKind::Method => {
                let row = capture.start_row();
                match function_signature(lines, row, capture.end_row()) {
                    Some(signature) => emit(dedup, signature.text, row, signature.end_row),
                    None => emit(dedup, lines[row].trim_end().to_string(), row, row),
                }
            }
            _ => None,
        },
        _ => None,
    }
}
