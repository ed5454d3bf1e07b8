use std::collections::HashSet;

use super::{emit, verbatim};
use crate::capture::{node_end_row, Capture, CaptureKind, DefinitionKind};
use crate::chunks::CapturedChunk;

pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    match capture.label.kind {
        CaptureKind::Comment
        | CaptureKind::Docstring
        | CaptureKind::Import
        | CaptureKind::Require => verbatim(capture, lines, dedup),
        CaptureKind::Definition(
            DefinitionKind::Class | DefinitionKind::Function | DefinitionKind::Method,
        ) => definition_header(capture, lines, dedup),
        CaptureKind::Definition(DefinitionKind::TypeAlias) => {
            let row = capture.start_row();
            let line = lines.get(row)?.trim().to_string();
            emit(dedup, line, row, row)
        }
        _ => None,
    }
}

/// Decorators plus the `def`/`class` header, up to the line ending in `:`.
///
/// The header never reaches the row where the body starts.
fn definition_header(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    let row = capture.start_row();
    let definition = capture.definition_node();
    let last = match definition.child_by_field_name("body") {
        Some(body) if body.start_position().row > row => body.start_position().row - 1,
        Some(_) => row,
        None => node_end_row(definition),
    };
    let last = last.min(lines.len() - 1).max(row);

    let header_end = (row..=last)
        .find(|&r| without_comment(lines[r]).trim_end().ends_with(':'))
        .unwrap_or(last);

    let decorators = decorators_above(lines, row);
    let first_row = row - decorators.len();

    let mut text: Vec<&str> = decorators;
    text.extend_from_slice(&lines[row..=header_end]);

    emit(dedup, text.join("\n"), first_row, header_end)
}

/// The code part of a line, before any `#` comment outside a string literal.
fn without_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if ch == '\\' => escaped = true,
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == '#' => return &line[..idx],
            None => {}
        }
    }
    line
}

/// Contiguous `@...` lines directly above `row`, in source order.
fn decorators_above<'a>(lines: &[&'a str], row: usize) -> Vec<&'a str> {
    let mut decorators: Vec<&str> = lines[..row]
        .iter()
        .rev()
        .take_while(|line| line.trim_start().starts_with('@'))
        .copied()
        .collect();
    decorators.reverse();
    decorators
}
