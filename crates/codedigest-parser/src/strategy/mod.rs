//! Per-family extraction strategies.
//!
//! A strategy turns one capture into at most one chunk. Strategies never fail:
//! `None` means the capture is not relevant (or its text was already emitted).

mod clike;
mod css;
mod default;
mod go;
mod markup;
mod python;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use crate::capture::Capture;
use crate::chunks::CapturedChunk;
use crate::context::ParseContext;
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Default,
    CLike,
    Python,
    Go,
    Css,
    Markup,
}

impl Strategy {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::JavaScript
            | Language::TypeScript
            | Language::Tsx
            | Language::Java
            | Language::CSharp => Strategy::CLike,
            Language::Python => Strategy::Python,
            Language::Go => Strategy::Go,
            Language::Css => Strategy::Css,
            Language::Html | Language::Vue => Strategy::Markup,
            Language::Rust | Language::C | Language::Cpp | Language::Ruby | Language::Php => {
                Strategy::Default
            }
        }
    }

    /// Turn one capture into a chunk, or `None` when it contributes nothing.
    ///
    /// `dedup` lives for one `compress` call and is shared by every capture of
    /// the file.
    pub fn parse_capture(
        &self,
        capture: &Capture<'_, '_>,
        lines: &[&str],
        dedup: &mut HashSet<String>,
        context: &ParseContext<'_>,
    ) -> Option<CapturedChunk> {
        if capture.label.is_helper() || capture.start_row() >= lines.len() {
            return None;
        }

        match self {
            Strategy::Default => default::parse_capture(capture, lines, dedup),
            Strategy::CLike => clike::parse_capture(capture, lines, dedup, context),
            Strategy::Python => python::parse_capture(capture, lines, dedup),
            Strategy::Go => go::parse_capture(capture, lines, dedup),
            Strategy::Css => css::parse_capture(capture, lines, dedup),
            Strategy::Markup => markup::parse_capture(capture, lines, dedup, context),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Default => "default",
            Strategy::CLike => "c-like",
            Strategy::Python => "python",
            Strategy::Go => "go",
            Strategy::Css => "css",
            Strategy::Markup => "markup",
        }
    }
}

/// Lines `start..=end` joined, with `end` clamped to the file.
pub(crate) fn rows_text(lines: &[&str], start: usize, end: usize) -> Option<String> {
    if start >= lines.len() {
        return None;
    }
    let end = end.clamp(start, lines.len() - 1);
    Some(lines[start..=end].join("\n"))
}

/// Build a chunk unless the same text was already emitted for this file.
pub(crate) fn emit(
    dedup: &mut HashSet<String>,
    content: String,
    start_row: usize,
    end_row: usize,
) -> Option<CapturedChunk> {
    let trimmed = content.trim();
    if trimmed.is_empty() || !dedup.insert(trimmed.to_string()) {
        return None;
    }
    Some(CapturedChunk::new(content, start_row, end_row))
}

/// The capture's full line range, unchanged.
pub(crate) fn verbatim(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    let (start, end) = (capture.start_row(), capture.end_row());
    let text = rows_text(lines, start, end)?;
    let end = end.min(lines.len() - 1);
    emit(dedup, text, start, end)
}

/// A function header cut before its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Signature {
    pub text: String,
    pub end_row: usize,
}

/// Read a function header from `start`, looking no further than `last`.
///
/// The header ends at the first `{`, `=>` or `;` that follows the close of the
/// first parenthesised list at depth zero; that token and everything after it
/// is dropped. The scan is textual: parentheses or braces inside strings or
/// return types can end it early.
pub(crate) fn function_signature(lines: &[&str], start: usize, last: usize) -> Option<Signature> {
    if start >= lines.len() {
        return None;
    }
    let last = last.clamp(start, lines.len() - 1);

    let mut depth = 0usize;
    let mut closed = false;
    let mut header: Vec<&str> = Vec::new();

    for (row, &line) in lines.iter().enumerate().take(last + 1).skip(start) {
        let bytes = line.as_bytes();
        for (idx, &byte) in bytes.iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        closed = true;
                    }
                }
                b'{' | b';' if closed && depth == 0 => {
                    header.push(&line[..idx]);
                    return Some(finish_signature(&header, row));
                }
                b'=' if closed && depth == 0 && bytes.get(idx + 1) == Some(&b'>') => {
                    header.push(&line[..idx]);
                    return Some(finish_signature(&header, row));
                }
                _ => {}
            }
        }
        header.push(line);
    }

    None
}

fn finish_signature(header: &[&str], end_row: usize) -> Signature {
    Signature {
        text: header.join("\n").trim_end().to_string(),
        end_row,
    }
}

/// Remove a trailing `{` (and the whitespace before it) from a declaration line.
pub(crate) fn strip_open_brace(line: &str) -> &str {
    let trimmed = line.trim_end();
    trimmed.strip_suffix('{').unwrap_or(trimmed).trim_end()
}
