use std::collections::HashSet;

use tree_sitter::Node;

use super::{emit, function_signature, rows_text, strip_open_brace, verbatim, Signature};
use crate::capture::{node_end_row, Capture, CaptureKind, DefinitionKind};
use crate::chunks::CapturedChunk;
use crate::context::ParseContext;

/// Node kinds whose name qualifies the methods declared inside them.
const SCOPE_KINDS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "class",
    "interface_declaration",
    "struct_declaration",
    "record_declaration",
    "enum_declaration",
    "namespace_declaration",
    "internal_module",
];

/// JavaScript, TypeScript, Java and C#.
pub(super) fn parse_capture(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
    context: &ParseContext<'_>,
) -> Option<CapturedChunk> {
    match capture.label.kind {
        CaptureKind::Comment | CaptureKind::Import | CaptureKind::Require => {
            verbatim(capture, lines, dedup)
        }
        CaptureKind::Definition(kind) => match kind {
            DefinitionKind::Function | DefinitionKind::Method => {
                callable(capture, lines, dedup, context.raw_text)
            }
            DefinitionKind::Class => declaration_head(capture, lines, dedup, true),
            DefinitionKind::Interface
            | DefinitionKind::Module
            | DefinitionKind::Struct
            | DefinitionKind::Trait => declaration_head(capture, lines, dedup, false),
            DefinitionKind::Enum | DefinitionKind::Type | DefinitionKind::TypeAlias => {
                whole_definition(capture, lines, dedup)
            }
            DefinitionKind::Property | DefinitionKind::Import => verbatim(capture, lines, dedup),
            _ => None,
        },
        _ => None,
    }
}

fn callable(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
    source: &str,
) -> Option<CapturedChunk> {
    let definition = capture.definition_node();
    let start = capture.start_row();
    let last = node_end_row(definition);

    let signature = function_signature(lines, start, last).or_else(|| {
        // No body opener inside the definition: it is a bare signature.
        let end = last.min(lines.len() - 1).max(start);
        rows_text(lines, start, end).map(|text| Signature {
            text: text.trim_end().to_string(),
            end_row: end,
        })
    })?;

    if let Some(name) = function_name(capture, definition, source) {
        let key = format!("func:{}{}", scope_prefix(definition, source), name);
        if !dedup.insert(key) {
            return None;
        }
    }

    emit(dedup, signature.text, start, signature.end_row)
}

/// Declaration line with a trailing `{` removed. Classes also take the next line
/// when it carries the `extends` / `implements` clause.
fn declaration_head(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
    is_class: bool,
) -> Option<CapturedChunk> {
    let start = capture.start_row();
    let first = lines.get(start)?;
    let mut text = strip_open_brace(first).to_string();
    let mut end = start;

    let continues = !first.trim_end().ends_with('{');
    if is_class && continues && node_end_row(capture.definition_node()) > start {
        if let Some(next) = lines.get(start + 1) {
            if next.contains("extends") || next.contains("implements") {
                text.push('\n');
                text.push_str(strip_open_brace(next));
                end = start + 1;
            }
        }
    }

    emit(dedup, text, start, end)
}

/// Enum members and type alias bodies are declarations themselves.
fn whole_definition(
    capture: &Capture<'_, '_>,
    lines: &[&str],
    dedup: &mut HashSet<String>,
) -> Option<CapturedChunk> {
    let start = capture.start_row();
    let end = node_end_row(capture.definition_node()).min(lines.len() - 1);
    emit(dedup, rows_text(lines, start, end)?, start, end)
}

fn function_name(capture: &Capture<'_, '_>, definition: Node<'_>, source: &str) -> Option<String> {
    if capture.label.is_name {
        return non_empty(capture.text(source));
    }

    if let Some(name) = definition.child_by_field_name("name") {
        return non_empty(node_text(name, source));
    }

    // `const f = () => ...` is captured as the whole declaration.
    let mut cursor = definition.walk();
    let declarator = definition
        .named_children(&mut cursor)
        .find(|child| child.kind() == "variable_declarator")?;
    let name = declarator.child_by_field_name("name")?;
    non_empty(node_text(name, source))
}

/// `Outer.Inner.` for a definition nested in named classes or namespaces.
fn scope_prefix(definition: Node<'_>, source: &str) -> String {
    let mut scopes = Vec::new();
    let mut current = definition.parent();
    while let Some(node) = current {
        if SCOPE_KINDS.contains(&node.kind()) {
            if let Some(name) = node.child_by_field_name("name") {
                scopes.push(node_text(name, source));
            }
        }
        current = node.parent();
    }

    scopes
        .iter()
        .rev()
        .map(|scope| format!("{scope}."))
        .collect()
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
