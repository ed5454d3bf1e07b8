//! Structured capture labels.
//!
//! Query labels are dot-delimited tags such as `name.definition.function`. They
//! are parsed once per compiled query so strategies match on variants instead of
//! substrings.

use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Function,
    Method,
    Class,
    Interface,
    Struct,
    Union,
    Enum,
    Trait,
    Impl,
    Module,
    Type,
    TypeAlias,
    Constant,
    Variable,
    Property,
    Macro,
    Package,
    Import,
    Selector,
    AtRule,
    Script,
    Style,
    Template,
    Other,
}

impl DefinitionKind {
    fn parse(tag: &str) -> Self {
        match tag {
            "function" => Self::Function,
            "method" => Self::Method,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "struct" => Self::Struct,
            "union" => Self::Union,
            "enum" => Self::Enum,
            "trait" => Self::Trait,
            "impl" => Self::Impl,
            "module" => Self::Module,
            "type" => Self::Type,
            "type_alias" => Self::TypeAlias,
            "constant" | "const" => Self::Constant,
            "variable" | "var" => Self::Variable,
            "property" => Self::Property,
            "macro" => Self::Macro,
            "package" => Self::Package,
            "import" => Self::Import,
            "selector" => Self::Selector,
            "at_rule" => Self::AtRule,
            "script" => Self::Script,
            "style" => Self::Style,
            "template" => Self::Template,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    Definition(DefinitionKind),
    Comment,
    Docstring,
    Import,
    Require,
    /// `_`-prefixed captures that only feed query predicates.
    Helper,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureLabel {
    /// The capture is the identifier of a definition (`name.` prefix).
    pub is_name: bool,
    pub kind: CaptureKind,
    raw: String,
}

impl CaptureLabel {
    pub fn parse(label: &str) -> Self {
        if label.starts_with('_') {
            return Self {
                is_name: false,
                kind: CaptureKind::Helper,
                raw: label.to_string(),
            };
        }

        let mut parts = label.split('.').peekable();
        let is_name = parts.next_if_eq(&"name").is_some();
        let kind = match parts.next() {
            Some("definition") => CaptureKind::Definition(
                parts
                    .next()
                    .map_or(DefinitionKind::Other, DefinitionKind::parse),
            ),
            Some("comment") => CaptureKind::Comment,
            Some("docstring") => CaptureKind::Docstring,
            Some("import") => CaptureKind::Import,
            Some("require") => CaptureKind::Require,
            _ => CaptureKind::Unknown,
        };

        Self {
            is_name,
            kind,
            raw: label.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn definition(&self) -> Option<DefinitionKind> {
        match self.kind {
            CaptureKind::Definition(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self.kind, CaptureKind::Import | CaptureKind::Require)
            || self.definition() == Some(DefinitionKind::Import)
    }

    pub fn is_comment(&self) -> bool {
        self.kind == CaptureKind::Comment
    }

    pub fn is_helper(&self) -> bool {
        self.kind == CaptureKind::Helper
    }
}

/// One query capture: a syntax node and its parsed label.
#[derive(Debug, Clone, Copy)]
pub struct Capture<'tree, 'label> {
    pub node: Node<'tree>,
    pub label: &'label CaptureLabel,
}

impl<'tree> Capture<'tree, '_> {
    pub fn start_row(&self) -> usize {
        self.node.start_position().row
    }

    /// Last row holding text of the node. A node ending at column zero (a
    /// comment token that swallowed its newline) ends on the previous row.
    pub fn end_row(&self) -> usize {
        node_end_row(self.node)
    }

    /// Node that delimits the definition: the parent for `name.` captures.
    pub fn definition_node(&self) -> Node<'tree> {
        if self.label.is_name {
            self.node.parent().unwrap_or(self.node)
        } else {
            self.node
        }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.node.byte_range()).unwrap_or("")
    }
}

pub(crate) fn node_end_row(node: Node<'_>) -> usize {
    let start = node.start_position().row;
    let end = node.end_position();
    if end.column == 0 && end.row > start {
        end.row - 1
    } else {
        end.row
    }
}
