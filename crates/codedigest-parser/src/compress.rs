use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::QueryCursor;

use crate::capture::Capture;
use crate::chunks::{join_chunks, post_process};
use crate::context::{ParseConfig, ParseContext};
use crate::error::{ParseError, Result};
use crate::language::Language;
use crate::registry::{GrammarLoader, LanguageRegistry, LanguageResources};

/// Result of compressing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "digest", rename_all = "snake_case")]
pub enum ParseOutcome {
    Digest(String),
    /// No grammar is registered for the file's extension.
    Unsupported,
}

impl ParseOutcome {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParseOutcome::Unsupported)
    }

    pub fn into_digest(self) -> Option<String> {
        match self {
            ParseOutcome::Digest(text) => Some(text),
            ParseOutcome::Unsupported => None,
        }
    }
}

/// Reduce `content` to its declarations, signatures, imports and comments.
///
/// The language comes from `path`'s extension only; content is never sniffed.
pub fn compress<L: GrammarLoader>(
    registry: &mut LanguageRegistry<L>,
    content: &str,
    path: impl AsRef<Path>,
    config: &ParseConfig,
) -> Result<ParseOutcome> {
    let path = path.as_ref();
    let Some(language) = Language::from_path(path) else {
        return Ok(ParseOutcome::Unsupported);
    };

    let LanguageResources {
        parser,
        query,
        labels,
        strategy,
        ..
    } = registry.resources(language)?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ParseError::TreeBuild {
            path: path.display().to_string(),
        })?;
    let lines: Vec<&str> = content.lines().collect();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.captures(query, tree.root_node(), content.as_bytes());
    let mut captures: Vec<Capture<'_, '_>> = Vec::new();
    while let Some((query_match, index)) = matches.next() {
        let capture = query_match.captures[*index];
        let Some(label) = labels.get(capture.index as usize) else {
            continue;
        };
        if label.is_helper() {
            continue;
        }
        captures.push(Capture {
            node: capture.node,
            label,
        });
    }
    // Stable: captures on the same row keep query emission order.
    captures.sort_by_key(|capture| capture.start_row());

    let context = ParseContext {
        raw_text: content,
        lines: &lines,
        tree: &tree,
        query,
        config,
    };

    let mut dedup = HashSet::new();
    let mut chunks = Vec::new();
    for capture in &captures {
        if let Some(mut chunk) = strategy.parse_capture(capture, &lines, &mut dedup, &context) {
            let trimmed = chunk.content.trim();
            if trimmed.is_empty() {
                continue;
            }
            chunk.content = trimmed.to_string();
            chunks.push(chunk);
        }
    }

    let raw_chunks = chunks.len();
    let processed = post_process(chunks);
    debug!(
        "Compressed {} as {} with the {} strategy ({} captures, {} chunks, {} after merge)",
        path.display(),
        language,
        strategy.name(),
        captures.len(),
        raw_chunks,
        processed.len()
    );

    Ok(ParseOutcome::Digest(join_chunks(&processed)))
}
