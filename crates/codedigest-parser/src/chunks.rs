use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Line that separates non-adjacent chunks in a digest.
pub const CHUNK_SEPARATOR: &str = "⋮----";

/// A span of source rows selected by a strategy, with the text kept for it.
///
/// Rows are zero-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedChunk {
    pub content: String,
    pub start_row: usize,
    pub end_row: usize,
}

impl CapturedChunk {
    pub fn new(content: impl Into<String>, start_row: usize, end_row: usize) -> Self {
        Self {
            content: content.into(),
            start_row,
            end_row: end_row.max(start_row),
        }
    }
}

/// Dedup by start row, sort, drop nested chunks, then merge strictly adjacent ones.
///
/// For chunks sharing a start row only the longest content survives; on equal
/// length the first one seen wins. A chunk starting on a row the previous chunk
/// already covers is dropped, so no two chunks share a row. Two chunks merge
/// only when `previous.end_row + 1 == current.start_row`.
pub fn post_process(chunks: Vec<CapturedChunk>) -> Vec<CapturedChunk> {
    let mut by_row: HashMap<usize, CapturedChunk> = HashMap::with_capacity(chunks.len());
    for chunk in chunks {
        match by_row.get(&chunk.start_row) {
            Some(kept) if kept.content.len() >= chunk.content.len() => {}
            _ => {
                by_row.insert(chunk.start_row, chunk);
            }
        }
    }

    let mut deduped: Vec<CapturedChunk> = by_row.into_values().collect();
    deduped.sort_by_key(|chunk| chunk.start_row);

    let mut merged: Vec<CapturedChunk> = Vec::with_capacity(deduped.len());
    for chunk in deduped {
        match merged.last_mut() {
            // Captures nest, so a chunk starting inside the previous one lies within it.
            Some(previous) if chunk.start_row <= previous.end_row => {}
            Some(previous) if previous.end_row + 1 == chunk.start_row => {
                previous.content.push('\n');
                previous.content.push_str(&chunk.content);
                previous.end_row = chunk.end_row;
            }
            _ => merged.push(chunk),
        }
    }

    merged
}

/// Render processed chunks as the final digest text.
pub fn join_chunks(chunks: &[CapturedChunk]) -> String {
    let separator = format!("\n{CHUNK_SEPARATOR}\n");
    chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<_>>()
        .join(&separator)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_longest_content_per_row() {
        let chunks = vec![
            CapturedChunk::new("fn a", 3, 3),
            CapturedChunk::new("pub fn a(x: i32)", 3, 3),
            CapturedChunk::new("fn", 3, 3),
        ];
        let processed = post_process(chunks);
        assert_eq!(processed, vec![CapturedChunk::new("pub fn a(x: i32)", 3, 3)]);
    }

    #[test]
    fn test_dedup_tie_keeps_first_seen() {
        let chunks = vec![
            CapturedChunk::new("aaa", 0, 0),
            CapturedChunk::new("bbb", 0, 0),
        ];
        let processed = post_process(chunks);
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].content, "aaa");
    }

    #[test]
    fn test_adjacent_chunks_merge() {
        let chunks = vec![
            CapturedChunk::new("second", 3, 5),
            CapturedChunk::new("first", 0, 2),
        ];
        let processed = post_process(chunks);
        assert_eq!(processed, vec![CapturedChunk::new("first\nsecond", 0, 5)]);
    }

    #[test]
    fn test_gap_keeps_chunks_apart_in_order() {
        let chunks = vec![
            CapturedChunk::new("later", 5, 7),
            CapturedChunk::new("earlier", 0, 2),
        ];
        let processed = post_process(chunks);
        assert_eq!(
            processed,
            vec![
                CapturedChunk::new("earlier", 0, 2),
                CapturedChunk::new("later", 5, 7),
            ]
        );
    }

    #[test]
    fn test_merge_chains_across_several_chunks() {
        let chunks = vec![
            CapturedChunk::new("a", 0, 0),
            CapturedChunk::new("b", 1, 1),
            CapturedChunk::new("c", 2, 4),
            CapturedChunk::new("d", 9, 9),
        ];
        let processed = post_process(chunks);
        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0], CapturedChunk::new("a\nb\nc", 0, 4));
        assert_eq!(processed[1], CapturedChunk::new("d", 9, 9));
    }

    #[test]
    fn test_chunk_inside_previous_is_dropped() {
        let chunks = vec![
            CapturedChunk::new("// inner", 1, 1),
            CapturedChunk::new("type T struct {\n// inner\nA int\n}", 0, 3),
            CapturedChunk::new("func f()", 5, 5),
        ];
        let processed = post_process(chunks);
        assert_eq!(
            processed,
            vec![
                CapturedChunk::new("type T struct {\n// inner\nA int\n}", 0, 3),
                CapturedChunk::new("func f()", 5, 5),
            ]
        );
    }

    #[test]
    fn test_processed_chunks_never_share_a_row() {
        let chunks = vec![
            CapturedChunk::new("outer", 2, 8),
            CapturedChunk::new("nested", 4, 5),
            CapturedChunk::new("nested tail", 8, 8),
            CapturedChunk::new("next", 9, 9),
            CapturedChunk::new("head", 0, 0),
        ];
        let processed = post_process(chunks);
        assert_eq!(
            processed,
            vec![
                CapturedChunk::new("head", 0, 0),
                CapturedChunk::new("outer\nnext", 2, 9),
            ]
        );
        for pair in processed.windows(2) {
            assert!(pair[0].end_row < pair[1].start_row);
        }
    }

    #[test]
    fn test_post_process_empty() {
        assert!(post_process(Vec::new()).is_empty());
    }

    #[test]
    fn test_join_chunks_uses_separator_line() {
        let chunks = vec![
            CapturedChunk::new("import x", 0, 0),
            CapturedChunk::new("fn main()", 4, 4),
        ];
        assert_eq!(join_chunks(&chunks), "import x\n⋮----\nfn main()");
        assert_eq!(join_chunks(&[]), "");
    }

    #[test]
    fn test_end_row_never_precedes_start_row() {
        let chunk = CapturedChunk::new("x", 4, 1);
        assert_eq!(chunk.end_row, 4);
    }
}
