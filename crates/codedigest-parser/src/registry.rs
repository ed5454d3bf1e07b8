//! Per-worker cache of parsers and compiled queries.
//!
//! Preparing a language (grammar + query compilation) costs far more than
//! parsing a typical file, so a registry is built once per worker and kept for
//! the worker's lifetime.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};
use tree_sitter::{Parser, Query};

use crate::capture::CaptureLabel;
use crate::error::LanguageLoadError;
use crate::language::Language;
use crate::queries;
use crate::strategy::Strategy;

/// Raw artifacts needed to prepare a language.
pub struct Grammar {
    pub language: tree_sitter::Language,
    pub query_source: Cow<'static, str>,
}

/// Source of grammars and query text for a registry.
pub trait GrammarLoader {
    fn load(&self, language: Language) -> Result<Grammar, LanguageLoadError>;
}

/// Statically linked grammars with the embedded Query Catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGrammars;

impl GrammarLoader for BuiltinGrammars {
    fn load(&self, language: Language) -> Result<Grammar, LanguageLoadError> {
        Ok(Grammar {
            language: language.grammar(),
            query_source: Cow::Borrowed(queries::query_source(language)),
        })
    }
}

/// Everything needed to compress files of one language.
pub struct LanguageResources {
    pub language: Language,
    pub parser: Parser,
    pub query: Query,
    /// Parsed labels, indexed like `query.capture_names()`.
    pub labels: Vec<CaptureLabel>,
    pub strategy: Strategy,
}

pub struct LanguageRegistry<L = BuiltinGrammars> {
    loader: L,
    resources: HashMap<Language, LanguageResources>,
    initialized: bool,
}

impl LanguageRegistry<BuiltinGrammars> {
    pub fn new() -> Self {
        Self::with_loader(BuiltinGrammars)
    }
}

impl Default for LanguageRegistry<BuiltinGrammars> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: GrammarLoader> LanguageRegistry<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            resources: HashMap::new(),
            initialized: false,
        }
    }

    /// One-time runtime bootstrap. Safe to call any number of times.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        debug!(
            "tree-sitter runtime ready (grammar ABI {}..={})",
            tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION,
            tree_sitter::LANGUAGE_VERSION
        );
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load and compile a language once. Failures are not remembered, so a
    /// later call tries again.
    pub fn prepare(&mut self, language: Language) -> Result<(), LanguageLoadError> {
        self.init();
        if self.resources.contains_key(&language) {
            return Ok(());
        }

        let grammar = self.loader.load(language)?;

        let mut parser = Parser::new();
        parser
            .set_language(&grammar.language)
            .map_err(|e| LanguageLoadError::new(language, e.to_string()))?;

        let query = Query::new(&grammar.language, &grammar.query_source)
            .map_err(|e| LanguageLoadError::new(language, format!("invalid query: {e}")))?;

        let labels = query
            .capture_names()
            .iter()
            .map(|name| CaptureLabel::parse(name))
            .collect();

        debug!(
            "Prepared {} ({} patterns, {} capture labels)",
            language,
            query.pattern_count(),
            query.capture_names().len()
        );

        self.resources.insert(
            language,
            LanguageResources {
                language,
                parser,
                query,
                labels,
                strategy: Strategy::for_language(language),
            },
        );
        Ok(())
    }

    pub fn resources(
        &mut self,
        language: Language,
    ) -> Result<&mut LanguageResources, LanguageLoadError> {
        self.prepare(language)?;
        self.resources
            .get_mut(&language)
            .ok_or_else(|| LanguageLoadError::new(language, "resources missing after prepare"))
    }

    pub fn parser(&mut self, language: Language) -> Result<&mut Parser, LanguageLoadError> {
        Ok(&mut self.resources(language)?.parser)
    }

    pub fn query(&mut self, language: Language) -> Result<&Query, LanguageLoadError> {
        Ok(&self.resources(language)?.query)
    }

    pub fn strategy(&mut self, language: Language) -> Result<Strategy, LanguageLoadError> {
        Ok(self.resources(language)?.strategy)
    }

    pub fn is_prepared(&self, language: Language) -> bool {
        self.resources.contains_key(&language)
    }

    pub fn prepared_count(&self) -> usize {
        self.resources.len()
    }

    /// Drop every cached parser and query. The registry stays usable and will
    /// prepare languages again on demand.
    pub fn dispose(&mut self) {
        if self.resources.is_empty() {
            return;
        }
        trace!("Disposing {} prepared languages", self.resources.len());
        self.resources.clear();
    }
}
