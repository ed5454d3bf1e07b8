pub mod capture;
pub mod chunks;
pub mod compress;
pub mod context;
pub mod error;
pub mod language;
pub mod queries;
pub mod registry;
pub mod strategy;

pub use capture::{Capture, CaptureKind, CaptureLabel, DefinitionKind};
pub use chunks::{CHUNK_SEPARATOR, CapturedChunk, join_chunks, post_process};
pub use compress::{ParseOutcome, compress};
pub use context::{ParseConfig, ParseContext};
pub use error::{LanguageLoadError, ParseError};
pub use language::Language;
pub use registry::{BuiltinGrammars, Grammar, GrammarLoader, LanguageRegistry, LanguageResources};
pub use strategy::Strategy;
