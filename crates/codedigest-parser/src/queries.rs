//! Query Catalog.
//!
//! One tree-sitter query per language, embedded at compile time. Capture labels
//! follow a closed vocabulary:
//! - `name.definition.<kind>` → identifier of a definition
//! - `definition.<kind>` → the whole definition node
//! - `comment`, `docstring`
//! - `import`, `require`
//!
//! Labels starting with `_` only feed predicates and never produce output.

use crate::language::Language;

const JAVASCRIPT: &str = include_str!("../queries/javascript.scm");
const TYPESCRIPT: &str = include_str!("../queries/typescript.scm");
const JAVA: &str = include_str!("../queries/java.scm");
const CSHARP: &str = include_str!("../queries/csharp.scm");
const PYTHON: &str = include_str!("../queries/python.scm");
const GO: &str = include_str!("../queries/go.scm");
const RUST: &str = include_str!("../queries/rust.scm");
const C: &str = include_str!("../queries/c.scm");
const CPP: &str = include_str!("../queries/cpp.scm");
const RUBY: &str = include_str!("../queries/ruby.scm");
const PHP: &str = include_str!("../queries/php.scm");
const CSS: &str = include_str!("../queries/css.scm");
const HTML: &str = include_str!("../queries/html.scm");

pub fn query_source(language: Language) -> &'static str {
    match language {
        Language::JavaScript => JAVASCRIPT,
        Language::TypeScript | Language::Tsx => TYPESCRIPT,
        Language::Java => JAVA,
        Language::CSharp => CSHARP,
        Language::Python => PYTHON,
        Language::Go => GO,
        Language::Rust => RUST,
        Language::C => C,
        Language::Cpp => CPP,
        Language::Ruby => RUBY,
        Language::Php => PHP,
        Language::Css => CSS,
        Language::Html | Language::Vue => HTML,
    }
}
