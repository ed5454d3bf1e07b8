use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Tsx,
    Java,
    CSharp,
    Python,
    Go,
    Rust,
    C,
    Cpp,
    Ruby,
    Php,
    Css,
    Html,
    Vue,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "cjs" | "mjs" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            "java" => Some(Language::Java),
            "cs" => Some(Language::CSharp),
            "py" | "pyi" | "pyw" => Some(Language::Python),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Some(Language::Cpp),
            "rb" | "rake" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            "css" => Some(Language::Css),
            "html" | "htm" => Some(Language::Html),
            "vue" => Some(Language::Vue),
            _ => None,
        }
    }

    /// Guess the language of a file from its final extension only.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Python => "python",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Css => "css",
            Language::Html => "html",
            Language::Vue => "vue",
        }
    }

    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "cjs", "mjs"],
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::Java => &["java"],
            Language::CSharp => &["cs"],
            Language::Python => &["py", "pyi", "pyw"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hxx", "hh"],
            Language::Ruby => &["rb", "rake"],
            Language::Php => &["php"],
            Language::Css => &["css"],
            Language::Html => &["html", "htm"],
            Language::Vue => &["vue"],
        }
    }

    /// The statically linked tree-sitter grammar for this language.
    ///
    /// Vue single-file components are parsed with the HTML grammar; their
    /// `<template>`, `<script>` and `<style>` blocks are ordinary elements there.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Language::Css => tree_sitter_css::LANGUAGE.into(),
            Language::Html | Language::Vue => tree_sitter_html::LANGUAGE.into(),
        }
    }

    /// Extraction strategy for this language's family.
    pub fn strategy(&self) -> Strategy {
        Strategy::for_language(*self)
    }

    pub fn all() -> &'static [Language] {
        &[
            Language::JavaScript,
            Language::TypeScript,
            Language::Tsx,
            Language::Java,
            Language::CSharp,
            Language::Python,
            Language::Go,
            Language::Rust,
            Language::C,
            Language::Cpp,
            Language::Ruby,
            Language::Php,
            Language::Css,
            Language::Html,
            Language::Vue,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
