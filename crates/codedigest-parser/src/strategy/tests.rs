use super::*;
use crate::chunks::CHUNK_SEPARATOR;
use crate::compress::compress;
use crate::context::ParseConfig;
use crate::registry::LanguageRegistry;

fn digest(path: &str, source: &str) -> String {
    let mut registry = LanguageRegistry::new();
    compress(&mut registry, source, path, &ParseConfig::default())
        .unwrap()
        .into_digest()
        .unwrap()
}

// ============================================
// Strategy selection
// ============================================

#[test]
fn test_strategy_for_language() {
    assert_eq!(Strategy::for_language(Language::TypeScript), Strategy::CLike);
    assert_eq!(Strategy::for_language(Language::CSharp), Strategy::CLike);
    assert_eq!(Strategy::for_language(Language::Python), Strategy::Python);
    assert_eq!(Strategy::for_language(Language::Go), Strategy::Go);
    assert_eq!(Strategy::for_language(Language::Css), Strategy::Css);
    assert_eq!(Strategy::for_language(Language::Vue), Strategy::Markup);
    assert_eq!(Strategy::for_language(Language::Rust), Strategy::Default);
    assert_eq!(Strategy::for_language(Language::Php), Strategy::Default);
}

// ============================================
// Text helpers
// ============================================

#[test]
fn test_function_signature_multiline_parameters() {
    let lines = ["function f(", "  a,", "  b", ") {", "  body", "}"];
    let signature = function_signature(&lines, 0, 5).unwrap();
    assert_eq!(signature.text, "function f(\n  a,\n  b\n)");
    assert_eq!(signature.end_row, 3);
}

#[test]
fn test_function_signature_terminators() {
    let arrow = function_signature(&["const f = (x) => x + 1;"], 0, 0).unwrap();
    assert_eq!(arrow.text, "const f = (x)");

    let abstract_method = function_signature(&["abstract run(): void;"], 0, 0).unwrap();
    assert_eq!(abstract_method.text, "abstract run(): void");
}

#[test]
fn test_function_signature_tracks_paren_depth() {
    let nested = function_signature(&["function f(a = g(1)) {"], 0, 0).unwrap();
    assert_eq!(nested.text, "function f(a = g(1))");

    // A brace inside the parameter list is a destructuring pattern, not the body.
    let destructured = function_signature(&["function f({ a }) {"], 0, 0).unwrap();
    assert_eq!(destructured.text, "function f({ a })");
}

#[test]
fn test_function_signature_without_terminator() {
    assert!(function_signature(&["def f(x):"], 0, 0).is_none());
    assert!(function_signature(&["foo(", "x"], 0, 1).is_none());
    assert!(function_signature(&["a() {"], 3, 5).is_none());
}

#[test]
fn test_rows_text_clamps_to_file() {
    let lines = ["a", "b", "c"];
    assert_eq!(rows_text(&lines, 1, 10).as_deref(), Some("b\nc"));
    assert_eq!(rows_text(&lines, 2, 0).as_deref(), Some("c"));
    assert!(rows_text(&lines, 3, 4).is_none());
}

#[test]
fn test_emit_skips_repeated_and_blank_text() {
    let mut dedup = HashSet::new();
    assert!(emit(&mut dedup, "fn a()".into(), 0, 0).is_some());
    assert!(emit(&mut dedup, "  fn a()  ".into(), 4, 4).is_none());
    assert!(emit(&mut dedup, "   ".into(), 5, 5).is_none());
}

#[test]
fn test_strip_open_brace() {
    assert_eq!(strip_open_brace("class A {"), "class A");
    assert_eq!(strip_open_brace("class A{  "), "class A");
    assert_eq!(strip_open_brace("class A"), "class A");
}

// ============================================
// C-like family
// ============================================

#[test]
fn test_typescript_signature_drops_body() {
    let source = "/** doc */\nexport function add(a: number, b: number): number {\n  return a + b;\n}\n";
    let text = digest("math.ts", source);

    assert!(text.contains("/** doc */"));
    assert!(text.contains("export function add(a: number, b: number): number"));
    assert!(!text.contains("return a + b;"));
    assert_eq!(
        text,
        "/** doc */\nexport function add(a: number, b: number): number"
    );
}

#[test]
fn test_typescript_class_members() {
    let source = r#"export class Greeter extends Base {
  private name: string;

  constructor(name: string) {
    super();
    this.name = name;
  }

  greet(): string {
    return `hi ${this.name}`;
  }
}
"#;
    let text = digest("greeter.ts", source);
    assert_eq!(
        text,
        "export class Greeter extends Base\nprivate name: string;\n⋮----\nconstructor(name: string)\n⋮----\ngreet(): string"
    );
}

#[test]
fn test_typescript_interface_and_type_alias() {
    let source = "interface Shape {\n  area(): number;\n}\n\ntype Id = string | number;\n";
    let text = digest("shape.ts", source);

    assert!(text.contains("interface Shape"));
    assert!(!text.contains("interface Shape {"));
    assert!(text.contains("area(): number"));
    assert!(text.contains("type Id = string | number;"));
}

#[test]
fn test_comment_inside_enum_is_not_repeated() {
    let source = "export enum Color {\n  // primary red\n  Red,\n  Green,\n}\n";
    let text = digest("color.ts", source);

    assert_eq!(text.matches("// primary red").count(), 1);
    assert!(text.contains("enum Color {\n  // primary red\n  Red,\n  Green,\n}"));
    assert!(!text.contains(CHUNK_SEPARATOR));
}

#[test]
fn test_arrow_function_constant() {
    let source = "export const add = (a, b) => {\n  return a + b;\n};\n";
    let text = digest("add.ts", source);
    assert_eq!(text, "export const add = (a, b)");
}

#[test]
fn test_same_method_name_in_two_classes_is_kept() {
    let source = "class A {\n  constructor(a) {}\n}\nclass B {\n  constructor(b) {}\n}\n";
    let text = digest("ab.js", source);
    assert_eq!(
        text,
        "class A\nconstructor(a)\n⋮----\nclass B\nconstructor(b)"
    );
}

#[test]
fn test_commonjs_require_is_kept() {
    let source = "const fs = require('fs');\nconst x = compute();\n";
    let text = digest("index.cjs", source);
    assert_eq!(text, "const fs = require('fs');");
}

#[test]
fn test_java_class_with_implements_continuation() {
    let source = r#"package demo;

import java.util.List;

/** Greets people. */
public class Greeter
    implements Runnable {
  private final String name;

  public Greeter(String name) {
    this.name = name;
  }

  public void run() {
    System.out.println(name);
  }
}
"#;
    let text = digest("Greeter.java", source);

    assert!(text.contains("package demo;"));
    assert!(text.contains("import java.util.List;"));
    assert!(text.contains("/** Greets people. */"));
    assert!(text.contains("public class Greeter\n    implements Runnable"));
    assert!(text.contains("private final String name;"));
    assert!(text.contains("public Greeter(String name)"));
    assert!(text.contains("public void run()"));
    assert!(!text.contains("this.name = name;"));
    assert!(!text.contains("System.out.println"));
}

// ============================================
// Python
// ============================================

#[test]
fn test_python_decorator_and_signature() {
    let text = digest("f.py", "@decorator\ndef f(x: int) -> int:\n    return x");
    assert_eq!(text, "@decorator\ndef f(x: int) -> int:");
}

#[test]
fn test_python_multiline_header_and_docstrings() {
    let source = r#""""Module doc."""
import os


class Service:
    """Does things."""

    @staticmethod
    def build(
        name: str,
    ) -> "Service":
        return Service()
"#;
    let text = digest("service.py", source);
    assert_eq!(
        text,
        "\"\"\"Module doc.\"\"\"\nimport os\n⋮----\nclass Service:\n\"\"\"Does things.\"\"\"\n⋮----\n@staticmethod\n    def build(\n        name: str,\n    ) -> \"Service\":"
    );
}

#[test]
fn test_python_type_alias() {
    let source = "from typing import TypeAlias\n\nVector: TypeAlias = list[float]\ncount: int = 0\n";
    let text = digest("types.py", source);
    assert!(text.contains("Vector: TypeAlias = list[float]"));
    assert!(!text.contains("count: int = 0"));
}

#[test]
fn test_python_header_with_trailing_comment_stops_before_body() {
    let source = "def f(x):  # noqa: E501\n    for i in x:\n        secret_body(i)\n";
    let text = digest("loop.py", source);
    assert_eq!(text, "def f(x):  # noqa: E501");
}

#[test]
fn test_python_class_header_with_trailing_comment() {
    let source = "class Job(Base):  # pragma: no cover\n    if True:\n        x = 1\n";
    let text = digest("job.py", source);
    assert_eq!(text, "class Job(Base):  # pragma: no cover");
}

#[test]
fn test_python_type_statement() {
    let text = digest("vec.py", "type Vector = list[float]\n\ndef norm(v):\n    return 0\n");
    assert_eq!(text, "type Vector = list[float]\n⋮----\ndef norm(v):");
}

// ============================================
// Go
// ============================================

#[test]
fn test_go_package_imports_types_and_signatures() {
    let source = "package main

import (
\t\"fmt\"
\t\"os\"
)

// Config holds settings.
type Config struct {
\tName string
}

func (c *Config) Load(path string) error {
\treturn nil
}

func main() {
\tfmt.Println(os.Args)
}
";
    let text = digest("main.go", source);
    assert_eq!(
        text,
        "package main\n⋮----\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n⋮----\n// Config holds settings.\ntype Config struct {\n\tName string\n}\n⋮----\nfunc (c *Config) Load(path string) error\n⋮----\nfunc main()"
    );
}

#[test]
fn test_go_comment_inside_struct_is_not_repeated() {
    let source = "package main\n\ntype Config struct {\n\t// Name is the name.\n\tName string\n}\n";
    let text = digest("config.go", source);
    assert_eq!(
        text,
        "package main\n⋮----\ntype Config struct {\n\t// Name is the name.\n\tName string\n}"
    );
}

// ============================================
// CSS
// ============================================

#[test]
fn test_css_selectors_and_at_rules() {
    let source = r#"@import url("base.css");

/* Buttons */
.btn,
.link {
  color: red;
}

@media (max-width: 600px) {
  .btn {
    color: blue;
  }
}
"#;
    let text = digest("site.css", source);

    assert!(text.contains("@import url(\"base.css\");"));
    assert!(text.contains("/* Buttons */\n.btn,"));
    assert!(text.contains("@media (max-width: 600px)"));
    assert!(!text.contains("color"));
}

// ============================================
// Markup
// ============================================

#[test]
fn test_vue_blocks_kept_whole() {
    let source = r#"<template>
  <!-- inside -->
  <div>{{ msg }}</div>
</template>

<!-- outside -->
<script>
export default { data() { return { msg: "hi" } } }
</script>

<style scoped>
.a { color: red; }
</style>
"#;
    let text = digest("App.vue", source);
    assert_eq!(
        text,
        "<template>\n  <!-- inside -->\n  <div>{{ msg }}</div>\n</template>\n⋮----\n<!-- outside -->\n<script>\nexport default { data() { return { msg: \"hi\" } } }\n</script>\n⋮----\n<style scoped>\n.a { color: red; }\n</style>"
    );
    // The comment inside the template appears once, as part of the template.
    assert_eq!(text.matches("<!-- inside -->").count(), 1);
}

#[test]
fn test_html_drops_plain_elements() {
    let source = "<div>\n  <p>hello</p>\n</div>\n<!-- note -->\n";
    let text = digest("index.html", source);
    assert_eq!(text, "<!-- note -->");
}

// ============================================
// Default family
// ============================================

#[test]
fn test_rust_names_comments_and_imports() {
    let source = r#"use std::fmt;

/// A point.
pub struct Point {
    x: i32,
}

impl Point {
    pub fn new(x: i32) -> Self {
        Self { x }
    }
}
"#;
    let text = digest("point.rs", source);

    assert!(text.contains("use std::fmt;"));
    assert!(text.contains("/// A point."));
    assert!(text.contains("pub struct Point {"));
    assert!(text.contains("impl Point {"));
    assert!(text.contains("pub fn new(x: i32) -> Self {"));
    assert!(!text.contains("Self { x }"));
    assert!(!text.contains("x: i32,"));
}

#[test]
fn test_c_include_and_function_name_line() {
    let source = "#include <stdio.h>\n\nint add(int a, int b) {\n  return a + b;\n}\n";
    let text = digest("add.c", source);
    assert!(text.contains("#include <stdio.h>"));
    assert!(text.contains("int add(int a, int b) {"));
    assert!(!text.contains("return a + b;"));
}
