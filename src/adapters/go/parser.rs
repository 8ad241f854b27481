//! Tree-sitter based extraction of top-level Go declarations.

use crate::domain::error::LoadError;
use crate::domain::package::{DeclKind, Declaration};
use std::path::Path;

/// Declarations and package clause of one parsed Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub package_name: String,
    pub declarations: Vec<Declaration>,
}

/// Tree-sitter parser configured for Go.
pub struct GoParser {
    inner: tree_sitter::Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, LoadError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| LoadError::ParserInit(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses `content`, failing on any syntax error.
    pub fn parse(&mut self, path: &Path, content: &[u8]) -> Result<ParsedFile, LoadError> {
        let tree = self
            .inner
            .parse(content, None)
            .ok_or_else(|| LoadError::ParserInit("parsing was cancelled".to_string()))?;
        let root = tree.root_node();

        if let Some(error) = first_error_node(root) {
            return Err(LoadError::Syntax {
                path: path.to_path_buf(),
                line: error.start_position().row + 1,
            });
        }

        let mut package_name = None;
        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    package_name = package_identifier(node, content);
                }
                "function_declaration" => {
                    if let Some(decl) = function_declaration(node, content) {
                        declarations.push(decl);
                    }
                }
                "method_declaration" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        declarations.push(Declaration {
                            kind: DeclKind::Method,
                            name: text(name, content),
                            start: node.start_byte(),
                            end: node.end_byte(),
                            name_offset: name.start_byte(),
                        });
                    }
                }
                "type_declaration" => collect_specs(
                    node,
                    content,
                    &["type_spec", "type_alias"],
                    DeclKind::Type,
                    &mut declarations,
                ),
                "var_declaration" => {
                    collect_specs(node, content, &["var_spec"], DeclKind::Variable, &mut declarations)
                }
                "const_declaration" => collect_specs(
                    node,
                    content,
                    &["const_spec"],
                    DeclKind::Constant,
                    &mut declarations,
                ),
                _ => {}
            }
        }

        let package_name = package_name.ok_or_else(|| LoadError::MissingPackageClause {
            path: path.to_path_buf(),
        })?;
        Ok(ParsedFile {
            package_name,
            declarations,
        })
    }
}

fn text(node: tree_sitter::Node<'_>, content: &[u8]) -> String {
    String::from_utf8_lossy(&content[node.byte_range()]).into_owned()
}

fn package_identifier(clause: tree_sitter::Node<'_>, content: &[u8]) -> Option<String> {
    let mut cursor = clause.walk();
    let name = clause
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")
        .map(|child| text(child, content));
    name
}

/// `init` and `_` are never bound in package scope, so they are not reported.
fn function_declaration(node: tree_sitter::Node<'_>, content: &[u8]) -> Option<Declaration> {
    let name_node = node.child_by_field_name("name")?;
    let name = text(name_node, content);
    if name == "init" || name == "_" {
        return None;
    }
    Some(Declaration {
        kind: DeclKind::Function,
        name,
        start: node.start_byte(),
        end: node.end_byte(),
        name_offset: name_node.start_byte(),
    })
}

/// Emits one declaration per name of every matching spec below `node`, so grouped
/// `var (...)` / `const (...)` / `type (...)` blocks yield each name.
fn collect_specs(
    node: tree_sitter::Node<'_>,
    content: &[u8],
    spec_kinds: &[&str],
    kind: DeclKind,
    out: &mut Vec<Declaration>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if spec_kinds.contains(&child.kind()) {
            let mut names = child.walk();
            for name in child
                .children_by_field_name("name", &mut names)
                .filter(|n| n.is_named())
            {
                out.push(Declaration {
                    kind,
                    name: text(name, content),
                    start: child.start_byte(),
                    end: child.end_byte(),
                    name_offset: name.start_byte(),
                });
            }
        } else {
            // Grammar versions differ on whether specs sit in a `*_spec_list` wrapper.
            collect_specs(child, content, spec_kinds, kind, out);
        }
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error_node(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> ParsedFile {
        let mut parser = GoParser::new().expect("parser init");
        parser.parse(Path::new("test.go"), src.as_bytes()).expect("parse")
    }

    fn find<'a>(parsed: &'a ParsedFile, name: &str) -> &'a Declaration {
        parsed
            .declarations
            .iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("declaration {name} not found"))
    }

    #[test]
    fn test_function_span_covers_keyword_to_closing_brace() {
        let src = "package p\n\n// Foo does things.\nfunc Foo() {\n\n\tx := 1\n\t_ = x\n}\n";
        let parsed = parse(src);
        assert_eq!(parsed.package_name, "p");

        let foo = find(&parsed, "Foo");
        assert_eq!(foo.kind, DeclKind::Function);
        assert_eq!(&src[foo.start..foo.end], "func Foo() {\n\n\tx := 1\n\t_ = x\n}");
        assert_eq!(&src[foo.name_offset..foo.name_offset + 3], "Foo");
    }

    #[test]
    fn test_declaration_kinds() {
        let src = "package p\n\
                   \n\
                   import \"fmt\"\n\
                   \n\
                   type T struct{}\n\
                   \n\
                   type (\n\tA = int\n\tB string\n)\n\
                   \n\
                   var v, w = 1, 2\n\
                   \n\
                   const (\n\tc = 1\n\td = 2\n)\n\
                   \n\
                   func (t T) M() { fmt.Println() }\n\
                   \n\
                   func F() {}\n";
        let parsed = parse(src);

        let kinds: Vec<_> = parsed
            .declarations
            .iter()
            .map(|d| (d.name.as_str(), d.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("T", DeclKind::Type),
                ("A", DeclKind::Type),
                ("B", DeclKind::Type),
                ("v", DeclKind::Variable),
                ("w", DeclKind::Variable),
                ("c", DeclKind::Constant),
                ("d", DeclKind::Constant),
                ("M", DeclKind::Method),
                ("F", DeclKind::Function),
            ]
        );
    }

    #[test]
    fn test_init_and_blank_functions_are_not_declared() {
        let parsed = parse("package p\n\nfunc init() {}\n\nfunc _() {}\n\nfunc Run() {}\n");
        let names: Vec<_> = parsed.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Run"]);
    }

    #[test]
    fn test_generic_function() {
        let src = "package p\n\nfunc Map[T any](xs []T) []T {\n\treturn xs\n}\n";
        let parsed = parse(src);
        let map = find(&parsed, "Map");
        assert_eq!(map.kind, DeclKind::Function);
        assert!(src[map.start..map.end].ends_with('}'));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let mut parser = GoParser::new().unwrap();
        let err = parser
            .parse(Path::new("bad.go"), b"package p\n\nfunc Broken( {\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Syntax { .. }));
    }

    #[test]
    fn test_missing_package_clause() {
        let mut parser = GoParser::new().unwrap();
        let err = parser.parse(Path::new("x.go"), b"").unwrap_err();
        assert!(matches!(err, LoadError::MissingPackageClause { .. }));
    }
}
