//! Tree-sitter parsing wrapper for configuration modules.
//!
//! The generated configuration is JavaScript. The TypeScript grammar is a
//! superset of the syntax the generator emits and also accepts the odd type
//! annotation left behind by hand-written `docusaurus.config.ts` files.

use std::ops::Range;

use crate::error::ScriptError;
use crate::position::point_to_one_based;

/// Result of parsing a module.
///
/// Tree-sitter is error-tolerant, so a parse result may contain both a valid
/// tree and error nodes.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns whether the parse result contains any syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Collects all syntax errors found in the parse result.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }

    /// Returns the first syntax error as a [`ScriptError`], if any.
    #[must_use]
    pub fn first_error(&self) -> Option<ScriptError> {
        self.errors()
            .into_iter()
            .next()
            .map(|info| ScriptError::syntax(info.line, info.column, info.context))
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// A snippet of the problematic source text.
    pub context: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let context = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            source
                .get(byte_range.clone())
                .map(|s| {
                    if s.chars().count() > 40 {
                        let truncated: String = s.chars().take(37).collect();
                        format!("{truncated}...")
                    } else {
                        s.to_owned()
                    }
                })
                .unwrap_or_default()
        };
        let (line, column) = point_to_one_based(node.start_position());

        Self {
            byte_range,
            line,
            column,
            context,
        }
    }
}

/// Tree-sitter parser configured for configuration modules.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded.
    pub fn new() -> Result<Self, ScriptError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| ScriptError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses a module.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, ScriptError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| ScriptError::parse("parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("export default { title: 'Site' };")]
    #[case("module.exports = { i18n: { locales: ['en'] } };")]
    #[case("const config: Config = { title: 'x' }; export default config;")]
    fn parses_valid_modules(#[case] source: &str) {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse(source).expect("parse");
        assert!(!result.has_errors(), "unexpected errors: {:?}", result.errors());
    }

    #[test]
    fn reports_first_error_position() {
        let mut parser = Parser::new().expect("parser init");
        let result = parser
            .parse("export default {\n  title: 'x',\n  i18n: {\n};")
            .expect("parse");

        assert!(result.has_errors());
        match result.first_error() {
            Some(ScriptError::Syntax { line, column, .. }) => {
                assert!(line >= 1);
                assert!(column >= 1);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
