//! Rewrites ES module default exports into CommonJS assignments.
//!
//! The evaluator only understands the CommonJS export surface, so
//! `export default <expr>;` becomes `module.exports = <expr>;` before
//! evaluation. The rewrite works on the syntax tree, so text inside strings
//! or comments that merely looks like an export is left untouched.

use std::borrow::Cow;

use crate::parser::ParseResult;

/// Replacement for the `export default` prefix.
pub const EXPORT_ASSIGNMENT: &str = "module.exports = ";

/// Rewrites the first top-level `export default <expression>` statement.
///
/// Default exports of declarations (`export default function ...`) and
/// modules without a default export are returned unchanged.
#[must_use]
pub fn rewrite_default_export(parsed: &ParseResult) -> Cow<'_, str> {
    let source = parsed.source();
    let root = parsed.root_node();
    let mut cursor = root.walk();
    let splice = root
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "export_statement")
        .find_map(|node| {
            let value = node.child_by_field_name("value")?;
            is_default_export(node).then(|| (node.start_byte(), value.start_byte()))
        });

    match splice {
        Some((start, value_start)) => {
            let (Some(head), Some(tail)) = (source.get(..start), source.get(value_start..)) else {
                return Cow::Borrowed(source);
            };
            tracing::debug!(offset = start, "rewriting default export");
            Cow::Owned(format!("{head}{EXPORT_ASSIGNMENT}{tail}"))
        }
        None => Cow::Borrowed(source),
    }
}

fn is_default_export(node: tree_sitter::Node<'_>) -> bool {
    let mut cursor = node.walk();
    let has_default = node
        .children(&mut cursor)
        .any(|child| child.kind() == "default");
    has_default
}
