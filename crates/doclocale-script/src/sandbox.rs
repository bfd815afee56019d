//! Isolated evaluation of configuration modules.
//!
//! The sandbox walks the syntax tree of a CommonJS module and reduces it to a
//! literal object graph. Nothing is executed: the only globals are `module`,
//! `exports` and `console`, bindings live in a per-evaluation scope, and any
//! dynamic construct (calls, functions, operators) evaluates to `null`.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tree_sitter::Node;

use crate::console::{self, CONSOLE_GLOBAL, ConsoleMethod};
use crate::error::ScriptError;
use crate::literal::{decode_escape, display_value, is_truthy, number_value, parse_number};
use crate::parser::{ParseResult, Parser};
use crate::position::point_to_one_based;
use crate::rewrite::rewrite_default_export;

/// Maximum nesting depth of evaluated expressions.
pub const MAX_DEPTH: usize = 128;

const MODULE_GLOBAL: &str = "module";
const EXPORTS_GLOBAL: &str = "exports";

/// Evaluates a configuration module and returns its exported value.
///
/// A default export is first rewritten into a `module.exports` assignment.
///
/// # Errors
///
/// Returns [`ScriptError::Syntax`] for malformed modules,
/// [`ScriptError::UnknownIdentifier`] when an expression references an
/// unbound name, and [`ScriptError::MissingExport`] when the module never
/// assigns its export surface.
pub fn evaluate_module(source: &str) -> Result<Value, ScriptError> {
    let mut parser = Parser::new()?;
    let original = parser.parse(source)?;
    let rewritten = rewrite_default_export(&original);
    let parsed = parser.parse(&rewritten)?;
    evaluate_parsed(&parsed)
}

/// Evaluates an already parsed CommonJS module.
///
/// # Errors
///
/// See [`evaluate_module`].
pub fn evaluate_parsed(parsed: &ParseResult) -> Result<Value, ScriptError> {
    if let Some(error) = parsed.first_error() {
        return Err(error);
    }
    let mut sandbox = Sandbox::new(parsed.source());
    sandbox.run(parsed.root_node())?;
    sandbox.into_exports()
}

/// Where an assignment stores its value.
enum Target {
    ModuleExports,
    ExportProperty(String),
    Binding(String),
    Ignored,
}

struct Sandbox<'s> {
    source: &'s str,
    bindings: HashMap<String, Value>,
    exports: Value,
    exported: bool,
}

impl<'s> Sandbox<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            bindings: HashMap::new(),
            exports: Value::Object(Map::new()),
            exported: false,
        }
    }

    fn into_exports(self) -> Result<Value, ScriptError> {
        if self.exported {
            Ok(self.exports)
        } else {
            Err(ScriptError::MissingExport)
        }
    }

    fn run(&mut self, program: Node<'_>) -> Result<(), ScriptError> {
        let mut cursor = program.walk();
        for statement in program.named_children(&mut cursor) {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn statement(&mut self, node: Node<'_>) -> Result<(), ScriptError> {
        match node.kind() {
            "comment" | "empty_statement" | "hash_bang_line" => Ok(()),
            "expression_statement" => match first_named(node) {
                Some(expression) if expression.kind() == "string" => Ok(()),
                Some(expression) => self.evaluate(expression, 0).map(drop),
                None => Ok(()),
            },
            "lexical_declaration" | "variable_declaration" => self.declare(node),
            "import_statement" => self.bind_import(node),
            "export_statement" => match node.child_by_field_name("declaration") {
                Some(declaration) => self.statement(declaration),
                None => {
                    self.skip(node);
                    Ok(())
                }
            },
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let name = self.text(name)?.to_owned();
                    self.bindings.insert(name, Value::Null);
                }
                Ok(())
            }
            _ => {
                self.skip(node);
                Ok(())
            }
        }
    }

    fn declare(&mut self, node: Node<'_>) -> Result<(), ScriptError> {
        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "variable_declarator")
            .collect();
        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name.kind() != "identifier" {
                self.skip(name);
                continue;
            }
            let value = match declarator.child_by_field_name("value") {
                Some(initialiser) => self.evaluate(initialiser, 0)?,
                None => Value::Null,
            };
            let name = self.text(name)?.to_owned();
            self.bindings.insert(name, value);
        }
        Ok(())
    }

    /// Binds every name an import introduces to an opaque value.
    fn bind_import(&mut self, node: Node<'_>) -> Result<(), ScriptError> {
        let mut names = Vec::new();
        if let Some(clause) = find_named(node, "import_clause") {
            collect_identifiers(clause, &mut names);
        }
        for name in names {
            let name = self.text(name)?.to_owned();
            self.bindings.insert(name, Value::Null);
        }
        Ok(())
    }

    fn evaluate(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        if depth > MAX_DEPTH {
            return Err(ScriptError::TooDeep { limit: MAX_DEPTH });
        }
        let next = depth + 1;
        match node.kind() {
            "object" => self.object(node, next),
            "array" => self.array(node, next),
            "string" => self.string(node).map(Value::String),
            "template_string" => self.template(node, next).map(Value::String),
            "number" => Ok(parse_number(self.text(node)?).unwrap_or(Value::Null)),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            "identifier" => self.lookup(node),
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression" => match first_named(node) {
                Some(inner) => self.evaluate(inner, next),
                None => Ok(Value::Null),
            },
            "unary_expression" => self.unary(node, next),
            "member_expression" => self.member(node, next),
            "subscript_expression" => self.subscript(node, next),
            "assignment_expression" => self.assignment(node, next),
            "call_expression" => self.call(node, next),
            _ => {
                self.skip(node);
                Ok(Value::Null)
            }
        }
    }

    fn object(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let mut map = Map::new();
        let mut cursor = node.walk();
        let members: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for member in members {
            match member.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (
                        member.child_by_field_name("key"),
                        member.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    let key = self.property_name(key, depth)?;
                    let value = self.evaluate(value, depth)?;
                    map.insert(key, value);
                }
                "shorthand_property_identifier" => {
                    let value = self.lookup(member)?;
                    map.insert(self.text(member)?.to_owned(), value);
                }
                "spread_element" => {
                    if let Some(inner) = first_named(member)
                        && let Value::Object(spread) = self.evaluate(inner, depth)?
                    {
                        map.extend(spread);
                    }
                }
                "method_definition" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        let key = self.property_name(name, depth)?;
                        map.insert(key, Value::Null);
                    }
                }
                _ => {}
            }
        }
        Ok(Value::Object(map))
    }

    fn array(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let mut items = Vec::new();
        let mut cursor = node.walk();
        let elements: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for element in elements {
            match element.kind() {
                "comment" => {}
                "spread_element" => {
                    if let Some(inner) = first_named(element)
                        && let Value::Array(spread) = self.evaluate(inner, depth)?
                    {
                        items.extend(spread);
                    }
                }
                _ => items.push(self.evaluate(element, depth)?),
            }
        }
        Ok(Value::Array(items))
    }

    fn property_name(&mut self, key: Node<'_>, depth: usize) -> Result<String, ScriptError> {
        match key.kind() {
            "string" => self.string(key),
            "number" => {
                let text = self.text(key)?;
                Ok(parse_number(text).map_or_else(|| text.to_owned(), |n| display_value(&n)))
            }
            "computed_property_name" => match first_named(key) {
                Some(inner) => self
                    .evaluate(inner, depth)
                    .map(|value| display_value(&value)),
                None => Ok(String::new()),
            },
            _ => self.text(key).map(str::to_owned),
        }
    }

    fn string(&self, node: Node<'_>) -> Result<String, ScriptError> {
        let mut decoded = String::new();
        let mut cursor = node.walk();
        for part in node.named_children(&mut cursor) {
            match part.kind() {
                "escape_sequence" => decoded.push_str(&decode_escape(self.text(part)?)),
                _ => decoded.push_str(self.text(part)?),
            }
        }
        Ok(decoded)
    }

    fn template(&mut self, node: Node<'_>, depth: usize) -> Result<String, ScriptError> {
        let mut rendered = String::new();
        let mut cursor = node.walk();
        let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for part in parts {
            match part.kind() {
                "escape_sequence" => rendered.push_str(&decode_escape(self.text(part)?)),
                "template_substitution" => {
                    let value = match first_named(part) {
                        Some(inner) => self.evaluate(inner, depth)?,
                        None => Value::Null,
                    };
                    rendered.push_str(&display_value(&value));
                }
                _ => rendered.push_str(self.text(part)?),
            }
        }
        Ok(rendered)
    }

    fn lookup(&self, node: Node<'_>) -> Result<Value, ScriptError> {
        let name = self.text(node)?;
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }
        match name {
            "undefined" | "NaN" | "Infinity" => Ok(Value::Null),
            MODULE_GLOBAL => {
                let mut module = Map::new();
                module.insert(EXPORTS_GLOBAL.to_owned(), self.exports.clone());
                Ok(Value::Object(module))
            }
            EXPORTS_GLOBAL => Ok(self.exports.clone()),
            CONSOLE_GLOBAL => Ok(Value::Null),
            _ => Err(ScriptError::unknown_identifier(name, line_of(node))),
        }
    }

    fn unary(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let (Some(operator), Some(argument)) = (
            node.child_by_field_name("operator"),
            node.child_by_field_name("argument"),
        ) else {
            return Ok(Value::Null);
        };
        let operator = self.text(operator)?;
        let value = self.evaluate(argument, depth)?;
        Ok(match operator {
            "-" => value
                .as_f64()
                .and_then(|number| number_value(-number))
                .unwrap_or(Value::Null),
            "+" => value
                .as_f64()
                .and_then(number_value)
                .unwrap_or(Value::Null),
            "!" => Value::Bool(!is_truthy(&value)),
            _ => Value::Null,
        })
    }

    fn member(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let (Some(object), Some(property)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("property"),
        ) else {
            return Ok(Value::Null);
        };
        let object = self.evaluate(object, depth)?;
        let key = self.text(property)?;
        Ok(property_of(&object, key))
    }

    fn subscript(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let (Some(object), Some(index)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("index"),
        ) else {
            return Ok(Value::Null);
        };
        let object = self.evaluate(object, depth)?;
        let index = self.evaluate(index, depth)?;
        Ok(property_of(&object, &display_value(&index)))
    }

    fn assignment(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return Ok(Value::Null);
        };
        let target = self.target(left)?;
        let value = self.evaluate(right, depth)?;
        match target {
            Target::ModuleExports => {
                self.exports = value.clone();
                self.exported = true;
            }
            Target::ExportProperty(key) => {
                if !self.exports.is_object() {
                    self.exports = Value::Object(Map::new());
                }
                if let Value::Object(map) = &mut self.exports {
                    map.insert(key, value.clone());
                }
                self.exported = true;
            }
            Target::Binding(name) => {
                self.bindings.insert(name, value.clone());
            }
            Target::Ignored => self.skip(left),
        }
        Ok(value)
    }

    fn target(&self, left: Node<'_>) -> Result<Target, ScriptError> {
        match left.kind() {
            "identifier" => Ok(Target::Binding(self.text(left)?.to_owned())),
            "member_expression" => {
                let (Some(object), Some(property)) = (
                    left.child_by_field_name("object"),
                    left.child_by_field_name("property"),
                ) else {
                    return Ok(Target::Ignored);
                };
                let property = self.text(property)?;
                if self.is_global(object, MODULE_GLOBAL) && property == EXPORTS_GLOBAL {
                    return Ok(Target::ModuleExports);
                }
                if self.is_global(object, EXPORTS_GLOBAL) || self.is_module_exports(object)? {
                    return Ok(Target::ExportProperty(property.to_owned()));
                }
                Ok(Target::Ignored)
            }
            _ => Ok(Target::Ignored),
        }
    }

    fn is_module_exports(&self, node: Node<'_>) -> Result<bool, ScriptError> {
        if node.kind() != "member_expression" {
            return Ok(false);
        }
        let (Some(object), Some(property)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("property"),
        ) else {
            return Ok(false);
        };
        Ok(self.is_global(object, MODULE_GLOBAL) && self.text(property)? == EXPORTS_GLOBAL)
    }

    /// Whether `node` names the host global `name` (and is not shadowed).
    fn is_global(&self, node: Node<'_>, name: &str) -> bool {
        node.kind() == "identifier"
            && self.text(node).is_ok_and(|text| text == name)
            && !self.bindings.contains_key(name)
    }

    fn call(&mut self, node: Node<'_>, depth: usize) -> Result<Value, ScriptError> {
        let Some(method) = self.console_method(node)? else {
            self.skip(node);
            return Ok(Value::Null);
        };
        let mut values = Vec::new();
        if let Some(arguments) = node.child_by_field_name("arguments") {
            let mut cursor = arguments.walk();
            let nodes: Vec<Node<'_>> = arguments
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .collect();
            for argument in nodes {
                values.push(self.evaluate(argument, depth)?);
            }
        }
        console::emit(method, &values);
        Ok(Value::Null)
    }

    fn console_method(&self, node: Node<'_>) -> Result<Option<ConsoleMethod>, ScriptError> {
        let Some(function) = node.child_by_field_name("function") else {
            return Ok(None);
        };
        if function.kind() != "member_expression" {
            return Ok(None);
        }
        let (Some(object), Some(property)) = (
            function.child_by_field_name("object"),
            function.child_by_field_name("property"),
        ) else {
            return Ok(None);
        };
        if !self.is_global(object, CONSOLE_GLOBAL) {
            return Ok(None);
        }
        Ok(self.text(property)?.parse().ok())
    }

    fn skip(&self, node: Node<'_>) {
        tracing::debug!(
            kind = node.kind(),
            line = line_of(node),
            "treating unsupported construct as opaque"
        );
    }

    fn text(&self, node: Node<'_>) -> Result<&'s str, ScriptError> {
        node.utf8_text(self.source.as_bytes())
            .map_err(|error| ScriptError::internal(error.to_string()))
    }
}

fn property_of(object: &Value, key: &str) -> Value {
    match object {
        Value::Object(map) => map.get(key).cloned().unwrap_or(Value::Null),
        Value::Array(items) if key == "length" => Value::Number(items.len().into()),
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned())
            .unwrap_or(Value::Null),
        Value::String(text) if key == "length" => {
            Value::Number(text.encode_utf16().count().into())
        }
        _ => Value::Null,
    }
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

fn find_named<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    found
}

fn collect_identifiers<'t>(node: Node<'t>, names: &mut Vec<Node<'t>>) {
    if node.kind() == "identifier" {
        names.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_identifiers(child, names);
    }
}

fn line_of(node: Node<'_>) -> u32 {
    point_to_one_based(node.start_position()).0
}
