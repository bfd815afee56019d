//! Sandboxed evaluation of generated Docusaurus configuration modules.
//!
//! Docusaurus writes its resolved site configuration to
//! `.docusaurus/docusaurus.config.js` as an ES module with a default export.
//! The file is executable code rather than data, so this crate parses it with
//! Tree-sitter and reduces it to a [`serde_json::Value`] without running
//! anything:
//!
//! - [`rewrite_default_export`] turns `export default <expr>` into the
//!   CommonJS `module.exports = <expr>` form the evaluator understands.
//! - [`evaluate_module`] evaluates the module in an isolated scope whose only
//!   globals are `module`, `exports` and a `console` that logs via `tracing`.
//!
//! # Example
//!
//! ```ignore
//! let value = doclocale_script::evaluate_module(
//!     "export default { i18n: { defaultLocale: 'en', locales: ['en'] } };",
//! )?;
//! assert_eq!(value["i18n"]["defaultLocale"], "en");
//! ```

mod console;
mod error;
mod literal;
mod parser;
mod position;
mod rewrite;
mod sandbox;

pub use error::ScriptError;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use rewrite::{EXPORT_ASSIGNMENT, rewrite_default_export};
pub use sandbox::{MAX_DEPTH, evaluate_module, evaluate_parsed};
