//! Rust bindings for the `tree-sitter-pluto` grammar.
//!
//! This follows the standard layout used by Tree-sitter grammars: the build
//! script compiles the parser generated from `grammar.js`, and this crate
//! exposes it as a [`LanguageFn`]. When no generated parser is available the
//! crate still builds, and [`language`] reports [`LoadFailure::NotLinked`].
//!
//! ```no_run
//! let mut parser = tree_sitter_pluto::new_parser()?;
//! let tree = parser.parse("x = 1 + 2\n", None);
//! # Ok::<(), tree_sitter_pluto::GrammarLoadError>(())
//! ```

mod check;

pub use check::{check_language_fn, check_node_kinds, load_language, load_parser};
pub use check::{GrammarLoadError, LoadFailure};

use tree_sitter::{Language, Parser};
use tree_sitter_language::LanguageFn;

/// Name of the grammar, as declared in `grammar.js`.
pub const GRAMMAR_NAME: &str = "pluto";

/// Name used in diagnostics.
pub const DISPLAY_NAME: &str = "PLUTO";

#[cfg(tree_sitter_pluto_parser)]
extern "C" {
    fn tree_sitter_pluto() -> *const ();
}

/// The tree-sitter [`LanguageFn`] for this grammar.
#[cfg(tree_sitter_pluto_parser)]
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_pluto) };

/// Named node kinds reachable from `source_file`.
pub const NODE_KINDS: &[&str] = &[
    "source_file",
    "assignment",
    "block_comment_statement",
    "block_comment",
    "command",
    "argument_list",
    "if_statement",
    "while_loop",
    "for_loop",
    "function_definition",
    "parameter_list",
    "parameter",
    "block",
    "conditional_expression",
    "binary_operation",
    "unary_operation",
    "postfix_operation",
    "operator",
    "parenthesized_expression",
    "array_literal",
    "object_literal",
    "object_pair",
    "computed_property",
    "type_annotation",
    "type_expression",
    "generic_type",
    "union_type",
    "array_type",
    "function_type",
    "identifier",
    "number",
    "string",
    "boolean",
    "comment",
    "line_continuation",
];

/// Returns the grammar accessor, or `None` if no parser was linked.
pub const fn language_fn() -> Option<LanguageFn> {
    #[cfg(tree_sitter_pluto_parser)]
    {
        Some(LANGUAGE)
    }
    #[cfg(not(tree_sitter_pluto_parser))]
    {
        None
    }
}

fn linked_language_fn() -> Result<LanguageFn, GrammarLoadError> {
    language_fn().ok_or_else(|| {
        tracing::warn!(grammar = DISPLAY_NAME, "no generated parser linked");
        GrammarLoadError::new(DISPLAY_NAME, LoadFailure::NotLinked)
    })
}

/// Returns the validated Tree-sitter [`Language`] for this grammar.
pub fn language() -> Result<Language, GrammarLoadError> {
    load_language(DISPLAY_NAME, linked_language_fn()?)
}

/// Verifies that the PLUTO grammar loads.
pub fn check_grammar_loads() -> Result<(), GrammarLoadError> {
    check_language_fn(DISPLAY_NAME, linked_language_fn()?)
}

/// Creates a [`Parser`] with the PLUTO language assigned.
pub fn new_parser() -> Result<Parser, GrammarLoadError> {
    load_parser(DISPLAY_NAME, linked_language_fn()?)
}
