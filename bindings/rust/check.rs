//! Load checks for grammar bindings.
//!
//! A binding exposes its grammar through a [`LanguageFn`], a C accessor that
//! returns a pointer to the generated parse tables. The checks here call that
//! accessor once, reject null or empty descriptors, and hand the result to a
//! [`Parser`] so the runtime can validate the ABI version tag.

use thiserror::Error;
use tree_sitter::{Language, Parser};
use tree_sitter_language::LanguageFn;

/// Why a grammar failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// No generated parser is linked into the build.
    NotLinked,
    /// The accessor returned a null pointer.
    NullHandle,
    /// The descriptor declares no node kinds.
    EmptyGrammar,
    /// The runtime rejected the descriptor's ABI version.
    IncompatibleAbi { version: usize },
    /// An expected named node kind is absent from the grammar.
    MissingNodeKind { kind: String },
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLinked => f.write_str("no generated parser is linked"),
            Self::NullHandle => f.write_str("grammar failed to load"),
            Self::EmptyGrammar => f.write_str("grammar declares no node kinds"),
            Self::IncompatibleAbi { version } => write!(
                f,
                "incompatible language version {version}, expected {}..={}",
                tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION,
                tree_sitter::LANGUAGE_VERSION,
            ),
            Self::MissingNodeKind { kind } => write!(f, "missing node kind `{kind}`"),
        }
    }
}

/// A grammar binding could not produce a usable [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error loading {grammar} grammar: {reason}")]
pub struct GrammarLoadError {
    pub grammar: String,
    pub reason: LoadFailure,
}

impl GrammarLoadError {
    pub fn new(grammar: &str, reason: LoadFailure) -> Self {
        Self {
            grammar: grammar.to_owned(),
            reason,
        }
    }
}

/// Verifies that `language_fn` yields a language the runtime accepts.
///
/// `name` only appears in the error message and log events.
pub fn check_language_fn(name: &str, language_fn: LanguageFn) -> Result<(), GrammarLoadError> {
    load(name, language_fn).map(drop)
}

/// Calls `language_fn` exactly once and returns the validated [`Language`].
pub fn load_language(name: &str, language_fn: LanguageFn) -> Result<Language, GrammarLoadError> {
    load(name, language_fn).map(|(language, _)| language)
}

/// Like [`load_language`], but returns the [`Parser`] the language was
/// assigned to during validation.
pub fn load_parser(name: &str, language_fn: LanguageFn) -> Result<Parser, GrammarLoadError> {
    load(name, language_fn).map(|(_, parser)| parser)
}

fn load(name: &str, language_fn: LanguageFn) -> Result<(Language, Parser), GrammarLoadError> {
    let result = validate(name, language_fn);
    match &result {
        Ok((language, _)) => tracing::debug!(
            grammar = name,
            abi_version = language.abi_version(),
            node_kinds = language.node_kind_count(),
            "grammar loaded"
        ),
        Err(err) => tracing::warn!(grammar = name, reason = %err.reason, "grammar failed to load"),
    }
    result
}

fn validate(name: &str, language_fn: LanguageFn) -> Result<(Language, Parser), GrammarLoadError> {
    let raw = unsafe { language_fn.into_raw()() };
    if raw.is_null() {
        return Err(GrammarLoadError::new(name, LoadFailure::NullHandle));
    }

    // Wrapping the pointer directly keeps this to a single accessor call;
    // `Language::new` would invoke the accessor again.
    let language = unsafe { Language::from_raw(raw.cast()) };
    if language.node_kind_count() == 0 {
        return Err(GrammarLoadError::new(name, LoadFailure::EmptyGrammar));
    }

    let mut parser = Parser::new();
    parser.set_language(&language).map_err(|_| {
        GrammarLoadError::new(
            name,
            LoadFailure::IncompatibleAbi {
                version: language.abi_version(),
            },
        )
    })?;

    Ok((language, parser))
}

/// Verifies that every entry of `kinds` is a named node kind of `language`.
pub fn check_node_kinds(
    name: &str,
    language: &Language,
    kinds: &[&str],
) -> Result<(), GrammarLoadError> {
    match kinds
        .iter()
        .find(|kind| language.id_for_node_kind(kind, true) == 0)
    {
        Some(kind) => Err(GrammarLoadError::new(
            name,
            LoadFailure::MissingNodeKind {
                kind: (*kind).to_owned(),
            },
        )),
        None => Ok(()),
    }
}
