//! Directive registry for key-based dispatch.

use std::collections::HashMap;

use super::{AuthorDirective, BrDirective, CodeDirective, Directive, NotebookDirective};
use crate::fetch::ContentFetcher;

/// Registry of directive handlers keyed by directive key.
///
/// Built per conversion from the handlers the caller wants recognized.
/// Registering a handler whose key is already present replaces the earlier
/// one.
///
/// # Example
///
/// ```
/// use celli_notebook::{BrDirective, DirectiveRegistry, NotebookDirective};
///
/// let registry = DirectiveRegistry::new()
///     .with(BrDirective)
///     .with(NotebookDirective);
///
/// assert!(registry.has("br"));
/// assert_eq!(registry.keys(), vec!["br", "notebook"]);
/// ```
pub struct DirectiveRegistry {
    directives: HashMap<String, Box<dyn Directive>>,
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directives: HashMap::new(),
        }
    }

    /// Create a registry with the built-in `code`, `br`, `notebook` and
    /// `author` directives.
    ///
    /// `fetcher` resolves `uri` references in code directives.
    #[must_use]
    pub fn with_builtins(fetcher: ContentFetcher) -> Self {
        Self::new()
            .with(CodeDirective::new(fetcher))
            .with(BrDirective)
            .with(NotebookDirective)
            .with(AuthorDirective)
    }

    /// Register a directive handler.
    ///
    /// If a handler with the same key exists, it is replaced.
    pub fn register<D: Directive + 'static>(&mut self, directive: D) {
        self.register_boxed(Box::new(directive));
    }

    /// Register an already boxed directive handler.
    pub fn register_boxed(&mut self, directive: Box<dyn Directive>) {
        self.directives.insert(directive.key().to_owned(), directive);
    }

    /// Register a directive handler, builder style.
    #[must_use]
    pub fn with<D: Directive + 'static>(mut self, directive: D) -> Self {
        self.register(directive);
        self
    }

    /// Look up the handler for a key.
    pub fn get(&self, key: &str) -> Option<&dyn Directive> {
        self.directives.get(key).map(AsRef::as_ref)
    }

    /// Check if a key is registered.
    pub fn has(&self, key: &str) -> bool {
        self.directives.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.directives.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl FromIterator<Box<dyn Directive>> for DirectiveRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Directive>>>(iter: I) -> Self {
        let mut registry = Self::new();
        for directive in iter {
            registry.register_boxed(directive);
        }
        registry
    }
}
