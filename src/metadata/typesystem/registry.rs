//! Per-module registry of type definitions.
//!
//! The registry owns every [`CilType`] a module declares, nested ones included. It keeps
//! them ordered by token, which is declaration order, and maintains secondary indices
//! for lookup by full name, simple name and namespace.
//!
//! # Thread Safety
//!
//! - Lock-free ordered primary storage (`SkipMap`)
//! - Concurrent hash maps for indices (`DashMap`)
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let module = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//! TypeBuilder::new(&module, Token::new(0x0200_0002)).namespace("Game").name("Player").build()?;
//! TypeBuilder::new(&module, Token::new(0x0200_0003)).namespace("Game").name("Enemy").build()?;
//!
//! let registry = module.types();
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.get_by_namespace("Game").len(), 2);
//! assert!(registry.get_by_fullname("Game.Enemy").is_some());
//! # Ok::<(), cilquery::Error>(())
//! ```

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{token::Token, typesystem::CilTypeRc},
    Error::TypeInsert,
    Result,
};

/// Storage and lookup of the type definitions of one module
#[derive(Default)]
pub struct TypeRegistry {
    /// Definitions ordered by token
    types: SkipMap<Token, CilTypeRc>,
    /// Full name to token; the first registered definition wins
    types_by_fullname: DashMap<String, Token>,
    /// Simple name to tokens
    types_by_name: DashMap<String, Vec<Token>>,
    /// Namespace to tokens
    types_by_namespace: DashMap<String, Vec<Token>>,
}

impl TypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition
    ///
    /// ## Arguments
    /// * 'new_type' - The definition to register
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeInsert`] if a definition with the same token exists.
    pub fn insert(&self, new_type: &CilTypeRc) -> Result<()> {
        if self.types.contains_key(&new_type.token) {
            return Err(TypeInsert(new_type.token));
        }

        self.types.insert(new_type.token, new_type.clone());
        self.types_by_fullname
            .entry(new_type.fullname())
            .or_insert(new_type.token);
        self.types_by_name
            .entry(new_type.name.clone())
            .or_default()
            .push(new_type.token);
        self.types_by_namespace
            .entry(new_type.namespace.clone())
            .or_default()
            .push(new_type.token);

        Ok(())
    }

    /// Recompute the full name index for `cil_type` and everything nested in it, after it
    /// has been moved under an enclosing type
    pub(crate) fn refresh_fullname(&self, cil_type: &CilTypeRc, previous: &str) {
        self.types_by_fullname
            .remove_if(previous, |_, token| *token == cil_type.token);
        self.types_by_fullname
            .entry(cil_type.fullname())
            .or_insert(cil_type.token);

        for (_, nested) in cil_type.nested_types.iter() {
            if let Some(nested) = nested.upgrade() {
                let previous = format!("{}/{}", previous, nested.name);
                self.refresh_fullname(&nested, &previous);
            }
        }
    }

    /// Get a definition by its token
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<CilTypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get a definition by its full name (`Namespace.Name`, `Enclosing/Nested`)
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<CilTypeRc> {
        let token = *self.types_by_fullname.get(fullname)?;
        self.get(&token)
    }

    /// Get all definitions with the given simple name, in declaration order
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Vec<CilTypeRc> {
        let tokens = self
            .types_by_name
            .get(name)
            .map(|tokens| tokens.value().clone());
        self.collect_tokens(tokens)
    }

    /// Get all definitions in the given namespace, in declaration order
    #[must_use]
    pub fn get_by_namespace(&self, namespace: &str) -> Vec<CilTypeRc> {
        let tokens = self
            .types_by_namespace
            .get(namespace)
            .map(|tokens| tokens.value().clone());
        self.collect_tokens(tokens)
    }

    fn collect_tokens(&self, tokens: Option<Vec<Token>>) -> Vec<CilTypeRc> {
        let mut tokens = tokens.unwrap_or_default();
        tokens.sort();
        tokens.iter().filter_map(|token| self.get(token)).collect()
    }

    /// All definitions without an enclosing type, in declaration order
    #[must_use]
    pub fn top_level(&self) -> Vec<CilTypeRc> {
        self.types
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|cil_type| !cil_type.is_nested())
            .collect()
    }

    /// All definitions, in declaration order
    #[must_use]
    pub fn all_types(&self) -> Vec<CilTypeRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of registered definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no definitions are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
