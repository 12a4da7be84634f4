//! Materializing referenced assemblies.
//!
//! Modules never own the assemblies they reference. When a type reference or a lookup
//! needs to look into another assembly, the module asks the [`AssemblyResolver`] it was
//! created with. [`AssemblyCache`] is the default implementation: a thread-safe store
//! of already loaded assemblies, keyed by simple name.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let identity = AssemblyIdentity::parse("FlaxEngine.CSharp, Version=1.0.0.0")?;
//! let module = CilModule::new("FlaxEngine.CSharp.dll", "FlaxEngine.CSharp.dll", identity.clone(), &cache);
//!
//! let assembly = CilAssembly::new(identity.clone());
//! assembly.add_module(module);
//! cache.register(Arc::new(assembly));
//!
//! assert!(cache.resolve(&identity).is_ok());
//! assert!(cache.resolve(&AssemblyIdentity::parse("Missing")?).is_err());
//! # Ok::<(), cilquery::Error>(())
//! ```

use dashmap::DashMap;

use crate::{
    metadata::{assembly::CilAssemblyRc, identity::AssemblyIdentity},
    Error::AssemblyNotResolved,
    Result,
};

/// Turns an assembly reference into a loaded assembly
pub trait AssemblyResolver: Send + Sync {
    /// Resolve `identity` to a loaded assembly
    ///
    /// # Errors
    /// Returns [`crate::Error::AssemblyNotResolved`] (or any other error of the
    /// implementation) if the assembly is not available.
    fn resolve(&self, identity: &AssemblyIdentity) -> Result<CilAssemblyRc>;
}

/// Default [`AssemblyResolver`]: loaded assemblies keyed by simple name.
///
/// Versions, cultures and public key tokens are not compared; a build-time generator
/// only ever has one copy of each assembly loaded.
#[derive(Default)]
pub struct AssemblyCache {
    assemblies: DashMap<String, CilAssemblyRc>,
}

impl AssemblyCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded assembly, replacing a previous one with the same simple name
    pub fn register(&self, assembly: CilAssemblyRc) -> Option<CilAssemblyRc> {
        self.assemblies
            .insert(assembly.identity.simple_name().to_string(), assembly)
    }

    /// Check if an assembly with this simple name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.assemblies.contains_key(name)
    }

    /// Number of registered assemblies
    #[must_use]
    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    /// Check if no assembly is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}

impl AssemblyResolver for AssemblyCache {
    fn resolve(&self, identity: &AssemblyIdentity) -> Result<CilAssemblyRc> {
        self.assemblies
            .get(identity.simple_name())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AssemblyNotResolved(identity.name.clone()))
    }
}
