//! Modules: the unit that declares types and references other assemblies.
//!
//! A [`CilModule`] owns the [`TypeRegistry`] of its definitions, the ordered list of
//! assemblies it references and its type-reference table. References into other
//! assemblies are resolved through the [`AssemblyResolver`] the module was created with;
//! the module only keeps a weak handle to it, so the resolver (usually an
//! [`crate::metadata::resolver::AssemblyCache`] which in turn owns the modules) has to
//! be kept alive by the caller.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let module = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//! let flax = AssemblyIdentity::parse("FlaxEngine.CSharp")?;
//! module.add_assembly_reference(flax.clone());
//!
//! let object = TypeReference::external(&module, Token::new(0x0100_0001), "FlaxEngine", "Object", flax);
//! module.add_type_reference(object);
//!
//! assert!(module.try_get_type_reference("FlaxEngine.Object").is_some());
//! assert_eq!(module.assembly_references().len(), 1);
//! # Ok::<(), cilquery::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Weak,
};

use dashmap::DashMap;

use crate::{
    metadata::{
        assembly::CilAssemblyRc,
        identity::AssemblyIdentity,
        resolver::AssemblyResolver,
        token::{TableId, Token},
        typesystem::{CilTypeRc, TypeRefRc, TypeReference, TypeRegistry, TypeScope},
    },
    Error::ModuleUnavailable,
    Result,
};

/// Reference to a `CilModule`
pub type CilModuleRc = Arc<CilModule>;

/// A module of an assembly
pub struct CilModule {
    /// Module name, also the scope name of types it defines
    pub name: String,
    /// File name the module was loaded from
    pub file_name: String,
    assembly: AssemblyIdentity,
    types: TypeRegistry,
    assembly_refs: boxcar::Vec<AssemblyIdentity>,
    type_refs: boxcar::Vec<TypeRefRc>,
    type_refs_by_fullname: DashMap<String, TypeRefRc>,
    next_typeref_row: AtomicU32,
    resolver: Weak<dyn AssemblyResolver>,
}

impl CilModule {
    /// Create a new, empty module
    ///
    /// ## Arguments
    /// * 'name'      - The module name
    /// * 'file_name' - The file the module was loaded from
    /// * 'assembly'  - Identity of the assembly this module belongs to
    /// * 'resolver'  - Resolver for referenced assemblies, only held weakly
    pub fn new<R: AssemblyResolver + 'static>(
        name: &str,
        file_name: &str,
        assembly: AssemblyIdentity,
        resolver: &Arc<R>,
    ) -> CilModuleRc {
        let resolver: Weak<R> = Arc::downgrade(resolver);
        let resolver: Weak<dyn AssemblyResolver> = resolver;

        Arc::new(CilModule {
            name: name.to_string(),
            file_name: file_name.to_string(),
            assembly,
            types: TypeRegistry::new(),
            assembly_refs: boxcar::Vec::new(),
            type_refs: boxcar::Vec::new(),
            type_refs_by_fullname: DashMap::new(),
            next_typeref_row: AtomicU32::new(1),
            resolver,
        })
    }

    /// The type definitions of this module
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Definitions without an enclosing type, in declaration order
    #[must_use]
    pub fn top_level_types(&self) -> Vec<CilTypeRc> {
        self.types.top_level()
    }

    /// Identity of the assembly which contains this module
    #[must_use]
    pub fn assembly_identity(&self) -> &AssemblyIdentity {
        &self.assembly
    }

    /// Referenced assemblies, in declaration order
    #[must_use]
    pub fn assembly_references(&self) -> Vec<AssemblyIdentity> {
        self.assembly_refs
            .iter()
            .map(|(_, identity)| identity.clone())
            .collect()
    }

    /// Add a referenced assembly, unless an equal identity is already referenced
    ///
    /// Returns `true` if the reference was added.
    pub fn add_assembly_reference(&self, identity: AssemblyIdentity) -> bool {
        if self.assembly_refs.iter().any(|(_, known)| *known == identity) {
            return false;
        }

        self.assembly_refs.push(identity);
        true
    }

    /// Materialize a referenced assembly through the resolver of this module
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleUnavailable`] if the resolver has been dropped, or
    /// whatever the resolver fails with.
    pub fn resolve_assembly(&self, identity: &AssemblyIdentity) -> Result<CilAssemblyRc> {
        let resolver = self.resolver.upgrade().ok_or(ModuleUnavailable)?;
        resolver.resolve(identity)
    }

    /// Look up the type-reference table by full name
    #[must_use]
    pub fn try_get_type_reference(&self, fullname: &str) -> Option<TypeRefRc> {
        self.type_refs_by_fullname
            .get(fullname)
            .map(|entry| entry.value().clone())
    }

    /// Add a reference to the type-reference table
    ///
    /// The table is interned by full name: if a reference with the same full name exists,
    /// that one is kept and returned.
    pub fn add_type_reference(&self, reference: TypeRefRc) -> TypeRefRc {
        self.type_refs_by_fullname
            .entry(reference.fullname())
            .or_insert_with(|| {
                self.type_refs.push(reference.clone());
                reference
            })
            .value()
            .clone()
    }

    /// All entries of the type-reference table, in insertion order
    #[must_use]
    pub fn type_references(&self) -> Vec<TypeRefRc> {
        self.type_refs.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Import a definition into this module's type-reference table.
    ///
    /// Definitions of this module produce a reference scoped to the module itself.
    /// Foreign definitions produce a reference scoped to their assembly, which is added to
    /// the assembly references if missing; their enclosing types are imported along. The
    /// returned reference is already bound to `definition`. Importing the same full name
    /// again returns the interned reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleUnavailable`] if the module of a foreign definition
    /// has been dropped.
    pub fn import_type(self: &Arc<Self>, definition: &CilTypeRc) -> Result<TypeRefRc> {
        if let Some(known) = self.try_get_type_reference(&definition.fullname()) {
            return Ok(known);
        }

        let reference = match definition.module() {
            Some(owner) if Arc::ptr_eq(&owner, self) => TypeReference::from_definition(definition),
            Some(owner) => {
                let identity = owner.assembly_identity().clone();
                self.add_assembly_reference(identity.clone());
                self.foreign_reference(definition, &identity)
            }
            None => return Err(ModuleUnavailable),
        };

        Ok(self.add_type_reference(reference))
    }

    fn foreign_reference(
        self: &Arc<Self>,
        definition: &CilTypeRc,
        identity: &AssemblyIdentity,
    ) -> TypeRefRc {
        let declaring_type = definition
            .enclosing_type()
            .map(|enclosing| self.foreign_reference(&enclosing, identity));

        TypeReference::bound(
            self.next_typeref_token(),
            definition,
            TypeScope::AssemblyRef(identity.clone()),
            declaring_type,
            Arc::downgrade(self),
        )
    }

    fn next_typeref_token(&self) -> Token {
        let row = self.next_typeref_row.fetch_add(1, Ordering::Relaxed);
        Token::from_parts(TableId::TypeRef, row)
    }
}

impl std::fmt::Debug for CilModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CilModule")
            .field("name", &self.name)
            .field("assembly", &self.assembly.name)
            .field("types", &self.types.len())
            .field("type_refs", &self.type_refs.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{assembly_identity, class, external_ref, module, module_with, register},
        Error,
    };

    #[test]
    fn test_type_reference_table_interns_by_fullname() {
        let module = module("Game.dll", "Game");
        let lib = assembly_identity("Lib");
        let first =
            module.add_type_reference(external_ref(&module, 1, "Lib", "Widget", lib.clone()));
        let second = module.add_type_reference(external_ref(&module, 2, "Lib", "Widget", lib));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(module.type_references().len(), 1);
        assert!(module.try_get_type_reference("Lib.Widget").is_some());
        assert!(module.try_get_type_reference("Lib.Gadget").is_none());
    }

    #[test]
    fn test_assembly_references_deduplicated() {
        let module = module("Game.dll", "Game");
        assert!(module.add_assembly_reference(assembly_identity("Lib")));
        assert!(module.add_assembly_reference(assembly_identity("Other")));
        assert!(!module.add_assembly_reference(assembly_identity("Lib")));

        let names: Vec<String> = module
            .assembly_references()
            .into_iter()
            .map(|identity| identity.name)
            .collect();
        assert_eq!(names, vec!["Lib", "Other"]);
    }

    #[test]
    fn test_import_own_definition() {
        let module = module("Game.dll", "Game");
        let player = class(&module, 1, "Game", "Player").build().unwrap();

        let imported = module.import_type(&player).unwrap();
        assert_eq!(imported.scope, TypeScope::Module("Game.dll".to_string()));
        assert!(imported.is_resolved());
        assert!(module.assembly_references().is_empty());
    }

    #[test]
    fn test_import_foreign_nested_definition() {
        let (cache, lib) = register("Lib", "Lib.dll");
        let outer = class(&lib, 1, "Lib", "Outer").build().unwrap();
        let inner = class(&lib, 2, "", "Inner").enclosing(&outer).build().unwrap();

        let game = module_with(&cache, "Game.dll", "Game");
        let imported = game.import_type(&inner).unwrap();

        assert_eq!(imported.fullname(), "Lib.Outer/Inner");
        assert_eq!(imported.scope.name(), "Lib");
        assert_eq!(imported.token.table_id(), Some(TableId::TypeRef));
        assert!(Arc::ptr_eq(&imported.resolve().unwrap(), &inner));
        assert_eq!(game.assembly_references(), vec![assembly_identity("Lib")]);

        let again = game.import_type(&inner).unwrap();
        assert!(Arc::ptr_eq(&imported, &again));
        assert_eq!(game.assembly_references().len(), 1);
        assert_eq!(game.type_references().len(), 1);
    }

    #[test]
    fn test_resolve_assembly_without_resolver() {
        let cache = Arc::new(crate::metadata::resolver::AssemblyCache::new());
        let module = module_with(&cache, "Game.dll", "Game");
        drop(cache);

        assert!(matches!(
            module.resolve_assembly(&assembly_identity("Lib")),
            Err(Error::ModuleUnavailable)
        ));
    }

    #[test]
    fn test_resolve_registered_assembly() {
        let (cache, _lib) = register("Lib", "Lib.dll");
        let game = module_with(&cache, "Game.dll", "Game");

        let lib = game.resolve_assembly(&assembly_identity("Lib")).unwrap();
        assert_eq!(lib.main_module().unwrap().name, "Lib.dll");
    }
}
