use std::{
    fmt,
    sync::{Arc, OnceLock, Weak},
};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        module::{CilModule, CilModuleRc},
        token::Token,
        typesystem::{CilType, CilTypeRc},
    },
    Error::{ModuleUnavailable, TypeNotResolved},
    Result,
};

/// A vector that holds `CilTypeRef` instances (weak references)
pub type CilTypeRefList = Arc<boxcar::Vec<CilTypeRef>>;
/// Reference to a `TypeReference`
pub type TypeRefRc = Arc<TypeReference>;
/// A vector that holds a list of `TypeReference`
pub type TypeRefList = Arc<boxcar::Vec<TypeRefRc>>;

/// A smart reference to a `CilType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
#[derive(Clone, Debug)]
pub struct CilTypeRef {
    weak_ref: Weak<CilType>,
}

impl CilTypeRef {
    /// Create a new `CilTypeRef` from a strong reference
    pub fn new(strong_ref: &CilTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CilTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the full name of the referenced type (if still alive)
    #[must_use]
    pub fn fullname(&self) -> Option<String> {
        self.upgrade().map(|t| t.fullname())
    }
}

impl From<CilTypeRc> for CilTypeRef {
    fn from(strong_ref: CilTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// The module or assembly a type reference originates from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeScope {
    /// Defined in the module with this name
    Module(String),
    /// Defined in a referenced assembly
    AssemblyRef(AssemblyIdentity),
}

impl TypeScope {
    /// The scope name: the module name, or the simple name of the referenced assembly
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeScope::Module(name) => name,
            TypeScope::AssemblyRef(identity) => identity.simple_name(),
        }
    }
}

impl fmt::Display for TypeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A possibly unresolved pointer to a [`CilType`].
///
/// References are what base types, interfaces, attribute types and imported types are
/// made of. A reference belongs to the module it was created in, and resolves through
/// that module's [`crate::metadata::resolver::AssemblyResolver`]. Successful resolutions
/// are cached on the reference.
pub struct TypeReference {
    /// Token (a `TypeRef` token, or the `TypeDef` token for references to definitions)
    pub token: Token,
    /// `TypeNamespace`, empty for nested references
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Where the referenced type is defined
    pub scope: TypeScope,
    /// The enclosing reference, for nested types
    pub declaring_type: Option<TypeRefRc>,
    module: Weak<CilModule>,
    definition: OnceLock<CilTypeRef>,
}

impl TypeReference {
    /// Create a reference to a type defined in another assembly
    ///
    /// ## Arguments
    /// * 'module'    - The module that holds the reference
    /// * 'token'     - The `TypeRef` token
    /// * 'namespace' - Namespace of the referenced type
    /// * 'name'      - Name of the referenced type
    /// * 'assembly'  - Identity of the defining assembly
    pub fn external(
        module: &CilModuleRc,
        token: Token,
        namespace: &str,
        name: &str,
        assembly: AssemblyIdentity,
    ) -> TypeRefRc {
        Arc::new(TypeReference {
            token,
            namespace: namespace.to_string(),
            name: name.to_string(),
            scope: TypeScope::AssemblyRef(assembly),
            declaring_type: None,
            module: Arc::downgrade(module),
            definition: OnceLock::new(),
        })
    }

    /// Create a reference to a nested type, sharing the scope of its declaring reference
    ///
    /// ## Arguments
    /// * 'token'     - The `TypeRef` token
    /// * 'declaring' - Reference to the enclosing type
    /// * 'name'      - Name of the nested type
    pub fn nested(token: Token, declaring: &TypeRefRc, name: &str) -> TypeRefRc {
        Arc::new(TypeReference {
            token,
            namespace: String::new(),
            name: name.to_string(),
            scope: declaring.scope.clone(),
            declaring_type: Some(declaring.clone()),
            module: declaring.module.clone(),
            definition: OnceLock::new(),
        })
    }

    /// Create a reference that is already bound to a definition, scoped to the module
    /// which defines it
    pub fn from_definition(definition: &CilTypeRc) -> TypeRefRc {
        let declaring_type = definition
            .enclosing_type()
            .map(|enclosing| TypeReference::from_definition(&enclosing));

        Self::bound(
            definition.token,
            definition,
            definition.scope.clone(),
            declaring_type,
            definition.module_weak(),
        )
    }

    /// Create a reference bound to `definition`, owned by `module` and pointing at `scope`
    pub(crate) fn bound(
        token: Token,
        definition: &CilTypeRc,
        scope: TypeScope,
        declaring_type: Option<TypeRefRc>,
        module: Weak<CilModule>,
    ) -> TypeRefRc {
        let bound = OnceLock::new();
        bound.set(CilTypeRef::new(definition)).ok();

        Arc::new(TypeReference {
            token,
            namespace: if declaring_type.is_some() {
                String::new()
            } else {
                definition.namespace.clone()
            },
            name: definition.name.clone(),
            scope,
            declaring_type,
            module,
            definition: bound,
        })
    }

    /// Returns the full name of the referenced type, `Enclosing/Name` for nested types
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.declaring_type {
            Some(declaring) => format!("{}/{}", declaring.fullname(), self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// The module holding this reference, if it is still alive
    #[must_use]
    pub fn module(&self) -> Option<CilModuleRc> {
        self.module.upgrade()
    }

    /// Check if this reference has already been bound to its definition
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.definition.get().is_some_and(CilTypeRef::is_valid)
    }

    /// Resolve this reference to its definition.
    ///
    /// Module scoped references are looked up in the owning module, or a sibling module of
    /// the same assembly; assembly scoped references go through the owning module's
    /// resolver and are looked up in the main module of the resolved assembly.
    ///
    /// # Errors
    /// - [`crate::Error::ModuleUnavailable`] if the owning module or its resolver is gone
    /// - [`crate::Error::AssemblyNotResolved`] if the resolver does not know the assembly
    /// - [`crate::Error::TypeNotResolved`] if the defining module has no such type
    pub fn resolve(&self) -> Result<CilTypeRc> {
        if let Some(resolved) = self.definition.get().and_then(CilTypeRef::upgrade) {
            return Ok(resolved);
        }

        let module = self.module.upgrade().ok_or(ModuleUnavailable)?;
        let target = match &self.scope {
            TypeScope::Module(name) if *name == module.name => module,
            TypeScope::Module(name) => {
                let assembly = module.resolve_assembly(module.assembly_identity())?;
                assembly.module(name).ok_or_else(|| TypeNotResolved {
                    name: self.fullname(),
                    scope: name.clone(),
                })?
            }
            TypeScope::AssemblyRef(identity) => {
                let assembly = module.resolve_assembly(identity)?;
                assembly.main_module().ok_or_else(|| TypeNotResolved {
                    name: self.fullname(),
                    scope: identity.name.clone(),
                })?
            }
        };

        let fullname = self.fullname();
        let resolved = target
            .types()
            .get_by_fullname(&fullname)
            .ok_or_else(|| TypeNotResolved {
                name: fullname,
                scope: self.scope.name().to_string(),
            })?;

        self.definition.set(CilTypeRef::new(&resolved)).ok();
        Ok(resolved)
    }
}

impl fmt::Debug for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeReference")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("scope", &self.scope)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{assembly_identity, class, external_ref, module, register},
        Error,
    };

    #[test]
    fn test_scope_names() {
        let module_scope = TypeScope::Module("Game.dll".to_string());
        let assembly_scope = TypeScope::AssemblyRef(assembly_identity("mscorlib"));
        assert_eq!(module_scope.name(), "Game.dll");
        assert_eq!(assembly_scope.name(), "mscorlib");
        assert_eq!(assembly_scope.to_string(), "mscorlib");
    }

    #[test]
    fn test_nested_reference_fullname() {
        let module = module("Game.dll", "Game");
        let outer = external_ref(&module, 1, "Lib", "Outer", assembly_identity("Lib"));
        let inner = TypeReference::nested(Token::new(0x0100_0002), &outer, "Inner");
        let deepest = TypeReference::nested(Token::new(0x0100_0003), &inner, "Deepest");

        assert_eq!(inner.fullname(), "Lib.Outer/Inner");
        assert_eq!(deepest.fullname(), "Lib.Outer/Inner/Deepest");
        assert_eq!(deepest.scope.name(), "Lib");
    }

    #[test]
    fn test_resolve_through_resolver() {
        let (cache, lib) = register("Lib", "Lib.dll");
        let target = class(&lib, 1, "Lib", "Target").build().unwrap();

        let game = crate::test::module_with(&cache, "Game.dll", "Game");
        let reference = external_ref(&game, 1, "Lib", "Target", assembly_identity("Lib"));
        assert!(!reference.is_resolved());

        let resolved = reference.resolve().unwrap();
        assert!(Arc::ptr_eq(&resolved, &target));
        assert!(reference.is_resolved());
    }

    #[test]
    fn test_resolve_unknown_assembly() {
        let module = module("Game.dll", "Game");
        let reference = external_ref(&module, 1, "Gone", "Type", assembly_identity("Gone"));
        assert!(matches!(
            reference.resolve(),
            Err(Error::AssemblyNotResolved(name)) if name == "Gone"
        ));
    }

    #[test]
    fn test_resolve_unknown_type() {
        let (cache, _lib) = register("Lib", "Lib.dll");
        let game = crate::test::module_with(&cache, "Game.dll", "Game");
        let reference = external_ref(&game, 1, "Lib", "Missing", assembly_identity("Lib"));
        assert!(matches!(
            reference.resolve(),
            Err(Error::TypeNotResolved { name, scope }) if name == "Lib.Missing" && scope == "Lib"
        ));
    }

    #[test]
    fn test_resolve_after_module_dropped() {
        let module = module("Game.dll", "Game");
        let reference = external_ref(&module, 1, "Lib", "Target", assembly_identity("Lib"));
        drop(module);
        assert!(matches!(reference.resolve(), Err(Error::ModuleUnavailable)));
    }

    #[test]
    fn test_bound_reference_resolves_without_resolver() {
        let module = module("Game.dll", "Game");
        let player = class(&module, 1, "Game", "Player").build().unwrap();
        let reference = TypeReference::from_definition(&player);

        assert!(reference.is_resolved());
        assert_eq!(reference.scope, TypeScope::Module("Game.dll".to_string()));
        assert!(Arc::ptr_eq(&reference.resolve().unwrap(), &player));
    }
}
