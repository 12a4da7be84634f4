//! .NET type system representation for metadata queries.
//!
//! This module provides the type definitions and type references the query helpers work
//! on. Definitions ([`CilType`]) are owned by the [`TypeRegistry`] of their module;
//! everything else points at them through weak [`CilTypeRef`]s or through
//! [`TypeReference`]s that resolve on demand.
//!
//! # Key Components
//!
//! - [`CilType`]: A type definition with its members, base type and interfaces
//! - [`TypeReference`]: A possibly unresolved pointer to a definition, with a [`TypeScope`]
//! - [`TypeRegistry`]: Per-module storage of definitions, ordered by token
//! - [`TypeBuilder`]: Fluent construction and registration of definitions
//!
//! # Naming
//!
//! Full names follow ECMA-335 / reflection conventions: `Namespace.Name` for top-level
//! types, plain `Name` in the global namespace and `Enclosing/Name` for nested types.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let module = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//!
//! let outer = TypeBuilder::new(&module, Token::new(0x0200_0002))
//!     .namespace("Game")
//!     .name("Player")
//!     .build()?;
//! let inner = TypeBuilder::new(&module, Token::new(0x0200_0003))
//!     .name("State")
//!     .enclosing(&outer)
//!     .build()?;
//!
//! assert_eq!(inner.fullname(), "Game.Player/State");
//! assert_eq!(module.types().get_by_fullname("Game.Player/State").unwrap().token, inner.token);
//! # Ok::<(), cilquery::Error>(())
//! ```

mod base;
mod builder;
mod registry;

use std::sync::{Arc, OnceLock, Weak};

use bitflags::bitflags;

pub use base::{CilTypeRef, CilTypeRefList, TypeRefList, TypeRefRc, TypeReference, TypeScope};
pub use builder::TypeBuilder;
pub use registry::TypeRegistry;

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        field::FieldList,
        method::{GenericParamList, MethodList},
        module::{CilModule, CilModuleRc},
        token::Token,
    },
    Result,
};

/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

/// Bitmask for visibility extraction
pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    /// `TypeAttributes` (ECMA-335 §II.23.1.15)
    pub struct TypeAttributes: u32 {
        /// Type is visible outside its assembly
        const PUBLIC = 0x0000_0001;
        /// Nested type with public visibility
        const NESTED_PUBLIC = 0x0000_0002;
        /// Nested type with private visibility
        const NESTED_PRIVATE = 0x0000_0003;
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type can not be derived from
        const SEALED = 0x0000_0100;
        /// Type has a special name
        const SPECIAL_NAME = 0x0000_0400;
        /// Type is imported from a COM type library
        const IMPORT = 0x0000_1000;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
        /// Static constructor may run before first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
    }
}

/// A type definition: the named entity a module declares, with its members.
///
/// Collections keep declaration order. `base` is absent for `System.Object`, interfaces
/// and other roots.
pub struct CilType {
    /// Token
    pub token: Token,
    /// `TypeNamespace` (empty for nested types and the global namespace)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Flags
    pub flags: TypeAttributes,
    /// The scope of this definition: the module that declares it
    pub scope: TypeScope,
    module: Weak<CilModule>,
    base: OnceLock<TypeRefRc>,
    enclosing_type: OnceLock<CilTypeRef>,
    /// All interfaces this type implements directly
    pub interfaces: TypeRefList,
    /// All methods this type has
    pub methods: MethodList,
    /// All fields this type has
    pub fields: FieldList,
    /// All types that are 'contained' in this type
    pub nested_types: CilTypeRefList,
    /// All generic parameters this type has
    pub generic_params: GenericParamList,
    /// All custom attributes this type has
    pub custom_attributes: CustomAttributeList,
}

impl CilType {
    /// Create a new instance of a `CilType`, declared by `module`
    pub fn new(
        module: &CilModuleRc,
        token: Token,
        namespace: String,
        name: String,
        flags: TypeAttributes,
    ) -> Self {
        CilType {
            token,
            namespace,
            name,
            flags,
            scope: TypeScope::Module(module.name.clone()),
            module: Arc::downgrade(module),
            base: OnceLock::new(),
            enclosing_type: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            fields: Arc::new(boxcar::Vec::new()),
            nested_types: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Returns the full name of the entity
    #[must_use]
    pub fn fullname(&self) -> String {
        match self.enclosing_type() {
            Some(enclosing) => format!("{}/{}", enclosing.fullname(), self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Access the base type reference of this type, if it exists
    #[must_use]
    pub fn base(&self) -> Option<TypeRefRc> {
        self.base.get().cloned()
    }

    /// Set the base type reference
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the base type has already been set.
    pub fn set_base(&self, base: TypeRefRc) -> Result<()> {
        self.base
            .set(base)
            .map_err(|_| malformed_error!("Base type of {} already set", self.fullname()))
    }

    /// The type this one is nested in, if any
    #[must_use]
    pub fn enclosing_type(&self) -> Option<CilTypeRc> {
        self.enclosing_type.get().and_then(CilTypeRef::upgrade)
    }

    /// Nest `nested` inside this type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `nested` is already nested in another type.
    pub fn add_nested_type(self: &Arc<Self>, nested: &CilTypeRc) -> Result<()> {
        let previous = nested.fullname();
        nested
            .enclosing_type
            .set(CilTypeRef::new(self))
            .map_err(|_| malformed_error!("Type {} is already nested", nested.name))?;
        self.nested_types.push(CilTypeRef::new(nested));

        if let Some(module) = nested.module() {
            module.types().refresh_fullname(nested, &previous);
        }
        Ok(())
    }

    /// The module that declares this type, if it is still alive
    #[must_use]
    pub fn module(&self) -> Option<CilModuleRc> {
        self.module.upgrade()
    }

    pub(crate) fn module_weak(&self) -> Weak<CilModule> {
        self.module.clone()
    }

    /// Create a reference bound to this definition
    #[must_use]
    pub fn as_reference(self: &Arc<Self>) -> TypeRefRc {
        TypeReference::from_definition(self)
    }

    /// Check if this type is nested in another one
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.enclosing_type.get().is_some()
    }

    /// Check if this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeAttributes::INTERFACE)
    }

    /// Check if this type is abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeAttributes::ABSTRACT)
    }

    /// Check if this type is sealed
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags.contains(TypeAttributes::SEALED)
    }

    /// Check if this type is visible outside its assembly
    #[must_use]
    pub fn is_public(&self) -> bool {
        let visibility = self.flags.bits() & TYPE_VISIBILITY_MASK;
        visibility == TypeAttributes::PUBLIC.bits()
            || visibility == TypeAttributes::NESTED_PUBLIC.bits()
    }

    /// Check if this type declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }
}

impl std::fmt::Debug for CilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CilType")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
