//! Query helpers for code generators.
//!
//! The helpers answer the questions a build-time generator keeps asking about loaded
//! assemblies: does a type carry an attribute, which overload of a method to bind, does
//! a type derive from the engine's scripting root, can its base chain be resolved at all,
//! and where does a type by name come from. They hold no state between calls.
//!
//! The helpers are extension traits over the model:
//!
//! - [`TypeQueryExt`] on [`CilType`]: attribute, interface and member lookup, scripting
//!   object check
//! - [`FieldQueryExt`] on [`Field`]: attribute lookup
//! - [`MethodQueryExt`] on [`MethodRc`]: attribute lookup, generic inflation
//! - [`TypeRefQueryExt`] on [`TypeReference`]: scripting object check, resolvability of
//!   the base chain
//! - [`ModuleQueryExt`] on [`CilModuleRc`]: type lookup across referenced assemblies
//!
//! # Failure Handling
//!
//! Lookups that the caller expects to succeed (`get_method`, `get_field`, `get_type`)
//! return a distinguishable [`crate::Error`]. The base chain walks (`is_scripting_object`,
//! `can_be_resolved`) never fail: a reference that does not resolve answers `false`.
//! Matching is always exact on full names or member names, and first match in declaration
//! order wins.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let flax = AssemblyIdentity::parse("FlaxEngine.CSharp")?;
//! let engine = CilModule::new("FlaxEngine.CSharp.dll", "FlaxEngine.CSharp.dll", flax.clone(), &cache);
//! let object = TypeBuilder::new(&engine, Token::new(0x0200_0002))
//!     .namespace("FlaxEngine")
//!     .name("Object")
//!     .build()?;
//! let script = TypeBuilder::new(&engine, Token::new(0x0200_0003))
//!     .namespace("FlaxEngine")
//!     .name("Script")
//!     .extends(&object)
//!     .build()?;
//! let engine_assembly = CilAssembly::new(flax);
//! engine_assembly.add_module(engine);
//! cache.register(Arc::new(engine_assembly));
//!
//! let game = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//! let player = TypeBuilder::new(&game, Token::new(0x0200_0002))
//!     .namespace("Game")
//!     .name("Player")
//!     .extends(&script)
//!     .build()?;
//!
//! assert!(player.is_scripting_object());
//! assert!(player.as_reference().can_be_resolved());
//! # Ok::<(), cilquery::Error>(())
//! ```

mod generics;
mod hierarchy;
mod lookup;
mod members;

pub use hierarchy::is_scripting_object_ref;
pub use lookup::find_type_within;

use crate::{
    metadata::{
        field::{Field, FieldRc},
        method::{GenericInstanceMethod, MethodRc},
        module::CilModuleRc,
        typesystem::{CilType, TypeRefRc, TypeReference},
    },
    Result,
};

/// Full name of the root type of all engine scripting objects
pub const SCRIPTING_OBJECT_TYPE: &str = "FlaxEngine.Object";
/// Scope name of Windows Runtime metadata, which is never available at build time
pub const WINDOWS_RUNTIME_SCOPE: &str = "Windows";
/// Scope name of the core library, where base chains end
pub const CORE_LIBRARY_SCOPE: &str = "mscorlib";

/// Queries on type definitions
pub trait TypeQueryExt {
    /// Check if a custom attribute with the exact attribute type full name is applied
    fn has_attribute(&self, fullname: &str) -> bool;

    /// Check if an interface with the exact full name is implemented directly; interfaces
    /// inherited from base types are not considered
    fn has_interface(&self, fullname: &str) -> bool;

    /// Check if a method with the exact name is declared
    fn has_method(&self, name: &str) -> bool;

    /// Get the first declared method with the exact name
    ///
    /// # Errors
    /// Returns [`crate::Error::MethodNotFound`] if no such method is declared.
    fn get_method(&self, name: &str) -> Result<MethodRc>;

    /// Get the first declared method with the exact name and `arg_count` parameters
    ///
    /// # Errors
    /// Returns [`crate::Error::MethodNotFound`] if no such method is declared.
    fn get_method_with_args(&self, name: &str, arg_count: usize) -> Result<MethodRc>;

    /// Get the first declared field with the exact name
    ///
    /// # Errors
    /// Returns [`crate::Error::FieldNotFound`] if no such field is declared.
    fn get_field(&self, name: &str) -> Result<FieldRc>;

    /// Check if this type is [`SCRIPTING_OBJECT_TYPE`] or derives from it.
    ///
    /// A base type reference that can not be resolved ends the walk with `false`.
    fn is_scripting_object(&self) -> bool;
}

/// Queries on field definitions
pub trait FieldQueryExt {
    /// Check if a custom attribute with the exact attribute type full name is applied
    fn has_attribute(&self, fullname: &str) -> bool;
}

/// Queries on method definitions
pub trait MethodQueryExt {
    /// Check if a custom attribute with the exact attribute type full name is applied
    fn has_attribute(&self, fullname: &str) -> bool;

    /// Instantiate this method with a single type argument.
    ///
    /// The argument is not checked against the generic parameters the method declares.
    fn inflate_generic(&self, argument: TypeRefRc) -> GenericInstanceMethod;
}

/// Queries on type references
pub trait TypeRefQueryExt {
    /// Check if the referenced type is [`SCRIPTING_OBJECT_TYPE`] or derives from it.
    ///
    /// A reference named like the scripting root answers `true` without resolving it;
    /// any reference on the chain that fails to resolve answers `false`.
    fn is_scripting_object(&self) -> bool;

    /// Check if the base chain of the referenced type can be resolved.
    ///
    /// Walking up from this reference, a scope named [`WINDOWS_RUNTIME_SCOPE`] answers
    /// `false` right away, a scope named [`CORE_LIBRARY_SCOPE`] answers whether that
    /// reference resolves, and any other reference has to resolve for the walk to go on.
    /// Reaching a type without base type answers `true`.
    fn can_be_resolved(&self) -> bool;
}

/// Queries on modules
pub trait ModuleQueryExt {
    /// Find a type by full name from the point of view of this module.
    ///
    /// The type-reference table is consulted first. Otherwise the main modules of all
    /// referenced assemblies are searched, in reference order, through their top-level
    /// types and depth first through nested types. The first match is imported into this
    /// module and the imported reference is returned. Referenced assemblies which can not
    /// be resolved, or have no main module, are skipped.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFoundInModule`] if no referenced assembly defines
    /// the type.
    fn get_type(&self, fullname: &str) -> Result<TypeRefRc>;
}

impl TypeQueryExt for CilType {
    fn has_attribute(&self, fullname: &str) -> bool {
        members::has_attribute(&self.custom_attributes, fullname)
    }

    fn has_interface(&self, fullname: &str) -> bool {
        members::has_interface(self, fullname)
    }

    fn has_method(&self, name: &str) -> bool {
        members::find_method(self, name, None).is_some()
    }

    fn get_method(&self, name: &str) -> Result<MethodRc> {
        members::get_method(self, name, None)
    }

    fn get_method_with_args(&self, name: &str, arg_count: usize) -> Result<MethodRc> {
        members::get_method(self, name, Some(arg_count))
    }

    fn get_field(&self, name: &str) -> Result<FieldRc> {
        members::get_field(self, name)
    }

    fn is_scripting_object(&self) -> bool {
        hierarchy::type_is_scripting_object(self)
    }
}

impl FieldQueryExt for Field {
    fn has_attribute(&self, fullname: &str) -> bool {
        members::has_attribute(&self.custom_attributes, fullname)
    }
}

impl MethodQueryExt for MethodRc {
    fn has_attribute(&self, fullname: &str) -> bool {
        members::has_attribute(&self.custom_attributes, fullname)
    }

    fn inflate_generic(&self, argument: TypeRefRc) -> GenericInstanceMethod {
        generics::inflate(self, argument)
    }
}

impl TypeRefQueryExt for TypeReference {
    fn is_scripting_object(&self) -> bool {
        hierarchy::reference_is_scripting_object(self)
    }

    fn can_be_resolved(&self) -> bool {
        hierarchy::can_be_resolved(self)
    }
}

impl ModuleQueryExt for CilModuleRc {
    fn get_type(&self, fullname: &str) -> Result<TypeRefRc> {
        lookup::get_type(self, fullname)
    }
}
