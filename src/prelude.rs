//! # cilquery Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the cilquery library. Import this module to get the model, the resolver seam and
//! all query traits in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilquery operations
pub use crate::Error;

/// The result type used throughout cilquery
pub use crate::Result;

/// Metadata token type for referencing table entries
pub use crate::metadata::token::{TableId, Token};

// ================================================================================================
// Assemblies and Modules
// ================================================================================================

/// Assembly identities
pub use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion};

/// Containers
pub use crate::metadata::{
    assembly::{CilAssembly, CilAssemblyRc},
    module::{CilModule, CilModuleRc},
};

/// Resolution of referenced assemblies
pub use crate::metadata::resolver::{AssemblyCache, AssemblyResolver};

// ================================================================================================
// Type System
// ================================================================================================

/// Core type system components
pub use crate::metadata::typesystem::{
    CilType, CilTypeRc, CilTypeRef, CilTypeRefList, TypeAttributes, TypeBuilder,
    TypeRefList, TypeRefRc, TypeReference, TypeRegistry, TypeScope,
};

/// Methods and fields
pub use crate::metadata::{
    field::{Field, FieldAttributes, FieldList, FieldRc},
    method::{
        GenericInstanceMethod, GenericParam, Method, MethodAccessFlags, MethodList,
        MethodModifiers, MethodRc, Param,
    },
};

/// Custom attributes
pub use crate::metadata::customattributes::{
    CustomAttribute, CustomAttributeArgument, CustomAttributeList, CustomAttributeNamedArgument,
    CustomAttributeRc, CustomAttributeValue,
};

// ================================================================================================
// Queries
// ================================================================================================

/// Query traits, free functions and well-known names
pub use crate::metadata::query::{
    find_type_within, is_scripting_object_ref, FieldQueryExt, MethodQueryExt, ModuleQueryExt,
    TypeQueryExt, TypeRefQueryExt, CORE_LIBRARY_SCOPE, SCRIPTING_OBJECT_TYPE,
    WINDOWS_RUNTIME_SCOPE,
};
