//! Method attribute flags and parameter types.
//!
//! The raw `MethodAttributes` value (ECMA-335 §II.23.1.10) is split into access flags and
//! modifiers, as generators usually ask "is it public" and "is it static" separately.

use bitflags::bitflags;

use crate::metadata::typesystem::TypeRefRc;

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_retain(flags & METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, dpending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

/// A declared method parameter
#[derive(Debug, Clone)]
pub struct Param {
    /// 1-based position in the signature, 0 is the return value
    pub sequence: u16,
    /// Parameter name
    pub name: String,
    /// Parameter type, when known
    pub param_type: Option<TypeRefRc>,
}

impl Param {
    /// Create an untyped parameter
    pub fn new(sequence: u16, name: &str) -> Self {
        Param {
            sequence,
            name: name.to_string(),
            param_type: None,
        }
    }

    /// Set the parameter type
    #[must_use]
    pub fn with_type(mut self, param_type: TypeRefRc) -> Self {
        self.param_type = Some(param_type);
        self
    }
}

/// A generic parameter slot of a type or method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    /// 0-based position
    pub number: u16,
    /// Parameter name, e.g. `T`
    pub name: String,
}

impl GenericParam {
    /// Create a generic parameter
    pub fn new(number: u16, name: &str) -> Self {
        GenericParam {
            number,
            name: name.to_string(),
        }
    }
}
