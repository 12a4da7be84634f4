//! Field definitions.

use std::sync::Arc;

use crate::metadata::{
    customattributes::{CustomAttribute, CustomAttributeList},
    token::Token,
    typesystem::TypeRefRc,
};

/// A vector that holds a list of `Field`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A reference to a field
pub type FieldRc = Arc<Field>;

#[allow(non_snake_case)]
/// All possible flags for `FieldAttributes`
pub mod FieldAttributes {
    /// These 3 bits contain one of the following values:
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Member not referenceable
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this Assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessibly by anyone in the Assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessibly by sub-types anywhere, plus anyone in assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessibly by anyone who has visibility to this scope
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Field should not be serialized when type is remoted
    pub const NOT_SERIALIZED: u32 = 0x0080;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
}

/// A field definition
pub struct Field {
    /// Token
    pub token: Token,
    /// Field name
    pub name: String,
    /// A bitmask of type `FieldAttributes`, §II.23.1.5
    pub flags: u32,
    /// Declared type of the field, when known
    pub field_type: Option<TypeRefRc>,
    /// Custom attributes applied to this field
    pub custom_attributes: CustomAttributeList,
}

impl Field {
    /// Create a new private instance field
    ///
    /// ## Arguments
    /// * 'token' - The `Field` token
    /// * 'name'  - Name of the field
    pub fn new(token: Token, name: &str) -> Self {
        Field {
            token,
            name: name.to_string(),
            flags: FieldAttributes::PRIVATE,
            field_type: None,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Set the raw `FieldAttributes`
    #[must_use]
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the declared type
    #[must_use]
    pub fn with_type(mut self, field_type: TypeRefRc) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn with_attribute(self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(Arc::new(attribute));
        self
    }

    /// Check if the field is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & FieldAttributes::FIELD_ACCESS_MASK == FieldAttributes::PUBLIC
    }

    /// Check if the field is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags", &format_args!("{:#06x}", self.flags))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{assembly_identity, external_ref, module};

    #[test]
    fn test_access_and_static() {
        let field = Field::new(Token::new(0x0400_0001), "Instance")
            .with_flags(FieldAttributes::PUBLIC | FieldAttributes::STATIC);
        assert!(field.is_public());
        assert!(field.is_static());

        let hidden = Field::new(Token::new(0x0400_0002), "_health");
        assert!(!hidden.is_public());
        assert!(!hidden.is_static());

        // famorassem shares bits with public
        let family = Field::new(Token::new(0x0400_0003), "Shared")
            .with_flags(FieldAttributes::FAM_OR_ASSEM);
        assert!(!family.is_public());
    }

    #[test]
    fn test_field_type() {
        let module = module("Game.dll", "Game");
        let vector = external_ref(
            &module,
            1,
            "FlaxEngine",
            "Vector3",
            assembly_identity("FlaxEngine.CSharp"),
        );

        let position = Field::new(Token::new(0x0400_0001), "Position").with_type(vector);
        assert_eq!(
            position.field_type.as_ref().map(|t| t.fullname()),
            Some("FlaxEngine.Vector3".to_string())
        );
        assert!(Field::new(Token::new(0x0400_0002), "Untyped").field_type.is_none());
    }
}
