//! Custom attribute annotations and their argument values.
//!
//! An annotation is identified by the type of the attribute it instantiates; the query
//! helpers only ever compare that type's full name. The argument values ride along so a
//! generator can read `[Serialize(Order = 2)]` style options once it found the attribute.

use std::sync::Arc;

use crate::metadata::typesystem::TypeRefRc;

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute` instances for storage on parent objects
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// A custom attribute applied to a type, method or field
#[derive(Clone)]
pub struct CustomAttribute {
    /// The attribute class this annotation instantiates
    pub attribute_type: TypeRefRc,
    /// Constructor arguments and named arguments
    pub value: CustomAttributeValue,
}

impl CustomAttribute {
    /// Create an annotation without arguments
    ///
    /// ## Arguments
    /// * 'attribute_type' - Reference to the attribute class
    pub fn new(attribute_type: TypeRefRc) -> Self {
        CustomAttribute {
            attribute_type,
            value: CustomAttributeValue::default(),
        }
    }

    /// Append a constructor argument
    #[must_use]
    pub fn with_fixed_arg(mut self, arg: CustomAttributeArgument) -> Self {
        self.value.fixed_args.push(arg);
        self
    }

    /// Append a named field or property argument
    #[must_use]
    pub fn with_named_arg(mut self, arg: CustomAttributeNamedArgument) -> Self {
        self.value.named_args.push(arg);
        self
    }

    /// Full name of the attribute type, e.g. `FlaxEngine.SerializeAttribute`
    #[must_use]
    pub fn fullname(&self) -> String {
        self.attribute_type.fullname()
    }

    /// Look up a named argument by field or property name
    #[must_use]
    pub fn named_arg(&self, name: &str) -> Option<&CustomAttributeArgument> {
        self.value
            .named_args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

/// Represents the arguments of a custom attribute
#[derive(Debug, Clone, Default)]
pub struct CustomAttributeValue {
    /// Fixed arguments from the constructor signature
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string, `None` for a null string
    String(Option<String>),
    /// Type reference (as full name)
    Type(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
    /// Enum value (enum type full name + underlying value)
    Enum(String, Box<CustomAttributeArgument>),
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}
