//! Builder for type definitions.
//!
//! [`TypeBuilder`] offers a fluent API to declare a type with its base type, interfaces,
//! members and attributes, and registers it in the [`crate::metadata::typesystem::TypeRegistry`]
//! of its module on [`TypeBuilder::build`]. Members keep the order in which they were added.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let module = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//!
//! let actor = TypeBuilder::new(&module, Token::new(0x0200_0002))
//!     .namespace("Game")
//!     .name("Actor")
//!     .flags(TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT)
//!     .build()?;
//!
//! let player = TypeBuilder::new(&module, Token::new(0x0200_0003))
//!     .namespace("Game")
//!     .name("Player")
//!     .extends(&actor)
//!     .field(Field::new(Token::new(0x0400_0001), "Health"))
//!     .build()?;
//!
//! assert_eq!(player.base().unwrap().fullname(), "Game.Actor");
//! assert_eq!(player.fields.count(), 1);
//! # Ok::<(), cilquery::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::CustomAttribute,
        field::Field,
        method::{GenericParam, Method},
        module::CilModuleRc,
        token::Token,
        typesystem::{CilType, CilTypeRc, TypeAttributes, TypeRefRc, TypeReference},
    },
    Result,
};

/// Provides a fluent API for building type definitions
pub struct TypeBuilder {
    /// Module which declares the type
    module: CilModuleRc,
    token: Token,
    namespace: String,
    name: String,
    flags: TypeAttributes,
    base: Option<TypeRefRc>,
    enclosing: Option<CilTypeRc>,
    interfaces: Vec<TypeRefRc>,
    methods: Vec<Method>,
    fields: Vec<Field>,
    generic_params: Vec<String>,
    attributes: Vec<CustomAttribute>,
}

impl TypeBuilder {
    /// Create a new builder for a type declared in `module`
    ///
    /// ## Arguments
    /// * 'module' - The module which declares the type
    /// * 'token'  - The `TypeDef` token
    pub fn new(module: &CilModuleRc, token: Token) -> Self {
        TypeBuilder {
            module: module.clone(),
            token,
            namespace: String::new(),
            name: String::new(),
            flags: TypeAttributes::empty(),
            base: None,
            enclosing: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            generic_params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the namespace
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the `TypeAttributes`
    #[must_use]
    pub fn flags(mut self, flags: TypeAttributes) -> Self {
        self.flags = flags;
        self
    }

    /// Set the base type reference
    #[must_use]
    pub fn base(mut self, base: TypeRefRc) -> Self {
        self.base = Some(base);
        self
    }

    /// Derive from a definition (of any module)
    #[must_use]
    pub fn extends(self, base: &CilTypeRc) -> Self {
        self.base(TypeReference::from_definition(base))
    }

    /// Nest the type inside `enclosing`
    #[must_use]
    pub fn enclosing(mut self, enclosing: &CilTypeRc) -> Self {
        self.enclosing = Some(enclosing.clone());
        self
    }

    /// Add a directly implemented interface
    #[must_use]
    pub fn interface(mut self, interface: TypeRefRc) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a field
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a generic parameter
    #[must_use]
    pub fn generic_param(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the type and register it in its module
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no name was given, or
    /// [`crate::Error::TypeInsert`] if the token is already taken in the module.
    pub fn build(self) -> Result<CilTypeRc> {
        if self.name.is_empty() {
            return Err(malformed_error!("Type {} has no name", self.token));
        }

        let namespace = if self.enclosing.is_some() {
            String::new()
        } else {
            self.namespace
        };

        let new_type = Arc::new(CilType::new(
            &self.module,
            self.token,
            namespace,
            self.name,
            self.flags,
        ));

        if let Some(base) = self.base {
            new_type.set_base(base)?;
        }
        for interface in self.interfaces {
            new_type.interfaces.push(interface);
        }
        for method in self.methods {
            let method = Arc::new(method);
            method.set_declaring_type(&new_type);
            new_type.methods.push(method);
        }
        for field in self.fields {
            new_type.fields.push(Arc::new(field));
        }
        for (number, name) in self.generic_params.into_iter().enumerate() {
            new_type
                .generic_params
                .push(GenericParam::new(number as u16, &name));
        }
        for attribute in self.attributes {
            new_type.custom_attributes.push(Arc::new(attribute));
        }

        self.module.types().insert(&new_type)?;
        if let Some(enclosing) = &self.enclosing {
            enclosing.add_nested_type(&new_type)?;
        }
        Ok(new_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::method::Param,
        test::{assembly_identity, class, external_ref, module},
        Error,
    };

    #[test]
    fn test_build_with_members_in_order() {
        let module = module("Game.dll", "Game");
        let player = class(&module, 1, "Game", "Player")
            .method(Method::new(Token::new(0x0600_0001), "Spawn", vec![]))
            .method(Method::new(
                Token::new(0x0600_0002),
                "Spawn",
                vec![Param::new(1, "at")],
            ))
            .field(Field::new(Token::new(0x0400_0001), "Health"))
            .field(Field::new(Token::new(0x0400_0002), "Armor"))
            .generic_param("T")
            .build()
            .unwrap();

        let methods: Vec<usize> = player.methods.iter().map(|(_, m)| m.params.len()).collect();
        assert_eq!(methods, vec![0, 1]);
        let fields: Vec<&str> = player.fields.iter().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(fields, vec!["Health", "Armor"]);
        assert!(player.is_generic());

        let (_, spawn) = player.methods.iter().next().unwrap();
        assert_eq!(spawn.declaring_type().unwrap().token, player.token);
    }

    #[test]
    fn test_build_with_references() {
        let module = module("Game.dll", "Game");
        let flax = assembly_identity("FlaxEngine.CSharp");
        let object = external_ref(&module, 1, "FlaxEngine", "Object", flax.clone());
        let serializable = external_ref(&module, 2, "FlaxEngine", "ISerializable", flax.clone());
        let attribute = external_ref(&module, 3, "FlaxEngine", "HideInEditorAttribute", flax);

        let player = class(&module, 1, "Game", "Player")
            .base(object)
            .interface(serializable)
            .attribute(CustomAttribute::new(attribute))
            .build()
            .unwrap();

        assert_eq!(player.base().unwrap().fullname(), "FlaxEngine.Object");
        assert_eq!(player.interfaces.count(), 1);
        assert_eq!(player.custom_attributes.count(), 1);
    }

    #[test]
    fn test_nested_namespace_dropped() {
        let module = module("Game.dll", "Game");
        let outer = class(&module, 1, "Game", "Outer").build().unwrap();
        let inner = class(&module, 2, "Game", "Inner")
            .enclosing(&outer)
            .build()
            .unwrap();
        assert!(inner.namespace.is_empty());
        assert_eq!(inner.fullname(), "Game.Outer/Inner");
    }

    #[test]
    fn test_build_errors() {
        let module = module("Game.dll", "Game");
        assert!(matches!(
            TypeBuilder::new(&module, Token::new(0x0200_0001)).build(),
            Err(Error::Malformed { .. })
        ));

        class(&module, 1, "Game", "A").build().unwrap();
        assert!(matches!(
            class(&module, 1, "Game", "B").build(),
            Err(Error::TypeInsert(_))
        ));
    }
}
