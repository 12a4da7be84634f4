//! Method definitions and generic method instances.
//!
//! A [`Method`] is declared by exactly one [`crate::metadata::typesystem::CilType`] and keeps
//! its parameters in signature order; the parameter count is what overload lookups by arity
//! compare against. [`GenericInstanceMethod`] binds type arguments to a generic method.
//!
//! # Examples
//!
//! ```rust
//! use cilquery::metadata::{
//!     method::{Method, MethodAccessFlags, MethodModifiers, Param},
//!     token::Token,
//! };
//!
//! let method = Method::new(
//!     Token::new(0x0600_0001),
//!     "Spawn",
//!     vec![Param::new(1, "prefab"), Param::new(2, "parent")],
//! )
//! .with_flags(0x0006 | 0x0010)
//! .with_generic_param("T");
//!
//! assert_eq!(method.param_count(), 2);
//! assert!(method.is_generic());
//! assert_eq!(method.access(), MethodAccessFlags::PUBLIC);
//! assert!(method.modifiers().contains(MethodModifiers::STATIC));
//! ```

mod generic;
mod types;

use std::sync::{Arc, OnceLock};

pub use generic::GenericInstanceMethod;
pub use types::*;

use crate::metadata::{
    customattributes::{CustomAttribute, CustomAttributeList},
    token::Token,
    typesystem::{CilTypeRc, CilTypeRef, TypeRefRc},
};

/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;
/// A vector that holds a list of `Method` in declaration order
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A vector that holds a list of `GenericParam`
pub type GenericParamList = Arc<boxcar::Vec<GenericParam>>;

/// A method definition
pub struct Method {
    /// `MethodDef` token
    pub token: Token,
    /// Method name
    pub name: String,
    /// Raw `MethodAttributes`
    pub flags: u32,
    /// Parameters in signature order, excluding the return value
    pub params: Vec<Param>,
    /// Generic parameters declared by the method
    pub generic_params: GenericParamList,
    /// Return type, `None` for `void` or when not recorded
    pub return_type: Option<TypeRefRc>,
    /// Custom attributes applied to the method
    pub custom_attributes: CustomAttributeList,
    declaring_type: OnceLock<CilTypeRef>,
}

impl Method {
    /// Create a new method
    ///
    /// ## Arguments
    /// * 'token'  - The `MethodDef` token
    /// * 'name'   - Name of the method
    /// * 'params' - Parameters in signature order
    pub fn new(token: Token, name: &str, params: Vec<Param>) -> Self {
        Method {
            token,
            name: name.to_string(),
            flags: 0,
            params,
            generic_params: Arc::new(boxcar::Vec::new()),
            return_type: None,
            custom_attributes: Arc::new(boxcar::Vec::new()),
            declaring_type: OnceLock::new(),
        }
    }

    /// Set the raw `MethodAttributes`
    #[must_use]
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Declare a generic parameter; slots are numbered in call order
    #[must_use]
    pub fn with_generic_param(self, name: &str) -> Self {
        let number = self.generic_params.count() as u16;
        self.generic_params.push(GenericParam::new(number, name));
        self
    }

    /// Set the return type
    #[must_use]
    pub fn with_return_type(mut self, return_type: TypeRefRc) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn with_attribute(self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(Arc::new(attribute));
        self
    }

    /// Number of declared parameters
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Check if the method declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Access flags of the method
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_method_flags(self.flags)
    }

    /// Modifiers of the method
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Check if the method is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// The type declaring this method, if it is still alive
    #[must_use]
    pub fn declaring_type(&self) -> Option<CilTypeRc> {
        self.declaring_type.get().and_then(CilTypeRef::upgrade)
    }

    pub(crate) fn set_declaring_type(&self, declaring: &CilTypeRc) {
        self.declaring_type.set(CilTypeRef::new(declaring)).ok();
    }

    /// Returns `Type::Name`, or just the name for detached methods
    #[must_use]
    pub fn fullname(&self) -> String {
        match self.declaring_type() {
            Some(declaring) => format!("{}::{}", declaring.fullname(), self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("token", &self.token)
            .field("name", &self.fullname())
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{assembly_identity, class, external_ref, module};

    #[test]
    fn test_fullname_uses_declaring_type() {
        let detached = Method::new(Token::new(0x0600_0001), "Update", vec![]);
        assert_eq!(detached.fullname(), "Update");

        let module = module("Game.dll", "Game");
        let player = class(&module, 1, "Game", "Player")
            .method(Method::new(Token::new(0x0600_0002), "Update", vec![]))
            .build()
            .unwrap();
        let (_, update) = player.methods.iter().next().unwrap();
        assert_eq!(update.fullname(), "Game.Player::Update");
    }

    #[test]
    fn test_generic_params_numbered_in_order() {
        let method = Method::new(Token::new(0x0600_0001), "Convert", vec![])
            .with_generic_param("TFrom")
            .with_generic_param("TTo");

        let params: Vec<(u16, String)> = method
            .generic_params
            .iter()
            .map(|(_, p)| (p.number, p.name.clone()))
            .collect();
        assert_eq!(
            params,
            vec![(0, "TFrom".to_string()), (1, "TTo".to_string())]
        );
    }

    #[test]
    fn test_signature_types() {
        let module = module("Game.dll", "Game");
        let engine = assembly_identity("FlaxEngine.CSharp");
        let actor = external_ref(&module, 1, "FlaxEngine", "Actor", engine.clone());
        let vector = external_ref(&module, 2, "FlaxEngine", "Vector3", engine);

        let method = Method::new(
            Token::new(0x0600_0001),
            "Spawn",
            vec![Param::new(1, "position").with_type(vector)],
        )
        .with_return_type(actor);

        assert_eq!(
            method.return_type.as_ref().map(|t| t.fullname()),
            Some("FlaxEngine.Actor".to_string())
        );
        assert_eq!(
            method.params[0].param_type.as_ref().map(|t| t.fullname()),
            Some("FlaxEngine.Vector3".to_string())
        );
        assert!(Param::new(1, "untyped").param_type.is_none());
    }

    #[test]
    fn test_static_flag() {
        let method = Method::new(Token::new(0x0600_0001), "Create", vec![]).with_flags(0x0016);
        assert!(method.is_static());
        assert!(!Method::new(Token::new(0x0600_0002), "Run", vec![]).is_static());
    }
}
