//! Custom attribute annotations attached to types, methods and fields.
//!
//! Attributes are stored in declaration order on their owner. Matching an attribute is
//! always done on the full name of its attribute type, see
//! [`crate::metadata::query::TypeQueryExt::has_attribute`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let module = CilModule::new(
//!     "Game.dll",
//!     "Game.dll",
//!     AssemblyIdentity::parse("Game")?,
//!     &cache,
//! );
//! let flax = AssemblyIdentity::parse("FlaxEngine.CSharp")?;
//! let serialize = TypeReference::external(
//!     &module,
//!     Token::new(0x0100_0001),
//!     "FlaxEngine",
//!     "SerializeAttribute",
//!     flax,
//! );
//!
//! let attribute = CustomAttribute::new(serialize).with_named_arg(CustomAttributeNamedArgument {
//!     is_field: false,
//!     name: "Order".to_string(),
//!     value: CustomAttributeArgument::I4(2),
//! });
//!
//! assert_eq!(attribute.fullname(), "FlaxEngine.SerializeAttribute");
//! assert_eq!(attribute.named_arg("Order"), Some(&CustomAttributeArgument::I4(2)));
//! # Ok::<(), cilquery::Error>(())
//! ```

mod types;

pub use types::*;
