// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! # cilquery
//!
//! Query helpers over an in-memory .NET (ECMA-335) metadata model, made for build-time
//! code generators that need short and deterministic answers about assemblies which are
//! already loaded.
//!
//! The crate has two layers:
//!
//! - [`metadata`] - the object model: assemblies, modules, type definitions, type references
//!   with their scopes, methods, fields, custom attributes and the [`metadata::resolver`] seam
//!   which materializes referenced assemblies.
//! - [`metadata::query`] - extension traits that turn common generator questions into one call:
//!   attribute and interface presence, member lookup, base chain walks, generic method
//!   inflation and cross-module type lookup.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let identity = AssemblyIdentity::parse("Game, Version=1.0.0.0")?;
//! let module = CilModule::new("Game.dll", "Game.dll", identity.clone(), &cache);
//!
//! let player = TypeBuilder::new(&module, Token::new(0x0200_0002))
//!     .namespace("Game")
//!     .name("Player")
//!     .method(Method::new(Token::new(0x0600_0001), "Update", vec![]))
//!     .build()?;
//!
//! assert!(player.has_method("Update"));
//! assert!(player.get_method("Jump").is_err());
//!
//! let assembly = CilAssembly::new(identity);
//! assembly.add_module(module);
//! cache.register(Arc::new(assembly));
//! # Ok::<(), cilquery::Error>(())
//! ```

#![doc(html_no_source)]
#![deny(missing_docs)]

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use cilquery::prelude::*;
///
/// let token = Token::new(0x0200_0001);
/// assert_eq!(token.table(), 0x02);
/// ```
pub mod prelude;

/// The in-memory metadata model and the query helpers built on top of it.
///
/// # Key Components
///
/// ## Model
/// - [`metadata::typesystem`] - type definitions ([`metadata::typesystem::CilType`]), references
///   ([`metadata::typesystem::TypeReference`]) and the per-module registry
/// - [`metadata::method`] - method definitions, parameters and generic instances
/// - [`metadata::field`] - field definitions
/// - [`metadata::customattributes`] - custom attribute annotations
/// - [`metadata::module`] / [`metadata::assembly`] - containers and the type-reference table
/// - [`metadata::resolver`] - turning assembly references into loaded assemblies
///
/// ## Queries
/// - [`metadata::query`] - `has_attribute`, `get_method`, `is_scripting_object`,
///   `can_be_resolved`, `inflate_generic`, `get_type` and friends
pub mod metadata;

/// `cilquery` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilquery` Error type
///
/// See [`Error`] for the full list of variants. Lookups which can legitimately fail
/// for a caller return one of the `*NotFound*` variants so they can be told apart from
/// resolution failures.
///
/// ```rust
/// use cilquery::Error;
///
/// let err = Error::MethodNotFound {
///     type_name: "Game.Player".to_string(),
///     method: "Jump".to_string(),
/// };
/// assert_eq!(err.to_string(), "Failed to find method Jump in type Game.Player");
/// ```
pub use error::Error;
