//! In-memory .NET metadata model and the queries built on it.
//!
//! The model mirrors what a loaded assembly exposes to a code generator: assemblies made
//! of modules, modules declaring types and referencing other assemblies, types with their
//! members and annotations, and type references that resolve across assembly boundaries.
//! It is populated programmatically through [`typesystem::TypeBuilder`] and the
//! constructors of the individual entities.
//!
//! # Key Components
//!
//! - [`token`] - Metadata table row references used throughout .NET
//! - [`identity`] - Assembly names, versions and public key tokens
//! - [`typesystem`] - Type definitions, type references and their scopes
//! - [`method`] - Methods, parameters and generic method instances
//! - [`field`] - Fields
//! - [`customattributes`] - Custom attribute annotations
//! - [`module`] / [`assembly`] - Containers of definitions and references
//! - [`resolver`] - Materializing referenced assemblies
//! - [`query`] - Lookup helpers for code generators
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilquery::prelude::*;
//!
//! let cache = Arc::new(AssemblyCache::new());
//! let lib = CilModule::new("Lib.dll", "Lib.dll", AssemblyIdentity::parse("Lib")?, &cache);
//! let outer = TypeBuilder::new(&lib, Token::new(0x0200_0002)).namespace("Lib").name("Outer").build()?;
//! TypeBuilder::new(&lib, Token::new(0x0200_0003)).name("Inner").enclosing(&outer).build()?;
//! let assembly = CilAssembly::new(AssemblyIdentity::parse("Lib")?);
//! assembly.add_module(lib);
//! cache.register(Arc::new(assembly));
//!
//! let game = CilModule::new("Game.dll", "Game.dll", AssemblyIdentity::parse("Game")?, &cache);
//! game.add_assembly_reference(AssemblyIdentity::parse("Lib")?);
//!
//! let inner = game.get_type("Lib.Outer/Inner")?;
//! assert_eq!(inner.scope.name(), "Lib");
//! assert!(game.try_get_type_reference("Lib.Outer/Inner").is_some());
//! # Ok::<(), cilquery::Error>(())
//! ```

/// Assemblies and their modules
pub mod assembly;
/// Custom attribute annotations
pub mod customattributes;
/// Field definitions
pub mod field;
/// Assembly identities and versions
pub mod identity;
/// Method definitions, parameters and generic instances
pub mod method;
/// Modules, their type-reference tables and assembly references
pub mod module;
/// Query helpers for code generators
pub mod query;
/// Resolution of referenced assemblies
pub mod resolver;
/// Metadata tokens
pub mod token;
/// Type definitions, references and the per-module registry
pub mod typesystem;
