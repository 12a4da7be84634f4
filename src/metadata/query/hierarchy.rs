//! Base chain walks: scripting object detection and resolvability.
//!
//! Both walks turn resolution failures into `false`. The failure is logged at trace
//! level so a generator run with verbose logging can tell a missing assembly apart from
//! a type that simply does not qualify.

use log::trace;

use crate::metadata::{
    query::{
        TypeQueryExt, TypeRefQueryExt, CORE_LIBRARY_SCOPE, SCRIPTING_OBJECT_TYPE,
        WINDOWS_RUNTIME_SCOPE,
    },
    typesystem::{CilType, TypeRefRc, TypeReference},
};

/// Check if an optional type reference is a scripting object; `None` answers `false`
///
/// ## Arguments
/// * 'reference' - The reference to check, usually a base type
///
/// # Examples
///
/// ```rust
/// use cilquery::metadata::query::is_scripting_object_ref;
///
/// assert!(!is_scripting_object_ref(None));
/// ```
#[must_use]
pub fn is_scripting_object_ref(reference: Option<&TypeRefRc>) -> bool {
    reference.is_some_and(|reference| reference.is_scripting_object())
}

pub(super) fn type_is_scripting_object(cil_type: &CilType) -> bool {
    cil_type.fullname() == SCRIPTING_OBJECT_TYPE
        || is_scripting_object_ref(cil_type.base().as_ref())
}

pub(super) fn reference_is_scripting_object(reference: &TypeReference) -> bool {
    if reference.fullname() == SCRIPTING_OBJECT_TYPE {
        return true;
    }

    match reference.resolve() {
        Ok(definition) => definition.is_scripting_object(),
        Err(error) => {
            trace!(
                "{} is not a scripting object, resolution failed: {}",
                reference.fullname(),
                error
            );
            false
        }
    }
}

enum Walk {
    Finished(bool),
    Continue(Option<TypeRefRc>),
}

fn resolution_step(reference: &TypeReference) -> Walk {
    match reference.scope.name() {
        WINDOWS_RUNTIME_SCOPE => return Walk::Finished(false),
        CORE_LIBRARY_SCOPE => return Walk::Finished(reference.resolve().is_ok()),
        _ => {}
    }

    match reference.resolve() {
        Ok(definition) => Walk::Continue(definition.base()),
        Err(error) => {
            trace!("Base chain of {} is broken: {}", reference.fullname(), error);
            Walk::Finished(false)
        }
    }
}

pub(super) fn can_be_resolved(reference: &TypeReference) -> bool {
    let mut walk = resolution_step(reference);
    loop {
        walk = match walk {
            Walk::Finished(result) => return result,
            Walk::Continue(None) => return true,
            Walk::Continue(Some(base)) => resolution_step(&base),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        metadata::{
            assembly::CilAssembly,
            module::CilModuleRc,
            resolver::AssemblyCache,
            typesystem::CilTypeRc,
        },
        test::{assembly_identity, class, external_ref, module, module_with, register},
    };

    /// FlaxEngine.CSharp defining `FlaxEngine.Object` and `FlaxEngine.Script : Object`
    fn engine() -> (Arc<AssemblyCache>, CilModuleRc, CilTypeRc, CilTypeRc) {
        let (cache, engine) = register("FlaxEngine.CSharp", "FlaxEngine.CSharp.dll");
        let object = class(&engine, 1, "FlaxEngine", "Object").build().unwrap();
        let script = class(&engine, 2, "FlaxEngine", "Script")
            .extends(&object)
            .build()
            .unwrap();
        (cache, engine, object, script)
    }

    #[test]
    fn test_chain_to_scripting_root() {
        let (cache, _engine, object, script) = engine();
        let game = module_with(&cache, "Game.dll", "Game");
        let player = class(&game, 1, "Game", "Player")
            .extends(&script)
            .build()
            .unwrap();

        assert!(object.is_scripting_object());
        assert!(script.is_scripting_object());
        assert!(player.is_scripting_object());
        assert!(player.as_reference().is_scripting_object());
    }

    #[test]
    fn test_chain_to_unrelated_root() {
        let module = module("Game.dll", "Game");
        let root = class(&module, 1, "System", "Object").build().unwrap();
        let item = class(&module, 2, "Game", "Item").extends(&root).build().unwrap();

        assert!(!item.is_scripting_object());
        assert!(!root.is_scripting_object());
        assert!(!is_scripting_object_ref(item.base().as_ref()));
    }

    #[test]
    fn test_unresolvable_base_is_not_scripting_object() {
        let module = module("Game.dll", "Game");
        let missing = external_ref(&module, 1, "Gone", "Base", assembly_identity("Gone"));
        let orphan = class(&module, 1, "Game", "Orphan").base(missing).build().unwrap();

        assert!(!orphan.is_scripting_object());
    }

    #[test]
    fn test_sentinel_reference_needs_no_resolution() {
        let module = module("Game.dll", "Game");
        let object = external_ref(
            &module,
            1,
            "FlaxEngine",
            "Object",
            assembly_identity("FlaxEngine.CSharp"),
        );
        let actor = class(&module, 1, "Game", "Actor").base(object.clone()).build().unwrap();

        assert!(object.is_scripting_object());
        assert!(!object.is_resolved());
        assert!(actor.is_scripting_object());
    }

    #[test]
    fn test_windows_scope_short_circuits() {
        let module = module("Game.dll", "Game");
        let uri = external_ref(
            &module,
            1,
            "Windows.Foundation",
            "Uri",
            assembly_identity("Windows"),
        );

        assert!(!uri.can_be_resolved());
        assert!(!uri.is_resolved());
    }

    #[test]
    fn test_core_library_scope_ends_walk() {
        let (cache, mscorlib) = register("mscorlib", "mscorlib.dll");
        class(&mscorlib, 1, "System", "Object").build().unwrap();

        let game = module_with(&cache, "Game.dll", "Game");
        let object = external_ref(&game, 1, "System", "Object", assembly_identity("mscorlib"));
        let missing = external_ref(&game, 2, "System", "Missing", assembly_identity("mscorlib"));
        let player = class(&game, 1, "Game", "Player").base(object.clone()).build().unwrap();

        assert!(object.can_be_resolved());
        assert!(!missing.can_be_resolved());
        assert!(player.as_reference().can_be_resolved());
    }

    #[test]
    fn test_chain_end_is_resolvable() {
        let module = module("Game.dll", "Game");
        let root = class(&module, 1, "Game", "Root").build().unwrap();
        let leaf = class(&module, 2, "Game", "Leaf").extends(&root).build().unwrap();

        assert!(leaf.as_reference().can_be_resolved());
    }

    #[test]
    fn test_broken_link_is_not_resolvable() {
        let (cache, lib) = register("Lib", "Lib.dll");
        let missing = external_ref(&lib, 1, "Gone", "Base", assembly_identity("Gone"));
        let middle = class(&lib, 1, "Lib", "Middle").base(missing).build().unwrap();

        let game = module_with(&cache, "Game.dll", "Game");
        let leaf = class(&game, 1, "Game", "Leaf").extends(&middle).build().unwrap();

        assert!(!leaf.as_reference().can_be_resolved());
        assert!(!leaf.is_scripting_object());
    }

    #[test]
    fn test_windows_base_stops_walk() {
        let module = module("Game.dll", "Game");
        let winrt = external_ref(&module, 1, "Windows.UI", "Control", assembly_identity("Windows"));
        let custom = class(&module, 1, "Game", "Custom").base(winrt).build().unwrap();

        assert!(!custom.as_reference().can_be_resolved());
    }

    #[test]
    fn test_assembly_without_modules() {
        let cache = Arc::new(AssemblyCache::new());
        cache.register(Arc::new(CilAssembly::new(assembly_identity("Empty"))));
        let game = module_with(&cache, "Game.dll", "Game");
        let reference = external_ref(&game, 1, "Empty", "Type", assembly_identity("Empty"));

        assert!(!reference.can_be_resolved());
        assert!(!reference.is_scripting_object());
    }
}
