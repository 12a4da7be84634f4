use std::sync::{Arc, LazyLock};

use crate::metadata::{
    assembly::CilAssembly,
    identity::{AssemblyIdentity, AssemblyVersion},
    module::{CilModule, CilModuleRc},
    resolver::AssemblyCache,
    token::Token,
    typesystem::{TypeBuilder, TypeRefRc, TypeReference},
};

// Resolver for modules which are never resolved against; knows no assembly
static EMPTY_CACHE: LazyLock<Arc<AssemblyCache>> = LazyLock::new(|| Arc::new(AssemblyCache::new()));

// Helper function to create a culture-neutral identity with version 1.0.0.0
pub fn assembly_identity(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0))
}

// Helper function to create a standalone module, resolving against an empty cache
pub fn module(file_name: &str, assembly: &str) -> CilModuleRc {
    module_with(&EMPTY_CACHE, file_name, assembly)
}

// Helper function to create a module resolving against `cache`, without registering it
pub fn module_with(cache: &Arc<AssemblyCache>, file_name: &str, assembly: &str) -> CilModuleRc {
    CilModule::new(file_name, file_name, assembly_identity(assembly), cache)
}

// Helper function to create a single-module assembly and register it in a new cache
pub fn register(assembly: &str, file_name: &str) -> (Arc<AssemblyCache>, CilModuleRc) {
    let cache = Arc::new(AssemblyCache::new());
    let module = module_with(&cache, file_name, assembly);

    let loaded = CilAssembly::new(assembly_identity(assembly));
    loaded.add_module(module.clone());
    cache.register(Arc::new(loaded));

    (cache, module)
}

// Helper function to start a TypeDef at `row`
pub fn class(module: &CilModuleRc, row: u32, namespace: &str, name: &str) -> TypeBuilder {
    TypeBuilder::new(module, Token::new(0x0200_0000 + row))
        .namespace(namespace)
        .name(name)
}

// Helper function to create a TypeRef at `row`, pointing into `assembly`
pub fn external_ref(
    module: &CilModuleRc,
    row: u32,
    namespace: &str,
    name: &str,
    assembly: AssemblyIdentity,
) -> TypeRefRc {
    TypeReference::external(
        module,
        Token::new(0x0100_0000 + row),
        namespace,
        name,
        assembly,
    )
}
