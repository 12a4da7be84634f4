//! Assemblies: an identity plus the modules it is made of.

use std::sync::Arc;

use crate::metadata::{identity::AssemblyIdentity, module::CilModuleRc};

/// Reference to a `CilAssembly`
pub type CilAssemblyRc = Arc<CilAssembly>;

/// A loaded assembly.
///
/// The first module added is the main (manifest) module. An assembly without modules is
/// valid but can not provide types.
pub struct CilAssembly {
    /// Identity of the assembly
    pub identity: AssemblyIdentity,
    modules: boxcar::Vec<CilModuleRc>,
}

impl CilAssembly {
    /// Create an assembly without modules
    pub fn new(identity: AssemblyIdentity) -> Self {
        CilAssembly {
            identity,
            modules: boxcar::Vec::new(),
        }
    }

    /// Append a module; the first one becomes the main module
    pub fn add_module(&self, module: CilModuleRc) {
        self.modules.push(module);
    }

    /// The main module, if the assembly has any module
    #[must_use]
    pub fn main_module(&self) -> Option<CilModuleRc> {
        self.modules.get(0).cloned()
    }

    /// Get a module by name
    #[must_use]
    pub fn module(&self, name: &str) -> Option<CilModuleRc> {
        self.modules
            .iter()
            .find(|(_, module)| module.name == name)
            .map(|(_, module)| module.clone())
    }

    /// All modules, main module first
    #[must_use]
    pub fn modules(&self) -> Vec<CilModuleRc> {
        self.modules.iter().map(|(_, module)| module.clone()).collect()
    }
}

impl std::fmt::Debug for CilAssembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CilAssembly")
            .field("identity", &self.identity.display_name())
            .field("modules", &self.modules.count())
            .finish()
    }
}
