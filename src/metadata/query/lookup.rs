//! Type lookup across the assemblies a module references.

use log::{debug, trace};

use crate::{
    metadata::{module::CilModuleRc, typesystem::{CilTypeRc, TypeRefRc}},
    Error::TypeNotFoundInModule,
    Result,
};

/// Depth-first search for `fullname` in `cil_type` and the types nested in it.
///
/// `cil_type` itself is checked first, then its nested types in declaration order, each
/// one fully before the next.
///
/// ## Arguments
/// * 'cil_type' - The type to start the search at
/// * 'fullname' - The full name to look for, `Enclosing/Nested` for nested types
#[must_use]
pub fn find_type_within(cil_type: &CilTypeRc, fullname: &str) -> Option<CilTypeRc> {
    if cil_type.fullname() == fullname {
        return Some(cil_type.clone());
    }

    for (_, nested) in cil_type.nested_types.iter() {
        let Some(nested) = nested.upgrade() else {
            continue;
        };
        if let Some(found) = find_type_within(&nested, fullname) {
            return Some(found);
        }
    }

    None
}

pub(super) fn get_type(module: &CilModuleRc, fullname: &str) -> Result<TypeRefRc> {
    if let Some(reference) = module.try_get_type_reference(fullname) {
        return Ok(reference);
    }

    debug!(
        "{} does not reference {}, searching referenced assemblies",
        module.file_name, fullname
    );

    for identity in module.assembly_references() {
        let assembly = match module.resolve_assembly(&identity) {
            Ok(assembly) => assembly,
            Err(error) => {
                debug!("Skipping {} while looking for {}: {}", identity, fullname, error);
                continue;
            }
        };
        let Some(main_module) = assembly.main_module() else {
            debug!("Skipping {} while looking for {}: no main module", identity, fullname);
            continue;
        };

        for candidate in main_module.top_level_types() {
            if let Some(found) = find_type_within(&candidate, fullname) {
                trace!(
                    "Importing {} from {} into {}",
                    fullname,
                    main_module.name,
                    module.file_name
                );
                return module.import_type(&found);
            }
        }
    }

    Err(TypeNotFoundInModule {
        name: fullname.to_string(),
        module: module.file_name.clone(),
    })
}
