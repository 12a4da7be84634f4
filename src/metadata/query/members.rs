//! Attribute, interface and member lookups on definitions.

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        field::FieldRc,
        method::MethodRc,
        typesystem::CilType,
    },
    Error::{FieldNotFound, MethodNotFound},
    Result,
};

pub(super) fn has_attribute(attributes: &CustomAttributeList, fullname: &str) -> bool {
    attributes
        .iter()
        .any(|(_, attribute)| attribute.attribute_type.fullname() == fullname)
}

pub(super) fn has_interface(cil_type: &CilType, fullname: &str) -> bool {
    cil_type
        .interfaces
        .iter()
        .any(|(_, interface)| interface.fullname() == fullname)
}

/// First method in declaration order with `name`, and `arg_count` parameters if given
pub(super) fn find_method(
    cil_type: &CilType,
    name: &str,
    arg_count: Option<usize>,
) -> Option<MethodRc> {
    cil_type
        .methods
        .iter()
        .map(|(_, method)| method)
        .find(|method| {
            method.name == name && arg_count.is_none_or(|count| method.param_count() == count)
        })
        .cloned()
}

pub(super) fn get_method(
    cil_type: &CilType,
    name: &str,
    arg_count: Option<usize>,
) -> Result<MethodRc> {
    find_method(cil_type, name, arg_count).ok_or_else(|| MethodNotFound {
        type_name: cil_type.fullname(),
        method: name.to_string(),
    })
}

pub(super) fn get_field(cil_type: &CilType, name: &str) -> Result<FieldRc> {
    cil_type
        .fields
        .iter()
        .map(|(_, field)| field)
        .find(|field| field.name == name)
        .cloned()
        .ok_or_else(|| FieldNotFound {
            type_name: cil_type.fullname(),
            field: name.to_string(),
        })
}
