use std::sync::Arc;

use crate::metadata::{
    method::MethodRc,
    typesystem::{TypeRefList, TypeRefRc},
};

/// A generic method bound to concrete type arguments, the owned counterpart of a
/// `MethodSpec` row.
///
/// The number of arguments is not checked against the generic parameter slots of the
/// element method.
#[derive(Debug, Clone)]
pub struct GenericInstanceMethod {
    /// The generic method definition being instantiated
    pub element_method: MethodRc,
    /// Type arguments, in slot order
    pub generic_args: TypeRefList,
}

impl GenericInstanceMethod {
    /// Create an instance of `element_method` without arguments
    pub fn new(element_method: &MethodRc) -> Self {
        GenericInstanceMethod {
            element_method: element_method.clone(),
            generic_args: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Bind the next type argument
    pub fn push_argument(&self, argument: TypeRefRc) {
        self.generic_args.push(argument);
    }

    /// Number of bound type arguments
    #[must_use]
    pub fn argument_count(&self) -> usize {
        self.generic_args.count()
    }

    /// Name of the instantiated method
    #[must_use]
    pub fn name(&self) -> &str {
        &self.element_method.name
    }

    /// Returns `Type::Name<Arg1,Arg2>`
    #[must_use]
    pub fn fullname(&self) -> String {
        let args: Vec<String> = self
            .generic_args
            .iter()
            .map(|(_, arg)| arg.fullname())
            .collect();
        format!("{}<{}>", self.element_method.fullname(), args.join(","))
    }
}
