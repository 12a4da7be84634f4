use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Lookup Errors
/// Raised by the query helpers when the caller asked for something that has to exist.
/// - [`Error::MethodNotFound`] - No method with the requested name (and arity)
/// - [`Error::FieldNotFound`] - No field with the requested name
/// - [`Error::TypeNotFoundInModule`] - Exhausted cross-module type search
///
/// ## Resolution Errors
/// Raised by the model when a reference can not be turned into a definition. The
/// base chain helpers swallow these and answer `false`.
/// - [`Error::TypeNotResolved`] - The defining module has no such type
/// - [`Error::AssemblyNotResolved`] - The resolver does not know the assembly
/// - [`Error::ModuleUnavailable`] - A weak module or resolver handle has been dropped
///
/// ## Model Construction Errors
/// - [`Error::TypeInsert`] - Failed to register a type in its module
/// - [`Error::Malformed`] - Invalid input, such as a broken assembly display name
///
/// # Examples
///
/// ```rust
/// use cilquery::{metadata::identity::AssemblyIdentity, Error};
///
/// match AssemblyIdentity::parse("") {
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Other error: {}", e),
///     Ok(identity) => println!("Parsed {}", identity.name),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be used.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// No method with the requested name, and parameter count if one was given, is declared
    /// on the type.
    #[error("Failed to find method {method} in type {type_name}")]
    MethodNotFound {
        /// Full name of the searched type
        type_name: String,
        /// Name of the requested method
        method: String,
    },

    /// No field with the requested name is declared on the type.
    #[error("Failed to find field {field} in type {type_name}")]
    FieldNotFound {
        /// Full name of the searched type
        type_name: String,
        /// Name of the requested field
        field: String,
    },

    /// The type could neither be found in the module's type-reference table nor in any
    /// assembly the module references.
    #[error("Failed to find type {name} from module {module}")]
    TypeNotFoundInModule {
        /// Full name of the requested type
        name: String,
        /// File name of the module that searched for it
        module: String,
    },

    /// A type reference points at a module which does not define it.
    #[error("Failed to resolve type {name} in scope {scope}")]
    TypeNotResolved {
        /// Full name of the reference
        name: String,
        /// Name of the scope the reference points at
        scope: String,
    },

    /// The resolver could not provide the referenced assembly.
    #[error("Failed to resolve assembly {0}")]
    AssemblyNotResolved(String),

    /// A module, or the resolver it was created with, has already been dropped.
    #[error("The owning module or its resolver is no longer available")]
    ModuleUnavailable,

    /// Failed to insert new type into its module.
    ///
    /// The associated [`Token`] identifies which type caused the failure.
    #[error("Failed to insert new type into module - {0}")]
    TypeInsert(Token),
}
