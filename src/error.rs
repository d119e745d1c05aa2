use thiserror::Error;

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
/// Member descriptors are built from metadata that the loader has already parsed and resolved,
/// so the set of failures is small. Attribute words are never validated; the errors below only
/// cover structural problems that make a derived view impossible to compute.
///
/// # Error Categories
///
/// - [`Error::Malformed`] - Inconsistent metadata handed over by the loader
/// - [`Error::GenericParamOrdinal`] - Generic parameter ordinals are not a contiguous `0..n` range
/// - [`Error::TypeMissing`] - A non-owning type reference points to a type that has been dropped
///
/// # Examples
///
/// ```rust
/// use cilmember::{Error, metadata::method::MethodBaseBuilder, metadata::token::Token};
///
/// let builder = MethodBaseBuilder::with_param_types(Token::new(0x0600_0001), "Run", 0x0006, &[]);
/// match builder.build() {
///     Ok(method) => println!("{}", method),
///     Err(Error::GenericParamOrdinal { ordinal, count }) => {
///         eprintln!("missing generic parameter #{} of {}", ordinal, count);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata handed to this crate is inconsistent.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// No registered generic parameter declares the given ordinal.
    ///
    /// Raised while building the ordinal-sorted view of a member's generic parameters under
    /// [`crate::metadata::config::OrdinalPolicy::Strict`], when the declared `Number` values
    /// are not a permutation of `0..count`.
    #[error("No generic parameter with ordinal {ordinal} among {count} registered parameters")]
    GenericParamOrdinal {
        /// The first ordinal that has no matching parameter
        ordinal: u32,
        /// The number of registered generic parameters
        count: usize,
    },

    /// A type referenced through a weak [`crate::metadata::typesystem::CilTypeRef`] is gone.
    ///
    /// Declaring types and generic constraints are non-owning references; the owner of the
    /// type graph has dropped the target before the member was inspected.
    #[error("Referenced type is no longer available - {0}")]
    TypeMissing(String),
}
