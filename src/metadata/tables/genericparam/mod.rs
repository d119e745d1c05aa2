//! # GenericParam Module
//!
//! A generic parameter declared on a method (`M<T>`) or type, identified by its declared
//! ordinal (`Number`). The ordinal is independent of the order in which the loader encounters
//! the rows, which is why members keep both an insertion-ordered list and a sorted view.
use std::sync::Arc;

mod owned;

pub use owned::*;

/// A vector that holds a list of `GenericParam`
pub type GenericParamList = Vec<GenericParamRc>;
/// A reference to a `GenericParam`
pub type GenericParamRc = Arc<GenericParam>;

#[allow(non_snake_case)]
/// All possible flags for `GenericParamAttributes`
pub mod GenericParamAttributes {
    /// Mask for the variance bits
    pub const VARIANCE_MASK: u16 = 0x0003;
    /// The generic parameter is covariant
    pub const COVARIANT: u16 = 0x0001;
    /// The generic parameter is contravariant
    pub const CONTRAVARIANT: u16 = 0x0002;
    /// Mask for the special constraint bits
    pub const SPECIAL_CONSTRAINT_MASK: u16 = 0x001C;
    /// The generic parameter has a reference type constraint
    pub const REFERENCE_TYPE_CONSTRAINT: u16 = 0x0004;
    /// The generic parameter has a value type constraint
    pub const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT: u16 = 0x0008;
    /// The generic parameter has a constructor constraint
    pub const DEFAULT_CONSTRUCTOR_CONSTRAINT: u16 = 0x0010;
}
