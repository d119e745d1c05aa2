//! # Param Module
//!
//! One formal parameter of a method or constructor: its optional name, its type, its
//! position in the signature and its `ParamAttributes`.
//!
//! ## Usage
//!
//! ```rust
//! use cilmember::metadata::tables::{Param, ParamAttributes};
//! use cilmember::metadata::typesystem::{CilFlavor, CilType};
//!
//! let int32 = CilType::primitive(CilFlavor::I4, "System", "Int32");
//! let param = Param::new(Some("count"), &int32, ParamAttributes::OUT, 0);
//! assert!(param.is_out());
//! ```
use std::sync::Arc;

mod owned;

pub use owned::*;

/// A vector that holds a list of `Param`
pub type ParamList = Vec<ParamRc>;
/// A reference to a `Param`
pub type ParamRc = Arc<Param>;

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`
pub mod ParamAttributes {
    /// Param is `In`
    pub const IN: u16 = 0x0001;
    /// Param is `out`
    pub const OUT: u16 = 0x0002;
    /// Param is optional
    pub const OPTIONAL: u16 = 0x0010;
    /// Param has default value
    pub const HAS_DEFAULT: u16 = 0x1000;
    /// Param has `FieldMarshal`
    pub const HAS_FIELD_MARSHAL: u16 = 0x2000;
    /// Reserved: shall be zero in a conforming implementation
    pub const UNUSED: u16 = 0xcfe0;
}
