//! Descriptors for the rows that make up a member: its parameters and generic parameters.
//!
//! The loader reads the `Param` and `GenericParam` tables; this module holds the resolved,
//! owned form of a row that a [`crate::metadata::method::MethodBase`] keeps.

mod genericparam;
mod param;

pub use genericparam::*;
pub use param::*;
