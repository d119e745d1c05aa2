//! # cilmember Prelude
//!
//! This module re-exports the most commonly used types, so that a single glob import is
//! enough to build and query member descriptors.
//!
//! ```rust
//! use cilmember::prelude::*;
//!
//! let ctor = MethodBaseBuilder::with_param_types(Token::new(0x0600_0002), ".ctor", 0x1886, &[])
//!     .constructor()
//!     .build()?;
//! assert!(ctor.is_constructor());
//! # Ok::<(), cilmember::Error>(())
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilmember operations
pub use crate::Error;

/// The result type used throughout cilmember
pub use crate::Result;

// ================================================================================================
// Metadata System - Core Types
// ================================================================================================

/// Metadata token type for identifying members
pub use crate::metadata::token::Token;

/// Options applied while freezing members
pub use crate::metadata::config::{MemberConfig, OrdinalPolicy};

// ================================================================================================
// Type System
// ================================================================================================

/// Core type system components
pub use crate::metadata::typesystem::{CilFlavor, CilType, CilTypeRc, CilTypeRef, CilTypeRefList};

// ================================================================================================
// Members
// ================================================================================================

/// Member descriptors and their builder
pub use crate::metadata::method::{
    sort_by_ordinal, GenericParamRegistry, MemberKind, MethodBase, MethodBaseBuilder, MethodBaseRc,
    MethodMap,
};

/// Attribute and implementation flags
pub use crate::metadata::method::{
    CallingConventions, MethodAccess, MethodAttributes, MethodImplCodeType, MethodImplManagement,
    MethodImplOptions, MethodModifiers, MethodVtableFlags,
};

/// Parameter and generic parameter descriptors
pub use crate::metadata::tables::{
    GenericParam, GenericParamAttributes, GenericParamRc, Param, ParamAttributes, ParamRc,
};
