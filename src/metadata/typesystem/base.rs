use std::sync::{Arc, Weak};

use crate::{
    metadata::{
        token::Token,
        typesystem::{CilType, CilTypeRc},
    },
    Error, Result,
};

/// A vector that holds `CilTypeRef` instances (weak references)
pub type CilTypeRefList = Arc<boxcar::Vec<CilTypeRef>>;

/// A smart reference to a `CilType` that does not keep the type alive.
///
/// Members point back to their declaring type through this reference, while the declaring
/// type owns its members. Generic parameter constraints use it too, since a constraint can
/// name the type that declares the parameter.
#[derive(Clone, Debug)]
pub struct CilTypeRef {
    weak_ref: Weak<CilType>,
}

impl CilTypeRef {
    /// Create a new `CilTypeRef` from a strong reference
    pub fn new(strong_ref: &CilTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CilTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Get a strong reference to the type
    ///
    /// # Errors
    /// Returns [`Error::TypeMissing`] if the type has been dropped; `what` names the reference
    /// in the error message.
    pub fn resolve(&self, what: &str) -> Result<CilTypeRc> {
        self.weak_ref
            .upgrade()
            .ok_or_else(|| Error::TypeMissing(what.to_string()))
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }

    /// Get the full name of the referenced type (if still alive)
    #[must_use]
    pub fn fullname(&self) -> Option<String> {
        self.upgrade().map(|t| t.fullname())
    }
}

impl From<CilTypeRc> for CilTypeRef {
    fn from(strong_ref: CilTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

impl From<&CilTypeRc> for CilTypeRef {
    fn from(strong_ref: &CilTypeRc) -> Self {
        Self::new(strong_ref)
    }
}

#[allow(missing_docs)]
/// Represents type flavors in the type system
#[derive(Debug, Clone, PartialEq)]
pub enum CilFlavor {
    // Base primitive types
    Void,
    Boolean,
    Char,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    I,
    U,
    Object,
    String,

    // Constructed types, the element type is stored on the `CilType`
    Array {
        /// The rank (number of dimensions)
        rank: u32,
    },
    Pointer,
    ByRef,
    GenericInstance,
    GenericParameter {
        /// Index in the generic parameters list
        index: u32,
        /// Whether it's a method parameter (true) or type parameter (false)
        method: bool,
    },

    // Type categories
    Class,
    ValueType,
    Interface,

    // Fallback
    Unknown,
}

impl CilFlavor {
    /// Check if a value of this flavor can have its address taken by emitted code.
    ///
    /// Arrays, generic instantiations and generic parameter usages cannot.
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        !matches!(
            self,
            CilFlavor::Array { .. } | CilFlavor::GenericInstance | CilFlavor::GenericParameter { .. }
        )
    }
}
