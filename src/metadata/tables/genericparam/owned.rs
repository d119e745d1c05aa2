use std::sync::Arc;

use crate::metadata::{
    tables::{GenericParamAttributes, GenericParamRc},
    token::Token,
    typesystem::{CilTypeRc, CilTypeRef, CilTypeRefList},
};

/// A generic parameter of a method or type. Similar to the `GenericParam` row but with resolved
/// names and owned data.
pub struct GenericParam {
    /// Token
    pub token: Token,
    /// a 2-byte index of the generic parameter, numbered left-to-right, from zero
    pub number: u32,
    /// a 2-byte bitmask of type `GenericParamAttributes`, §II.23.1.7
    pub flags: u16,
    /// Name of the generic parameter
    pub name: String,
    /// The constraints that apply to this `GenericParam`.
    ///
    /// Constraints can reference types that are resolved after the parameter was registered,
    /// so they are appended in place.
    pub constraints: CilTypeRefList,
}

impl GenericParam {
    /// Create a new generic parameter without constraints
    ///
    /// ## Arguments
    /// * 'token'   - Token of the `GenericParam` row
    /// * 'number'  - The declared ordinal
    /// * 'flags'   - `GenericParamAttributes` bitmask
    /// * 'name'    - Name of the parameter, e.g. `TEnum`
    pub fn new(token: Token, number: u32, flags: u16, name: &str) -> GenericParamRc {
        Arc::new(GenericParam {
            token,
            number,
            flags,
            name: name.to_string(),
            constraints: Arc::new(boxcar::Vec::new()),
        })
    }

    /// Add a constraint (`where T : constraint`)
    pub fn add_constraint(&self, constraint: &CilTypeRc) {
        self.constraints.push(CilTypeRef::new(constraint));
    }

    /// Is covariant (`out T`)
    #[must_use]
    pub fn is_covariant(&self) -> bool {
        self.flags & GenericParamAttributes::VARIANCE_MASK == GenericParamAttributes::COVARIANT
    }

    /// Is contravariant (`in T`)
    #[must_use]
    pub fn is_contravariant(&self) -> bool {
        self.flags & GenericParamAttributes::VARIANCE_MASK == GenericParamAttributes::CONTRAVARIANT
    }

    /// Carries the `struct` constraint
    #[must_use]
    pub fn has_value_type_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT != 0
    }

    /// Carries the `class` constraint
    #[must_use]
    pub fn has_reference_type_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT != 0
    }

    /// Carries the `new()` constraint
    #[must_use]
    pub fn has_default_constructor_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT != 0
    }
}
