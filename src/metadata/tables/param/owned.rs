use std::{fmt, sync::Arc};

use crate::metadata::{
    tables::{ParamAttributes, ParamRc},
    token::Token,
    typesystem::CilTypeRc,
};

/// A formal parameter of a method or constructor, with resolved type and owned data.
pub struct Param {
    /// Token of the `Param` row, null for parameters synthesized from a type list
    pub token: Token,
    /// bitmask of `ParamAttributes`, §II.23.1.13
    pub flags: u16,
    /// Zero-based position in the signature
    pub position: u32,
    /// The parameter name
    pub name: Option<String>,
    /// The type of this `Param`. Constructed types (pointers, by-refs, arrays) are usually
    /// created for a single signature, so the parameter owns its type.
    pub param_type: CilTypeRc,
}

impl Param {
    /// Create a parameter that has no `Param` row behind it
    ///
    /// ## Arguments
    /// * 'name'        - The parameter name, if known
    /// * 'param_type'  - The type of the parameter
    /// * 'flags'       - `ParamAttributes` bitmask
    /// * 'position'    - Zero-based position in the signature
    pub fn new(name: Option<&str>, param_type: &CilTypeRc, flags: u16, position: u32) -> ParamRc {
        Self::from_row(Token::new(0), name, param_type, flags, position)
    }

    /// Create a parameter loaded from a `Param` row
    pub fn from_row(
        token: Token,
        name: Option<&str>,
        param_type: &CilTypeRc,
        flags: u16,
        position: u32,
    ) -> ParamRc {
        Arc::new(Param {
            token,
            flags,
            position,
            name: name.map(str::to_string),
            param_type: param_type.clone(),
        })
    }

    /// Is `[in]`
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// Is `[out]`
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }

    /// Is `[opt]`
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.flags & ParamAttributes::OPTIONAL != 0
    }

    /// Carries a default value in the `Constant` table
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.flags & ParamAttributes::HAS_DEFAULT != 0
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.param_type)?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}
