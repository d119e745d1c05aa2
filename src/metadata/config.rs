//! Options applied while freezing member descriptors.
//!
//! The loader decides how forgiving the crate should be with metadata that is structurally
//! odd but still loadable. [`MemberConfig`] is passed to
//! [`crate::metadata::method::MethodBaseBuilder::config`] and consulted once, when the builder
//! is frozen.
//!
//! # Examples
//!
//! ```rust
//! use cilmember::metadata::config::{MemberConfig, OrdinalPolicy};
//!
//! let config = MemberConfig::lenient();
//! assert_eq!(config.ordinal_policy, OrdinalPolicy::Lenient);
//! assert!(!config.persist_ctor_special_name);
//! ```

/// How to treat generic parameter ordinals that are not a contiguous `0..count` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrdinalPolicy {
    /// Fail with [`crate::Error::GenericParamOrdinal`] at the first unfilled ordinal
    #[default]
    Strict,
    /// Skip unfilled ordinals; the sorted view is shorter than the registered list
    Lenient,
}

/// Options that control how a [`crate::metadata::method::MethodBase`] is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberConfig {
    /// Handling of gaps and duplicates in generic parameter ordinals
    pub ordinal_policy: OrdinalPolicy,

    /// Write `SPECIAL_NAME | RTSPECIAL_NAME` into the stored attribute word of constructors.
    ///
    /// Off by default: the stored word is kept exactly as read from the `MethodDef` row.
    pub persist_ctor_special_name: bool,
}

impl Default for MemberConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl MemberConfig {
    /// Reject non-contiguous ordinals, keep attribute words as read
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ordinal_policy: OrdinalPolicy::Strict,
            persist_ctor_special_name: false,
        }
    }

    /// Tolerate non-contiguous ordinals, keep attribute words as read
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            ordinal_policy: OrdinalPolicy::Lenient,
            persist_ctor_special_name: false,
        }
    }

    /// Sets whether constructors get the special-name bits persisted
    #[must_use]
    pub fn with_ctor_special_name(mut self, persist: bool) -> Self {
        self.persist_ctor_special_name = persist;
        self
    }
}
