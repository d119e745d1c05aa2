//! Registry of the generic parameters declared on a member.
//!
//! The loader registers `GenericParam` rows as it resolves them, which is not necessarily in
//! declaration order. The registry keeps the parameters in insertion order and provides a view
//! ordered by the declared ordinal (`Number`). The view is cached: registering a parameter marks
//! it dirty, and only [`GenericParamRegistry::sorted_by_ordinal`] rebuilds it.

use crate::{
    metadata::{
        config::OrdinalPolicy,
        tables::{GenericParamList, GenericParamRc},
    },
    Error, Result,
};

/// Append-only collection of generic parameters with an ordinal-sorted view.
#[derive(Default)]
pub struct GenericParamRegistry {
    params: GenericParamList,
    sorted: GenericParamList,
    dirty: bool,
    policy: OrdinalPolicy,
}

impl GenericParamRegistry {
    /// Create an empty registry using the strict ordinal policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry using the given ordinal policy
    #[must_use]
    pub fn with_policy(policy: OrdinalPolicy) -> Self {
        GenericParamRegistry {
            policy,
            ..Self::default()
        }
    }

    /// The ordinal policy applied when the sorted view is rebuilt
    #[must_use]
    pub fn policy(&self) -> OrdinalPolicy {
        self.policy
    }

    /// Change the ordinal policy. The sorted view is invalidated if the policy differs.
    pub fn set_policy(&mut self, policy: OrdinalPolicy) {
        if self.policy != policy {
            self.policy = policy;
            self.dirty = true;
        }
    }

    /// Append a generic parameter and invalidate the sorted view.
    ///
    /// Duplicate ordinals are not detected here.
    pub fn register(&mut self, param: GenericParamRc) {
        self.params.push(param);
        self.dirty = true;
    }

    /// True if at least one generic parameter has been registered
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.params.is_empty()
    }

    /// Number of registered generic parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if nothing has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// True if the sorted view has to be rebuilt before it can be read
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The registered parameters, in insertion order
    #[must_use]
    pub fn params(&self) -> &[GenericParamRc] {
        &self.params
    }

    /// The registered parameters, ordered by their declared ordinal.
    ///
    /// Rebuilds the cached view if a parameter was registered since the last call.
    ///
    /// # Errors
    /// Returns [`Error::GenericParamOrdinal`] under [`OrdinalPolicy::Strict`] if the ordinals
    /// are not a permutation of `0..len()`.
    pub fn sorted_by_ordinal(&mut self) -> Result<&[GenericParamRc]> {
        if self.dirty {
            log::debug!(
                "Rebuilding sorted view of {} generic parameters",
                self.params.len()
            );
            self.sorted = sort_by_ordinal(&self.params, self.policy)?;
            self.dirty = false;
        }
        Ok(&self.sorted)
    }

    /// Consume the registry, returning the insertion-ordered list and the sorted view
    pub(crate) fn into_parts(mut self) -> Result<(GenericParamList, GenericParamList)> {
        self.sorted_by_ordinal()?;
        Ok((self.params, self.sorted))
    }
}

/// Order generic parameters by their declared ordinal.
///
/// Slot `i` receives the parameter whose `number` equals `i`, scanning the whole input for every
/// slot; if several parameters declare the same ordinal the last one registered wins. Member
/// generic arity is small, so the quadratic scan is not a concern.
///
/// Slots that no parameter claims are an error under [`OrdinalPolicy::Strict`] and are left out
/// of the result under [`OrdinalPolicy::Lenient`].
///
/// # Errors
/// Returns [`Error::GenericParamOrdinal`] for the first unclaimed slot in strict mode.
pub fn sort_by_ordinal(
    params: &[GenericParamRc],
    policy: OrdinalPolicy,
) -> Result<GenericParamList> {
    let count = params.len();
    let mut slots: Vec<Option<GenericParamRc>> = vec![None; count];

    for (ordinal, slot) in slots.iter_mut().enumerate() {
        for param in params {
            if param.number as usize == ordinal {
                *slot = Some(param.clone());
            }
        }
    }

    match policy {
        OrdinalPolicy::Strict => slots
            .into_iter()
            .enumerate()
            .map(|(ordinal, slot)| {
                slot.ok_or(Error::GenericParamOrdinal {
                    ordinal: u32::try_from(ordinal).unwrap_or(u32::MAX),
                    count,
                })
            })
            .collect(),
        OrdinalPolicy::Lenient => {
            let missing = slots.iter().filter(|slot| slot.is_none()).count();
            if missing > 0 {
                log::warn!(
                    "{} of {} generic parameter ordinals are unclaimed, skipping them",
                    missing,
                    count
                );
            }
            Ok(slots.into_iter().flatten().collect())
        }
    }
}
