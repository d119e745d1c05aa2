//! Method and constructor descriptors.
//!
//! A [`MethodBase`] describes one callable member of a type: its name, attribute word, derived
//! calling convention, parameters and generic parameters. It is created once while the
//! declaring type's members are loaded and is read-only afterwards.
//!
//! Loading happens in two phases:
//!
//! 1. [`MethodBaseBuilder`] is created with the member's parameters, which are fixed from then
//!    on. Generic parameters can be registered incrementally, e.g. while constraints that refer
//!    to later rows are being resolved.
//! 2. [`MethodBaseBuilder::build`] consumes the builder and returns the frozen
//!    [`MethodBaseRc`]. No registration is possible after this point.
//!
//! # Emission safety
//!
//! [`MethodBase::has_incompatible_param_or_return_type`] is a conservative gate for CIL
//! emitters: it reports members whose signature contains an unmanaged pointer, or a by-ref
//! whose referent cannot have its address taken (arrays, generic instantiations, generic
//! parameter usages). `Enum.TryParse<TEnum>(string, out TEnum)` is the classic example.
//!
//! # Examples
//!
//! ```rust
//! use cilmember::prelude::*;
//!
//! let string = CilType::primitive(CilFlavor::String, "System", "String");
//! let boolean = CilType::primitive(CilFlavor::Boolean, "System", "Boolean");
//! let tenum = CilType::generic_parameter(0, true, "TEnum");
//! let tenum_ref = CilType::by_ref(&tenum);
//!
//! let mut builder = MethodBaseBuilder::with_param_types(
//!     Token::new(0x0600_0010),
//!     "TryParse",
//!     0x0096, // public static hidebysig
//!     &[string.clone(), tenum_ref.clone()],
//! )
//! .returns(&boolean);
//! builder.register_generic_param(GenericParam::new(Token::new(0x2A00_0001), 0, 0x0018, "TEnum"));
//!
//! let try_parse = builder.build()?;
//! assert!(try_parse.is_generic());
//! assert!(try_parse.has_incompatible_param_or_return_type());
//! # Ok::<(), cilmember::Error>(())
//! ```

mod generics;
mod types;

use std::{fmt, sync::Arc};

use crossbeam_skiplist::SkipMap;

pub use generics::{sort_by_ordinal, GenericParamRegistry};
pub use types::*;

use crate::{
    metadata::{
        config::MemberConfig,
        tables::{GenericParamList, GenericParamRc, Param, ParamList, ParamRc},
        token::Token,
        typesystem::{CilType, CilTypeRc, CilTypeRef},
    },
    Result,
};

/// A map that holds the mapping of Token to frozen `MethodBase`
pub type MethodMap = SkipMap<Token, MethodBaseRc>;
/// A reference to a `MethodBase`
pub type MethodBaseRc = Arc<MethodBase>;

/// Whether a member is an ordinary method or a constructor
#[derive(Clone, Debug)]
pub enum MemberKind {
    /// An ordinary method; `None` as return type means `void` or not resolved
    Method {
        /// The return type
        return_type: Option<CilTypeRc>,
    },
    /// An instance (`.ctor`) or type (`.cctor`) constructor
    Constructor,
}

/// A frozen method or constructor descriptor.
///
/// All state is fixed at [`MethodBaseBuilder::build`]; every query is a read.
pub struct MethodBase {
    /// Token of the `MethodDef` / `MemberRef` row
    pub token: Token,
    /// Name of the member
    pub name: String,
    declaring_type: Option<CilTypeRef>,
    flags: MethodAttributes,
    calling_convention: CallingConventions,
    impl_flags: u16,
    kind: MemberKind,
    params: ParamList,
    generic_params: GenericParamList,
    sorted_generic_params: GenericParamList,
}

impl MethodBase {
    /// The owning type, if known. The reference does not keep the type alive.
    #[must_use]
    pub fn declaring_type(&self) -> Option<&CilTypeRef> {
        self.declaring_type.as_ref()
    }

    /// Upgrade the back-reference to the owning type; `None` if no owner was set
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeMissing`] if the owner has already been dropped
    pub fn resolve_declaring_type(&self) -> Result<Option<CilTypeRc>> {
        self.declaring_type
            .as_ref()
            .map(|owner| owner.resolve("declaring type"))
            .transpose()
    }

    /// The attribute word, as stored
    #[must_use]
    pub fn flags(&self) -> MethodAttributes {
        self.flags
    }

    /// The calling convention derived from the attribute word
    #[must_use]
    pub fn calling_convention(&self) -> CallingConventions {
        self.calling_convention
    }

    /// The raw `MethodImplAttributes` word
    #[must_use]
    pub fn impl_flags(&self) -> u16 {
        self.impl_flags
    }

    /// How the body is provided (IL, native, runtime)
    #[must_use]
    pub fn impl_code_type(&self) -> MethodImplCodeType {
        MethodImplCodeType::from_impl_flags(self.impl_flags)
    }

    /// Whether the body is managed
    #[must_use]
    pub fn impl_management(&self) -> MethodImplManagement {
        MethodImplManagement::from_impl_flags(self.impl_flags)
    }

    /// Additional implementation options (inlining, synchronization, ...)
    #[must_use]
    pub fn impl_options(&self) -> MethodImplOptions {
        MethodImplOptions::from_impl_flags(self.impl_flags)
    }

    /// Method or constructor
    #[must_use]
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Is this a constructor
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor)
    }

    /// The return type of a method; `None` for constructors and `void` methods
    #[must_use]
    pub fn return_type(&self) -> Option<&CilTypeRc> {
        match &self.kind {
            MemberKind::Method { return_type } => return_type.as_ref(),
            MemberKind::Constructor => None,
        }
    }

    /// The decoded accessibility
    #[must_use]
    pub fn access(&self) -> Option<MethodAccess> {
        self.flags.access()
    }

    /// Is `abstract`
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.is_abstract()
    }

    /// Is `final`
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.flags.is_final()
    }

    /// Is `virtual`
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.flags.is_virtual()
    }

    /// Neither static nor virtual, see [`MethodAttributes::is_instance`]
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.flags.is_instance()
    }

    /// Is `static`
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.is_static()
    }

    /// Is `hidebysig`
    #[must_use]
    pub fn is_hide_by_sig(&self) -> bool {
        self.flags.is_hide_by_sig()
    }

    /// Is `specialname` in the stored attribute word.
    ///
    /// Constructors are special-name members by definition, but unless the member was built
    /// with [`MemberConfig::persist_ctor_special_name`] this reports the word as read.
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.flags.is_special_name()
    }

    /// Is `rtspecialname` in the stored attribute word
    #[must_use]
    pub fn is_rt_special_name(&self) -> bool {
        self.flags.is_rt_special_name()
    }

    /// Is `newslot`
    #[must_use]
    pub fn is_new_slot(&self) -> bool {
        self.flags.is_new_slot()
    }

    /// Is `pinvokeimpl`
    #[must_use]
    pub fn is_pinvoke_impl(&self) -> bool {
        self.flags.is_pinvoke_impl()
    }

    /// Has declarative security attached
    #[must_use]
    pub fn has_security(&self) -> bool {
        self.flags.has_security()
    }

    /// Is `public`
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.is_public()
    }

    /// Is `private`
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.flags.is_private()
    }

    /// Is `family`
    #[must_use]
    pub fn is_family(&self) -> bool {
        self.flags.is_family()
    }

    /// Is `assembly`
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.flags.is_assembly()
    }

    /// Is `famorassem`
    #[must_use]
    pub fn is_family_or_assembly(&self) -> bool {
        self.flags.is_family_or_assembly()
    }

    /// Is `famandassem`
    #[must_use]
    pub fn is_family_and_assembly(&self) -> bool {
        self.flags.is_family_and_assembly()
    }

    /// The parameters, in signature order.
    ///
    /// Returns a new list; changing it does not affect the member.
    #[must_use]
    pub fn params(&self) -> ParamList {
        self.params.clone()
    }

    /// The parameter at `position`
    #[must_use]
    pub fn param(&self, position: usize) -> Option<&ParamRc> {
        self.params.get(position)
    }

    /// Number of parameters (receiver not included)
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Does the member declare generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// The generic parameters, in the order they were registered
    #[must_use]
    pub fn generic_params(&self) -> &[GenericParamRc] {
        &self.generic_params
    }

    /// The generic parameters, ordered by their declared ordinal
    #[must_use]
    pub fn sorted_generic_params(&self) -> &[GenericParamRc] {
        &self.sorted_generic_params
    }

    /// Does any parameter prevent an emitter from referencing this member.
    ///
    /// A parameter is flagged if its type is an unmanaged pointer, or a by-ref to a type that
    /// cannot have its address taken. Stops at the first flagged parameter.
    #[must_use]
    pub fn has_incompatible_param_type(&self) -> bool {
        self.params
            .iter()
            .any(|param| is_incompatible(&param.param_type))
    }

    /// Like [`MethodBase::has_incompatible_param_type`], but checks the return type of
    /// ordinary methods first.
    #[must_use]
    pub fn has_incompatible_param_or_return_type(&self) -> bool {
        self.return_type().is_some_and(|ret| is_incompatible(ret))
            || self.has_incompatible_param_type()
    }

    /// Render the parameter types as `(T1, T2, ...)`
    #[must_use]
    pub fn params_to_string(&self) -> String {
        let types: Vec<String> = self
            .params
            .iter()
            .map(|param| param.param_type.to_string())
            .collect();
        format!("({})", types.join(", "))
    }
}

impl fmt::Display for MethodBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(access) = self.access() {
            write!(f, "{} ", access)?;
        }
        if self.is_static() {
            write!(f, "static ")?;
        }
        if self.is_abstract() {
            write!(f, "abstract ")?;
        } else if self.is_virtual() {
            write!(f, "virtual ")?;
        }
        if let MemberKind::Method { return_type } = &self.kind {
            match return_type {
                Some(return_type) => write!(f, "{} ", return_type)?,
                None => write!(f, "void ")?,
            }
        }
        write!(f, "{}{}", self.name, self.params_to_string())
    }
}

impl fmt::Debug for MethodBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBase")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags", &format_args!("0x{:04x}", self.flags.bits()))
            .field("calling_convention", &self.calling_convention)
            .field("kind", &self.kind)
            .field("params", &self.params.len())
            .field("generic_params", &self.generic_params.len())
            .finish()
    }
}

/// Signature position of the parameter at `index`, clamped to the `u32` range of `Param` rows
fn signature_position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Pointer, or by-ref to something whose address cannot be taken
fn is_incompatible(candidate: &CilType) -> bool {
    if candidate.is_pointer() {
        return true;
    }
    if candidate.is_by_ref() {
        if let Some(element) = candidate.element_type() {
            return !element.can_take_address();
        }
    }
    false
}

/// Open registration phase of a [`MethodBase`].
///
/// Parameters are fixed when the builder is created. Generic parameters may be registered until
/// [`MethodBaseBuilder::build`] freezes the member.
pub struct MethodBaseBuilder {
    token: Token,
    name: String,
    flags: u16,
    params: ParamList,
    declaring_type: Option<CilTypeRef>,
    impl_flags: u16,
    kind: MemberKind,
    generics: GenericParamRegistry,
    config: MemberConfig,
}

impl MethodBaseBuilder {
    /// Start a member whose parameters are given by type only.
    ///
    /// One unnamed [`Param`] is created per type, at positions `0..param_types.len()`.
    /// Positions beyond `u32::MAX` are clamped to it; a `MethodDef` signature cannot hold
    /// that many parameters.
    ///
    /// ## Arguments
    /// * 'token'       - Token of the member
    /// * 'name'        - Name of the member
    /// * 'flags'       - The `MethodAttributes` word
    /// * 'param_types' - The parameter types in signature order
    pub fn with_param_types(
        token: Token,
        name: &str,
        flags: u16,
        param_types: &[CilTypeRc],
    ) -> Self {
        let params = param_types
            .iter()
            .enumerate()
            .map(|(index, param_type)| Param::new(None, param_type, 0, signature_position(index)))
            .collect();
        Self::init(token, name, flags, params)
    }

    /// Start a member from prebuilt parameters, which are stored as given
    ///
    /// ## Arguments
    /// * 'token'   - Token of the member
    /// * 'name'    - Name of the member
    /// * 'flags'   - The `MethodAttributes` word
    /// * 'params'  - The parameters in signature order
    pub fn with_params(token: Token, name: &str, flags: u16, params: ParamList) -> Self {
        Self::init(token, name, flags, params)
    }

    fn init(token: Token, name: &str, flags: u16, params: ParamList) -> Self {
        MethodBaseBuilder {
            token,
            name: name.to_string(),
            flags,
            params,
            declaring_type: None,
            impl_flags: 0,
            kind: MemberKind::Method { return_type: None },
            generics: GenericParamRegistry::new(),
            config: MemberConfig::default(),
        }
    }

    /// Set the owning type
    #[must_use]
    pub fn declaring_type(mut self, owner: &CilTypeRc) -> Self {
        self.declaring_type = Some(CilTypeRef::new(owner));
        self
    }

    /// Set the `MethodImplAttributes` word
    #[must_use]
    pub fn impl_flags(mut self, impl_flags: u16) -> Self {
        self.impl_flags = impl_flags;
        self
    }

    /// Make this an ordinary method returning `return_type`
    #[must_use]
    pub fn returns(mut self, return_type: &CilTypeRc) -> Self {
        self.kind = MemberKind::Method {
            return_type: Some(return_type.clone()),
        };
        self
    }

    /// Make this a constructor
    #[must_use]
    pub fn constructor(mut self) -> Self {
        self.kind = MemberKind::Constructor;
        self
    }

    /// Set the options applied when freezing
    #[must_use]
    pub fn config(mut self, config: MemberConfig) -> Self {
        self.generics.set_policy(config.ordinal_policy);
        self.config = config;
        self
    }

    /// Register a generic parameter declared on this member
    pub fn register_generic_param(&mut self, param: GenericParamRc) -> &mut Self {
        self.generics.register(param);
        self
    }

    /// Register a generic parameter, consuming and returning the builder
    #[must_use]
    pub fn generic_param(mut self, param: GenericParamRc) -> Self {
        self.generics.register(param);
        self
    }

    /// Does the member declare generic parameters so far
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generics.is_generic()
    }

    /// The generic parameters registered so far, ordered by their declared ordinal
    ///
    /// # Errors
    /// Returns [`crate::Error::GenericParamOrdinal`] if the ordinals have gaps under the strict
    /// policy
    pub fn sorted_generic_params(&mut self) -> Result<&[GenericParamRc]> {
        self.generics.sorted_by_ordinal()
    }

    /// Freeze the member.
    ///
    /// The calling convention is derived from the attribute word: `STANDARD`, plus `HAS_THIS`
    /// unless the member is static.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the token does not refer to a `MethodDef` or
    /// `MemberRef` row, and [`crate::Error::GenericParamOrdinal`] if the generic parameter
    /// ordinals have gaps under the strict policy
    pub fn build(self) -> Result<MethodBaseRc> {
        if !self.token.is_callable_member() {
            return Err(malformed_error!(
                "Member '{}' has token {} outside the MethodDef and MemberRef tables",
                self.name,
                self.token
            ));
        }

        let mut flags = self.flags;
        if matches!(self.kind, MemberKind::Constructor) && self.config.persist_ctor_special_name {
            flags |= (MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME).bits();
        }
        let flags = MethodAttributes::new(flags);

        let (generic_params, sorted_generic_params) = self.generics.into_parts()?;

        log::debug!(
            "Frozen member {} '{}' - {} parameters, {} generic parameters",
            self.token,
            self.name,
            self.params.len(),
            generic_params.len()
        );

        Ok(Arc::new(MethodBase {
            token: self.token,
            name: self.name,
            declaring_type: self.declaring_type,
            flags,
            calling_convention: CallingConventions::from_attributes(flags),
            impl_flags: self.impl_flags,
            kind: self.kind,
            params: self.params,
            generic_params,
            sorted_generic_params,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            config::OrdinalPolicy,
            tables::ParamAttributes,
            typesystem::{CilFlavor, CilType},
        },
        test::{create_generic_param, create_int32, create_method, create_string},
        Error,
    };

    fn method_token() -> Token {
        Token::new(0x0600_0001)
    }

    #[test]
    fn test_public_instance_no_params() {
        let method = MethodBaseBuilder::with_param_types(method_token(), "Reset", 0x0006, &[])
            .build()
            .unwrap();

        assert!(method.is_public());
        assert!(!method.is_static());
        assert!(method.is_instance());
        assert!(!method.is_constructor());
        assert_eq!(
            method.calling_convention(),
            CallingConventions::STANDARD | CallingConventions::HAS_THIS
        );
        assert_eq!(method.param_count(), 0);
        assert_eq!(method.params_to_string(), "()");
        assert!(!method.is_generic());
    }

    #[test]
    fn test_calling_convention_follows_static_bit() {
        for bits in [0x0000u16, 0x0010, 0x0040, 0x0050, 0x0096, 0xFFFF, 0xFFEF] {
            let method = MethodBaseBuilder::with_param_types(method_token(), "M", bits, &[])
                .build()
                .unwrap();
            let convention = method.calling_convention();

            assert!(convention.contains(CallingConventions::STANDARD));
            assert_eq!(
                convention.contains(CallingConventions::HAS_THIS),
                bits & MethodModifiers::STATIC.bits() == 0,
                "attributes 0x{:04x}",
                bits
            );
            assert_eq!(method.flags().bits(), bits);
        }
    }

    #[test]
    fn test_params_from_types() {
        let int32 = create_int32();
        let string = create_string();
        let method = MethodBaseBuilder::with_param_types(
            method_token(),
            "Format",
            0x0016,
            &[int32.clone(), string.clone()],
        )
        .build()
        .unwrap();

        let params = method.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].position, 0);
        assert_eq!(params[1].position, 1);
        assert!(params.iter().all(|p| p.name.is_none() && p.flags == 0));
        assert_eq!(
            method.params_to_string(),
            "(System.Int32, System.String)"
        );
    }

    #[test]
    fn test_prebuilt_params_kept() {
        let int32 = create_int32();
        let out = Param::from_row(
            Token::new(0x0800_0002),
            Some("result"),
            &CilType::by_ref(&int32),
            ParamAttributes::OUT,
            0,
        );
        let method =
            MethodBaseBuilder::with_params(method_token(), "TryGet", 0x0006, vec![out.clone()])
                .build()
                .unwrap();

        assert!(Arc::ptr_eq(method.param(0).unwrap(), &out));
        assert_eq!(method.param(0).unwrap().name.as_deref(), Some("result"));
        assert!(method.param(1).is_none());
    }

    #[test]
    fn test_params_returns_copy() {
        let int32 = create_int32();
        let method =
            MethodBaseBuilder::with_param_types(method_token(), "Add", 0x0006, &[int32.clone()])
                .build()
                .unwrap();

        let mut copy = method.params();
        copy.clear();
        copy.push(Param::new(Some("extra"), &int32, 0, 7));

        assert_eq!(method.param_count(), 1);
        assert_eq!(method.params()[0].position, 0);
        assert!(method.params()[0].name.is_none());
    }

    #[test]
    fn test_generic_registration() {
        let first = create_generic_param(1, "TValue");
        let second = create_generic_param(0, "TKey");
        let third = create_generic_param(2, "TResult");

        let mut builder = MethodBaseBuilder::with_param_types(method_token(), "Map", 0x0006, &[]);
        assert!(!builder.is_generic());

        builder
            .register_generic_param(first.clone())
            .register_generic_param(second.clone());
        assert!(builder.is_generic());
        assert_eq!(builder.sorted_generic_params().unwrap().len(), 2);

        builder.register_generic_param(third.clone());
        let method = builder.build().unwrap();

        assert!(method.is_generic());
        let sorted = method.sorted_generic_params();
        assert!(Arc::ptr_eq(&sorted[0], &second));
        assert!(Arc::ptr_eq(&sorted[1], &first));
        assert!(Arc::ptr_eq(&sorted[2], &third));

        let registered: Vec<u32> = method.generic_params().iter().map(|p| p.number).collect();
        assert_eq!(registered, vec![1, 0, 2]);
    }

    #[test]
    fn test_build_rejects_foreign_token() {
        let result = MethodBaseBuilder::with_param_types(Token::new(0x0200_0001), "M", 0x0006, &[])
            .build();
        assert!(matches!(result, Err(Error::Malformed { .. })));

        let member_ref =
            MethodBaseBuilder::with_param_types(Token::new(0x0A00_0004), "M", 0x0006, &[])
                .build()
                .unwrap();
        assert_eq!(member_ref.token.table(), 0x0A);
    }

    #[test]
    fn test_build_rejects_ordinal_gap() {
        let result = MethodBaseBuilder::with_param_types(method_token(), "Gap", 0x0006, &[])
            .generic_param(create_generic_param(0, "T"))
            .generic_param(create_generic_param(3, "U"))
            .build();

        assert!(matches!(
            result,
            Err(Error::GenericParamOrdinal {
                ordinal: 1,
                count: 2
            })
        ));
    }

    #[test]
    fn test_build_lenient_ordinal_gap() {
        let method = MethodBaseBuilder::with_param_types(method_token(), "Gap", 0x0006, &[])
            .generic_param(create_generic_param(0, "T"))
            .generic_param(create_generic_param(3, "U"))
            .config(MemberConfig::lenient())
            .build()
            .unwrap();

        assert_eq!(method.generic_params().len(), 2);
        assert_eq!(method.sorted_generic_params().len(), 1);
        assert_eq!(method.sorted_generic_params()[0].name, "T");
    }

    #[test]
    fn test_pointer_param_incompatible() {
        let int32 = create_int32();
        let pointer = CilType::pointer(&int32);
        let method = MethodBaseBuilder::with_param_types(
            method_token(),
            "Copy",
            0x0016,
            &[int32.clone(), pointer.clone()],
        )
        .build()
        .unwrap();

        assert!(method.has_incompatible_param_type());
        assert!(method.has_incompatible_param_or_return_type());
    }

    #[test]
    fn test_by_ref_referents() {
        let int32 = create_int32();
        let array = CilType::szarray(&int32);
        let list = CilType::generic_instance(Token::new(0x1B00_0001), "System.Collections.Generic", "List`1");
        let tvar = CilType::generic_parameter(0, true, "T");
        let point = CilType::value_type(Token::new(0x0200_0004), "Demo", "Point");

        let flagged = [
            CilType::by_ref(&array),
            CilType::by_ref(&list),
            CilType::by_ref(&tvar),
        ];
        for by_ref in &flagged {
            let method =
                MethodBaseBuilder::with_param_types(method_token(), "M", 0x0006, &[by_ref.clone()])
                    .build()
                    .unwrap();
            assert!(
                method.has_incompatible_param_type(),
                "{} should be flagged",
                by_ref
            );
        }

        let accepted = [
            CilType::by_ref(&int32),
            CilType::by_ref(&point),
            create_string(),
            array.clone(),
        ];
        for param_type in &accepted {
            let method = MethodBaseBuilder::with_param_types(
                method_token(),
                "M",
                0x0006,
                &[param_type.clone()],
            )
            .build()
            .unwrap();
            assert!(
                !method.has_incompatible_param_type(),
                "{} should be accepted",
                param_type
            );
        }
    }

    #[test]
    fn test_return_type_checked_for_methods_only() {
        let int32 = create_int32();
        let pointer = CilType::pointer(&int32);

        let method = MethodBaseBuilder::with_param_types(method_token(), "Alloc", 0x0016, &[])
            .returns(&pointer)
            .build()
            .unwrap();
        assert!(!method.has_incompatible_param_type());
        assert!(method.has_incompatible_param_or_return_type());

        let ctor = MethodBaseBuilder::with_param_types(method_token(), ".ctor", 0x1806, &[])
            .constructor()
            .build()
            .unwrap();
        assert!(ctor.return_type().is_none());
        assert!(!ctor.has_incompatible_param_or_return_type());
    }

    fn build_with_temporaries() -> MethodBaseRc {
        let int32 = create_int32();
        MethodBaseBuilder::with_param_types(
            method_token(),
            "Fill",
            0x0016,
            &[CilType::by_ref(&CilType::szarray(&int32))],
        )
        .returns(&CilType::pointer(&int32))
        .build()
        .unwrap()
    }

    #[test]
    fn test_temporary_constructed_types_kept_alive() {
        let int32 = create_int32();
        let pointer_param = MethodBaseBuilder::with_param_types(
            method_token(),
            "Copy",
            0x0016,
            &[CilType::pointer(&int32)],
        )
        .build()
        .unwrap();
        assert!(pointer_param.has_incompatible_param_type());
        assert_eq!(pointer_param.params_to_string(), "(System.Int32*)");

        // Every type built inside the helper is gone from the caller's view
        let method = build_with_temporaries();
        assert!(method.has_incompatible_param_type());
        assert!(method.has_incompatible_param_or_return_type());
        assert_eq!(method.params_to_string(), "(System.Int32[]&)");
        assert_eq!(
            method.to_string(),
            "public static System.Int32* Fill(System.Int32[]&)"
        );
        assert!(method.return_type().is_some_and(|ret| ret.is_pointer()));
    }

    #[test]
    fn test_constructor_special_name() {
        // Word as read: public, no special-name bits
        let kept = MethodBaseBuilder::with_param_types(method_token(), ".ctor", 0x0006, &[])
            .constructor()
            .build()
            .unwrap();
        assert!(kept.is_constructor());
        assert!(!kept.is_special_name());
        assert!(!kept.is_rt_special_name());
        assert_eq!(kept.flags().bits(), 0x0006);

        let persisted = MethodBaseBuilder::with_param_types(method_token(), ".ctor", 0x0006, &[])
            .constructor()
            .config(MemberConfig::strict().with_ctor_special_name(true))
            .build()
            .unwrap();
        assert!(persisted.is_special_name());
        assert!(persisted.is_rt_special_name());
        assert_eq!(persisted.flags().bits(), 0x1806);
        assert_eq!(
            persisted.calling_convention(),
            CallingConventions::STANDARD | CallingConventions::HAS_THIS
        );

        // Only constructors are affected
        let method = MethodBaseBuilder::with_param_types(method_token(), "Run", 0x0006, &[])
            .config(MemberConfig::strict().with_ctor_special_name(true))
            .build()
            .unwrap();
        assert!(!method.is_special_name());
    }

    #[test]
    fn test_impl_flags_passthrough() {
        let method = MethodBaseBuilder::with_param_types(method_token(), "Extern", 0x2016, &[])
            .impl_flags(0x0081)
            .build()
            .unwrap();

        assert_eq!(method.impl_flags(), 0x0081);
        assert_eq!(method.impl_code_type(), MethodImplCodeType::NATIVE);
        assert!(method.impl_management().is_empty());
        assert_eq!(method.impl_options(), MethodImplOptions::PRESERVE_SIG);
        assert!(method.is_pinvoke_impl());
        assert!(!method.is_new_slot());
        assert!(!method.has_security());
    }

    #[test]
    fn test_display() {
        let int32 = create_int32();
        let string = create_string();
        let owner = CilType::class(Token::new(0x0200_0001), "System", "Convert");

        let method = MethodBaseBuilder::with_param_types(
            method_token(),
            "ToInt32",
            0x0096,
            &[string.clone()],
        )
        .declaring_type(&owner)
        .returns(&int32)
        .build()
        .unwrap();
        assert_eq!(
            method.to_string(),
            "public static System.Int32 ToInt32(System.String)"
        );

        let abstract_method =
            MethodBaseBuilder::with_param_types(Token::new(0x0600_0002), "Run", 0x05C4, &[])
                .build()
                .unwrap();
        assert_eq!(abstract_method.to_string(), "family abstract void Run()");
        assert!(abstract_method.is_new_slot());
        assert!(abstract_method.is_abstract());
        assert!(!abstract_method.is_final());

        let ctor = MethodBaseBuilder::with_param_types(
            Token::new(0x0600_0003),
            ".ctor",
            0x1886,
            &[int32.clone()],
        )
        .constructor()
        .build()
        .unwrap();
        assert_eq!(ctor.to_string(), "public .ctor(System.Int32)");
    }

    #[test]
    fn test_declaring_type_back_reference() {
        let owner = CilType::class(Token::new(0x0200_0001), "Demo", "Owner");
        let method = MethodBaseBuilder::with_param_types(method_token(), "M", 0x0006, &[])
            .declaring_type(&owner)
            .build()
            .unwrap();

        let declaring = method.declaring_type().unwrap();
        assert_eq!(declaring.token(), Some(Token::new(0x0200_0001)));
        assert_eq!(Arc::strong_count(&owner), 1);

        assert!(Arc::ptr_eq(
            &method.resolve_declaring_type().unwrap().unwrap(),
            &owner
        ));

        drop(owner);
        assert!(!method.declaring_type().unwrap().is_valid());
        assert!(matches!(
            method.resolve_declaring_type(),
            Err(Error::TypeMissing(ref what)) if what == "declaring type"
        ));

        let orphan = MethodBaseBuilder::with_param_types(method_token(), "M", 0x0006, &[])
            .build()
            .unwrap();
        assert!(orphan.resolve_declaring_type().unwrap().is_none());
    }

    #[test]
    fn test_signature_position_clamped() {
        assert_eq!(signature_position(0), 0);
        assert_eq!(signature_position(41), 41);
        assert_eq!(signature_position(u32::MAX as usize), u32::MAX);
        assert_eq!(signature_position(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_config_policy_applied_to_registry() {
        let mut builder = MethodBaseBuilder::with_param_types(method_token(), "M", 0x0006, &[])
            .generic_param(create_generic_param(4, "T"));
        assert!(builder.sorted_generic_params().is_err());

        let mut builder = builder.config(MemberConfig {
            ordinal_policy: OrdinalPolicy::Lenient,
            persist_ctor_special_name: false,
        });
        assert!(builder.sorted_generic_params().unwrap().is_empty());
    }

    #[test]
    fn test_hide_by_sig_instance() {
        let string = create_string();
        let method = create_method(5, "Equals", &[string.clone()]);

        assert_eq!(method.token.row(), 5);
        assert!(method.is_hide_by_sig());
        assert!(method.is_public());
        assert!(method.is_instance());
        assert!(!method.is_virtual());
        assert!(!method.has_incompatible_param_or_return_type());
        assert_eq!(method.to_string(), "public void Equals(System.String)");
    }

    #[test]
    fn test_flavor_of_primitive_helpers() {
        assert_eq!(create_int32().flavor, CilFlavor::I4);
        assert_eq!(create_string().flavor, CilFlavor::String);
    }
}
