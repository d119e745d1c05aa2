//! Method attribute, implementation and calling convention flags.
//!
//! This module turns the packed 16-bit words of a `MethodDef` row into typed values. Nothing
//! in here validates the words: inconsistent combinations are decoded exactly as they are
//! stored.
//!
//! # Key Types
//! - [`MethodAttributes`]: The attribute word with its named predicates
//! - [`MethodAccess`]: The accessibility field (mutually exclusive values)
//! - [`MethodModifiers`], [`MethodVtableFlags`]: Independently combinable attribute bits
//! - [`MethodImplCodeType`], [`MethodImplManagement`], [`MethodImplOptions`]: Implementation flags
//! - [`CallingConventions`]: How the receiver and arguments are passed

use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter};

/// Bitmask for `CODE_TYPE` extraction
pub const METHOD_IMPL_CODE_TYPE_MASK: u16 = 0x0003;
/// Bitmask for `MANAGED` state extraction
pub const METHOD_IMPL_MANAGED_MASK: u16 = 0x0004;
/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u16 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u16 = 0x0100;

// Method implementation flags split into logical groups
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method implementation code type flags
    pub struct MethodImplCodeType: u16 {
        /// Method impl is IL
        const IL = 0x0000;
        /// Method impl is native
        const NATIVE = 0x0001;
        /// Method impl is OPTIL
        const OPTIL = 0x0002;
        /// Method impl is provided by the runtime
        const RUNTIME = 0x0003;
    }
}

impl MethodImplCodeType {
    /// Extract code type from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & METHOD_IMPL_CODE_TYPE_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method implementation management flags
    pub struct MethodImplManagement: u16 {
        /// Method impl is unmanaged, otherwise managed
        const UNMANAGED = 0x0004;
    }
}

impl MethodImplManagement {
    /// Extract management type from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & METHOD_IMPL_MANAGED_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method implementation additional options
    pub struct MethodImplOptions: u16 {
        /// Method cannot be inlined
        const NO_INLINING = 0x0008;
        /// Method is defined; used primarily in merge scenarios
        const FORWARD_REF = 0x0010;
        /// Method is a synchronized method
        const SYNCHRONIZED = 0x0020;
        /// Method will not be optimized when generating native code
        const NO_OPTIMIZATION = 0x0040;
        /// Method signature is exported exactly as declared (P/Invoke)
        const PRESERVE_SIG = 0x0080;
        /// Method should be inlined if possible
        const AGGRESSIVE_INLINING = 0x0100;
        /// Method is implemented inside the runtime
        const INTERNAL_CALL = 0x1000;
    }
}

impl MethodImplOptions {
    /// Extract implementation options from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & !(METHOD_IMPL_CODE_TYPE_MASK | METHOD_IMPL_MANAGED_MASK))
    }
}

/// The accessibility field of the method attributes, §II.23.1.10.
///
/// The values are not independent bits: the field is compared as a whole against each of
/// them, so exactly one value matches any attribute word (the reserved `7` matches none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[repr(u16)]
pub enum MethodAccess {
    /// Member not referenceable
    #[strum(serialize = "privatescope")]
    CompilerControlled = 0x0000,
    /// Accessible only by the parent type
    #[strum(serialize = "private")]
    Private = 0x0001,
    /// Accessible by sub-types only in this Assembly
    #[strum(serialize = "famandassem")]
    FamANDAssem = 0x0002,
    /// Accessibly by anyone in the Assembly
    #[strum(serialize = "assembly")]
    Assem = 0x0003,
    /// Accessible only by type and sub-types
    #[strum(serialize = "family")]
    Family = 0x0004,
    /// Accessibly by sub-types anywhere, plus anyone in assembly
    #[strum(serialize = "famorassem")]
    FamORAssem = 0x0005,
    /// Accessibly by anyone who has visibility to this scope
    #[strum(serialize = "public")]
    Public = 0x0006,
}

impl MethodAccess {
    /// Decode the accessibility field of raw method attributes
    ///
    /// Returns `None` for the reserved value `7`.
    #[must_use]
    pub fn from_method_flags(flags: u16) -> Option<Self> {
        match flags & METHOD_ACCESS_MASK {
            0x0000 => Some(MethodAccess::CompilerControlled),
            0x0001 => Some(MethodAccess::Private),
            0x0002 => Some(MethodAccess::FamANDAssem),
            0x0003 => Some(MethodAccess::Assem),
            0x0004 => Some(MethodAccess::Family),
            0x0005 => Some(MethodAccess::FamORAssem),
            0x0006 => Some(MethodAccess::Public),
            _ => None,
        }
    }

    /// The canonical value of this access level within the attribute word
    #[must_use]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method vtable layout flags
    pub struct MethodVtableFlags: u16 {
        /// Method reuses existing slot in vtable
        const REUSE_SLOT = 0x0000;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
    }
}

impl MethodVtableFlags {
    /// Extract vtable layout flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u16 {
        /// Reserved: shall be zero for conforming implementations
        const UNMANAGED_EXPORT = 0x0008;
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// Method has security associate with it
        const HAS_SECURITY = 0x4000;
        /// Method calls another method containing security code
        const REQUIRE_SEC_OBJECT = 0x8000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Calling conventions of a callable member, as exposed to an emitter
    pub struct CallingConventions: u16 {
        /// Default managed calling convention
        const STANDARD = 0x0001;
        /// Variable argument list
        const VAR_ARGS = 0x0002;
        /// Either `STANDARD` or `VAR_ARGS`
        const ANY = 0x0003;
        /// An instance receiver (`this`) is passed
        const HAS_THIS = 0x0020;
        /// The receiver is an explicit first parameter of the signature
        const EXPLICIT_THIS = 0x0040;
    }
}

impl CallingConventions {
    /// Derive the calling convention of a member from its attribute word.
    ///
    /// `STANDARD` is always set, `HAS_THIS` exactly when the member is not static.
    #[must_use]
    pub fn from_attributes(attributes: MethodAttributes) -> Self {
        if attributes.is_static() {
            CallingConventions::STANDARD
        } else {
            CallingConventions::STANDARD | CallingConventions::HAS_THIS
        }
    }
}

/// The packed 16-bit attribute word of a method or constructor (`MethodAttributes`, §II.23.1.10).
///
/// The raw value is kept as read; all queries are pure mask tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MethodAttributes(u16);

impl MethodAttributes {
    /// Wrap a raw attribute word
    #[must_use]
    pub const fn new(bits: u16) -> Self {
        MethodAttributes(bits)
    }

    /// The raw attribute word
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The decoded accessibility, `None` for the reserved value
    #[must_use]
    pub fn access(self) -> Option<MethodAccess> {
        MethodAccess::from_method_flags(self.0)
    }

    /// The independent modifier bits
    #[must_use]
    pub fn modifiers(self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.0)
    }

    /// The vtable layout
    #[must_use]
    pub fn vtable(self) -> MethodVtableFlags {
        MethodVtableFlags::from_method_flags(self.0)
    }

    fn has(self, modifier: MethodModifiers) -> bool {
        self.0 & modifier.bits() != 0
    }

    fn access_is(self, access: MethodAccess) -> bool {
        self.0 & METHOD_ACCESS_MASK == access.bits()
    }

    /// Is `abstract`
    #[must_use]
    pub fn is_abstract(self) -> bool {
        self.has(MethodModifiers::ABSTRACT)
    }

    /// Is `final` (`sealed`)
    #[must_use]
    pub fn is_final(self) -> bool {
        self.has(MethodModifiers::FINAL)
    }

    /// Is `virtual`
    #[must_use]
    pub fn is_virtual(self) -> bool {
        self.has(MethodModifiers::VIRTUAL)
    }

    /// Is `static`
    #[must_use]
    pub fn is_static(self) -> bool {
        self.has(MethodModifiers::STATIC)
    }

    /// Neither `static` nor `virtual`.
    ///
    /// Virtual members are not reported as instance members, even though they take a receiver.
    /// Use `!is_static()` for "has a receiver".
    #[must_use]
    pub fn is_instance(self) -> bool {
        !self.is_static() && !self.is_virtual()
    }

    /// Is `hidebysig`
    #[must_use]
    pub fn is_hide_by_sig(self) -> bool {
        self.has(MethodModifiers::HIDE_BY_SIG)
    }

    /// Is `specialname`
    #[must_use]
    pub fn is_special_name(self) -> bool {
        self.has(MethodModifiers::SPECIAL_NAME)
    }

    /// Is `rtspecialname`
    #[must_use]
    pub fn is_rt_special_name(self) -> bool {
        self.has(MethodModifiers::RTSPECIAL_NAME)
    }

    /// Is `pinvokeimpl`
    #[must_use]
    pub fn is_pinvoke_impl(self) -> bool {
        self.has(MethodModifiers::PINVOKE_IMPL)
    }

    /// Has `DeclSecurity` attached
    #[must_use]
    pub fn has_security(self) -> bool {
        self.has(MethodModifiers::HAS_SECURITY)
    }

    /// Is `newslot`
    #[must_use]
    pub fn is_new_slot(self) -> bool {
        self.0 & MethodVtableFlags::NEW_SLOT.bits() != 0
    }

    /// Is `public`
    #[must_use]
    pub fn is_public(self) -> bool {
        self.access_is(MethodAccess::Public)
    }

    /// Is `private`
    #[must_use]
    pub fn is_private(self) -> bool {
        self.access_is(MethodAccess::Private)
    }

    /// Is `family` (protected)
    #[must_use]
    pub fn is_family(self) -> bool {
        self.access_is(MethodAccess::Family)
    }

    /// Is `assembly` (internal)
    #[must_use]
    pub fn is_assembly(self) -> bool {
        self.access_is(MethodAccess::Assem)
    }

    /// Is `famorassem` (protected internal)
    #[must_use]
    pub fn is_family_or_assembly(self) -> bool {
        self.access_is(MethodAccess::FamORAssem)
    }

    /// Is `famandassem` (private protected)
    #[must_use]
    pub fn is_family_and_assembly(self) -> bool {
        self.access_is(MethodAccess::FamANDAssem)
    }
}

impl From<u16> for MethodAttributes {
    fn from(bits: u16) -> Self {
        MethodAttributes(bits)
    }
}

impl From<MethodAttributes> for u16 {
    fn from(attributes: MethodAttributes) -> Self {
        attributes.0
    }
}
