//! .NET type model consumed by member descriptors.
//!
//! Member descriptors never parse signatures; they receive resolved types. This module holds
//! the part of the type model they need: named types, constructed types (pointers, by-refs,
//! arrays) with their element type, and the capability queries used by the emission-safety
//! check.
//!
//! # Key Components
//!
//! - [`CilType`]: A named or constructed type, and the owner of its member table
//! - [`CilFlavor`]: What kind of type a [`CilType`] is
//! - [`CilTypeRef`]: Non-owning reference used for back-references and parameter types
//!
//! # Examples
//!
//! ```rust
//! use cilmember::metadata::typesystem::{CilFlavor, CilType};
//!
//! let int32 = CilType::primitive(CilFlavor::I4, "System", "Int32");
//! let array = CilType::szarray(&int32);
//! let by_ref = CilType::by_ref(&array);
//!
//! assert_eq!(by_ref.fullname(), "System.Int32[]&");
//! assert!(by_ref.is_by_ref());
//! assert!(!by_ref.element_type().unwrap().can_take_address());
//! ```

mod base;

use std::{fmt, sync::Arc};

pub use base::{CilFlavor, CilTypeRef, CilTypeRefList};

use crate::metadata::{
    method::{MethodBaseRc, MethodMap},
    token::Token,
};

/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

/// Represents a 'Type'. Named types carry the token of their `TypeDef` / `TypeRef` row,
/// constructed types (pointer, by-ref, array) carry a null token and their element type.
pub struct CilType {
    /// Token
    pub token: Token,
    /// The `TypeFlavor`
    pub flavor: CilFlavor,
    /// `TypeNamespace` (can be empty, e.g. for generic parameters or `<Module>`)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Element type of a pointer, by-ref or array type
    element: Option<CilTypeRc>,
    /// All methods and constructors this type declares, keyed by their token
    pub methods: MethodMap,
}

impl CilType {
    /// Create a new instance of a `CilType`
    pub fn new(token: Token, flavor: CilFlavor, namespace: &str, name: &str) -> Self {
        CilType {
            token,
            flavor,
            namespace: namespace.to_string(),
            name: name.to_string(),
            element: None,
            methods: MethodMap::new(),
        }
    }

    /// Create a built-in type such as `System.Int32`
    pub fn primitive(flavor: CilFlavor, namespace: &str, name: &str) -> CilTypeRc {
        Arc::new(CilType::new(Token::new(0), flavor, namespace, name))
    }

    /// Create a named class from its `TypeDef` / `TypeRef` token
    pub fn class(token: Token, namespace: &str, name: &str) -> CilTypeRc {
        Arc::new(CilType::new(token, CilFlavor::Class, namespace, name))
    }

    /// Create a named value type from its `TypeDef` / `TypeRef` token
    pub fn value_type(token: Token, namespace: &str, name: &str) -> CilTypeRc {
        Arc::new(CilType::new(token, CilFlavor::ValueType, namespace, name))
    }

    /// Create an instantiation of a generic type, e.g. ``List`1<int>``
    pub fn generic_instance(token: Token, namespace: &str, name: &str) -> CilTypeRc {
        Arc::new(CilType::new(
            token,
            CilFlavor::GenericInstance,
            namespace,
            name,
        ))
    }

    /// Create a usage of a generic parameter (`!index` for types, `!!index` for methods)
    pub fn generic_parameter(index: u32, method: bool, name: &str) -> CilTypeRc {
        Arc::new(CilType::new(
            Token::new(0),
            CilFlavor::GenericParameter { index, method },
            "",
            name,
        ))
    }

    /// Create an unmanaged pointer to `element` (`T*`)
    pub fn pointer(element: &CilTypeRc) -> CilTypeRc {
        Self::constructed(CilFlavor::Pointer, element, "*")
    }

    /// Create a managed reference to `element` (`T&`)
    pub fn by_ref(element: &CilTypeRc) -> CilTypeRc {
        Self::constructed(CilFlavor::ByRef, element, "&")
    }

    /// Create a single-dimension, zero-based array of `element` (`T[]`)
    pub fn szarray(element: &CilTypeRc) -> CilTypeRc {
        Self::constructed(CilFlavor::Array { rank: 1 }, element, "[]")
    }

    /// Create a multi-dimensional array of `element` (`T[,]` for rank 2)
    pub fn array(element: &CilTypeRc, rank: u32) -> CilTypeRc {
        let commas = ",".repeat(rank.saturating_sub(1) as usize);
        Self::constructed(CilFlavor::Array { rank }, element, &format!("[{}]", commas))
    }

    fn constructed(flavor: CilFlavor, element: &CilTypeRc, suffix: &str) -> CilTypeRc {
        let mut new_type = CilType::new(
            Token::new(0),
            flavor,
            &element.namespace,
            &format!("{}{}", element.name, suffix),
        );
        new_type.element = Some(element.clone());
        Arc::new(new_type)
    }

    /// Returns the full name (Namespace.Name) of the entity
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Is this an unmanaged pointer type
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self.flavor, CilFlavor::Pointer)
    }

    /// Is this a managed reference (by-ref) type
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self.flavor, CilFlavor::ByRef)
    }

    /// Is this an array type
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.flavor, CilFlavor::Array { .. })
    }

    /// The type this pointer, by-ref or array type is built from
    #[must_use]
    pub fn element_type(&self) -> Option<CilTypeRc> {
        self.element.clone()
    }

    /// Can emitted code take the address of a value of this type
    #[must_use]
    pub fn can_take_address(&self) -> bool {
        self.flavor.is_addressable()
    }

    /// Register a frozen member in this type's member table, replacing any member with the
    /// same token
    pub fn add_method(&self, method: MethodBaseRc) {
        self.methods.insert(method.token, method);
    }

    /// Look up a member by its token
    #[must_use]
    pub fn method(&self, token: Token) -> Option<MethodBaseRc> {
        self.methods.get(&token).map(|entry| entry.value().clone())
    }
}

impl fmt::Display for CilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Debug for CilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CilType")
            .field("token", &self.token)
            .field("flavor", &self.flavor)
            .field("name", &self.fullname())
            .field("methods", &self.methods.len())
            .finish()
    }
}
