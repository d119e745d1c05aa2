// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # cilmember
//!
//! Metadata descriptors for callable members (methods and constructors) of .NET assemblies.
//!
//! `cilmember` sits between a metadata loader and a CIL emitter. The loader hands over
//! already-resolved data (name, declaring type, the packed `MethodAttributes` word, parameter
//! types and generic parameters) and this crate turns it into a frozen [`MethodBase`] that
//! answers the questions an emitter has to ask before referencing the member:
//!
//! - **Flag decoding** - accessibility, virtuality, static/instance and special-name queries
//!   over the 16-bit attribute word, without exposing the raw bit layout
//! - **Generic parameters** - an append-only registry that keeps declaration identity and
//!   offers an ordinal-sorted view
//! - **Emission safety** - a conservative check for pointer parameters and by-reference
//!   parameters whose referent cannot have its address taken
//!
//! ## Quick Start
//!
//! ```rust
//! use cilmember::prelude::*;
//!
//! let int32 = CilType::primitive(CilFlavor::I4, "System", "Int32");
//! let int32_ref = CilType::by_ref(&int32);
//!
//! let method = MethodBaseBuilder::with_param_types(
//!     Token::new(0x0600_0001),
//!     "TryGet",
//!     MethodModifiers::HIDE_BY_SIG.bits() | MethodAccess::Public.bits(),
//!     &[int32.clone(), int32_ref.clone()],
//! )
//! .returns(&int32)
//! .build()?;
//!
//! assert!(method.is_public());
//! assert!(method.is_instance());
//! assert!(!method.has_incompatible_param_or_return_type());
//! assert_eq!(method.params_to_string(), "(System.Int32, System.Int32&)");
//! # Ok::<(), cilmember::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::method`] - [`MethodBase`], its builder and the attribute flag types
//! - [`metadata::typesystem`] - The type model consulted by the compatibility analysis
//! - [`metadata::tables`] - `Param` and `GenericParam` descriptors
//! - [`metadata::config`] - Options applied while freezing a member
//! - [`Error`] and [`Result`] - Error handling

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use cilmember::prelude::*;
///
/// let method = MethodBaseBuilder::with_param_types(Token::new(0x0600_0001), "Main", 0x0016, &[])
///     .build()?;
/// assert!(method.is_static());
/// # Ok::<(), cilmember::Error>(())
/// ```
pub mod prelude;

/// Member descriptors, flags and the type model they rely on
///
/// # Key Components
///
/// - [`metadata::method::MethodBase`] - Frozen method / constructor descriptor
/// - [`metadata::method::MethodBaseBuilder`] - Registration phase before freezing
/// - [`metadata::typesystem::CilType`] - Types of parameters and return values
/// - [`metadata::tables::Param`] / [`metadata::tables::GenericParam`] - Member parts
pub mod metadata;

/// `cilmember` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilmember` Error type
pub use error::Error;

/// Frozen descriptor of a method or constructor.
///
/// See [`metadata::method::MethodBase`].
pub use metadata::method::MethodBase;
