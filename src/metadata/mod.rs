//! Member metadata for .NET CIL assemblies.
//!
//! The loader that parses the PE container and the metadata streams is not part of this crate.
//! Everything in here consumes values that are already resolved: tokens, names, attribute words
//! and types.

/// Options that control how member descriptors are frozen
pub mod config;
/// Implementation of method and constructor descriptors
pub mod method;
/// Implementation of the `Param` and `GenericParam` descriptors
pub mod tables;
/// Commonly used metadata token type
pub mod token;
/// Implementation of the .NET type model used by members
pub mod typesystem;
