//! Metadata tokens identifying members and their parts.
//!
//! A token packs the metadata table into the high byte and the 1-based row into the low
//! 24 bits. Member descriptors are keyed by their token in the declaring type's member table.

use std::fmt;

/// Table byte of `TypeDef` tokens
pub const TABLE_TYPEDEF: u8 = 0x02;
/// Table byte of `MethodDef` tokens
pub const TABLE_METHODDEF: u8 = 0x06;
/// Table byte of `Param` tokens
pub const TABLE_PARAM: u8 = 0x08;
/// Table byte of `MemberRef` tokens
pub const TABLE_MEMBERREF: u8 = 0x0A;
/// Table byte of `GenericParam` tokens
pub const TABLE_GENERICPARAM: u8 = 0x2A;

/// A metadata token representing a reference to a metadata table entry.
///
/// - The high byte (bits 24-31) indicates the table
/// - The low 24 bits (bits 0-23) indicate the row within that table
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table byte and a row
    ///
    /// Rows wider than 24 bits are truncated.
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the token names a member that can be called: a `MethodDef` or `MemberRef`
    #[must_use]
    pub fn is_callable_member(&self) -> bool {
        matches!(self.table(), TABLE_METHODDEF | TABLE_MEMBERREF)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
