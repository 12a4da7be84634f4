//! Metadata tokens for ECMA-335 cross-references.
//!
//! A token is a 32-bit value: the high byte names the metadata table, the remaining
//! 24 bits are the 1-based row inside that table. Every definition and reference in
//! the model carries one, and type definitions are kept ordered by token which is
//! the declaration order within a module.
//!
//! # Examples
//!
//! ```rust
//! use cilquery::metadata::token::{TableId, Token};
//!
//! let token = Token::from_parts(TableId::TypeDef, 3);
//! assert_eq!(token.value(), 0x0200_0003);
//! assert_eq!(token.table_id(), Some(TableId::TypeDef));
//! assert_eq!(token.row(), 3);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use strum::{Display, EnumIter, IntoEnumIterator};

/// The metadata tables the model hands out tokens for.
///
/// The discriminant is the table byte of ECMA-335 §II.22.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum TableId {
    /// `Module` table
    Module = 0x00,
    /// `TypeRef` table
    TypeRef = 0x01,
    /// `TypeDef` table
    TypeDef = 0x02,
    /// `Field` table
    Field = 0x04,
    /// `MethodDef` table
    MethodDef = 0x06,
    /// `Param` table
    Param = 0x08,
    /// `CustomAttribute` table
    CustomAttribute = 0x0C,
    /// `Assembly` table
    Assembly = 0x20,
    /// `AssemblyRef` table
    AssemblyRef = 0x23,
    /// `GenericParam` table
    GenericParam = 0x2A,
    /// `MethodSpec` table
    MethodSpec = 0x2B,
}

/// A metadata token
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token for `row` inside `table`
    ///
    /// ## Arguments
    /// * 'table' - The table the token points into
    /// * 'row'   - The 1-based row, only the low 24 bits are used
    #[must_use]
    pub fn from_parts(table: TableId, row: u32) -> Self {
        Token(((table as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The table of this token, if it is one the model knows about
    #[must_use]
    pub fn table_id(&self) -> Option<TableId> {
        let table = self.table();
        TableId::iter().find(|id| *id as u8 == table)
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
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

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
