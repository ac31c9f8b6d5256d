use std::fmt;

use crate::error::{Error, Result};

/// The 33 symbols a WMI may contain, in canonical order: the letters A-Z
/// without I, O and Q, then the digits 1-9, then 0.
pub const ALPHABET: [u8; 33] = *b"ABCDEFGHJKLMNPRSTUVWXYZ1234567890";

/// One validated WMI symbol.
///
/// Ordering follows the canonical alphabet, so `0` sorts after `9` and a
/// `BTreeMap<WmiChar, _>` iterates in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WmiChar {
    index: u8,
}

impl WmiChar {
    /// First symbol of the canonical alphabet (`A`).
    pub const MIN: WmiChar = WmiChar { index: 0 };
    /// Last symbol of the canonical alphabet (`0`).
    pub const MAX: WmiChar = WmiChar { index: ALPHABET.len() as u8 - 1 };

    pub fn from_byte(byte: u8) -> Result<Self> {
        ALPHABET
            .iter()
            .position(|allowed| *allowed == byte)
            .map(|index| WmiChar { index: index as u8 })
            .ok_or(Error::Symbol(byte as char))
    }

    pub fn from_char(ch: char) -> Result<Self> {
        if ch.is_ascii() {
            Self::from_byte(ch as u8)
        } else {
            Err(Error::Symbol(ch))
        }
    }

    /// Symbol at `index` of the canonical alphabet.
    pub fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < ALPHABET.len() {
            Some(WmiChar { index })
        } else {
            None
        }
    }

    /// Position in the canonical alphabet.
    pub fn index(self) -> u8 {
        self.index
    }

    pub fn as_byte(self) -> u8 {
        ALPHABET[self.index as usize]
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for WmiChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A full three-symbol WMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wmi {
    symbols: [WmiChar; 3],
}

impl Wmi {
    /// Validate a raw code: exactly three symbols, all in the alphabet.
    pub fn parse(code: &str) -> Result<Self> {
        let mut chars = code.chars();
        let symbols = match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), Some(c), None) => [
                WmiChar::from_char(a)?,
                WmiChar::from_char(b)?,
                WmiChar::from_char(c)?,
            ],
            _ => return Err(Error::WmiLength(code.to_string())),
        };
        Ok(Wmi { symbols })
    }

    pub fn symbols(self) -> [WmiChar; 3] {
        self.symbols
    }

    /// First symbol, the one that carries the continent allocation.
    pub fn first(self) -> WmiChar {
        self.symbols[0]
    }
}

impl fmt::Display for Wmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
