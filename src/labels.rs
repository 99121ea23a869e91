// src/labels.rs - Class index <-> fingerspelling symbol
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Result, SignError};

/// Number of classes: 26 letters plus DEL and SPACE
pub const NUM_CLASSES: usize = 28;

const DELETE_INDEX: usize = 26;
const SPACE_INDEX: usize = 27;

/// An uppercase ASCII letter, stored as its offset from `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(u8);

impl Letter {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_uppercase().then(|| Letter(c as u8 - b'A'))
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Letter(Letter),
    Delete,
    Space,
}

impl Symbol {
    /// `Symbol::Letter` for `A..=Z`, `None` for anything else.
    pub fn letter(c: char) -> Option<Self> {
        Letter::new(c).map(Symbol::Letter)
    }

    /// Class index this symbol is trained on.
    pub fn index(&self) -> usize {
        match self {
            Symbol::Letter(letter) => letter.0 as usize,
            Symbol::Delete => DELETE_INDEX,
            Symbol::Space => SPACE_INDEX,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Letter(letter) => write!(f, "{}", letter.as_char()),
            Symbol::Delete => write!(f, "DEL"),
            Symbol::Space => write!(f, "SPACE"),
        }
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "DEL" => Ok(Symbol::Delete),
            "SPACE" => Ok(Symbol::Space),
            _ => {
                let mut chars = s.chars();
                let symbol = match (chars.next(), chars.next()) {
                    (Some(c), None) => Symbol::letter(c),
                    _ => None,
                };
                symbol.ok_or_else(|| format!("unknown symbol '{}'", s))
            }
        }
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map a winning class index to its symbol.
pub fn decode(index: usize) -> Result<Symbol> {
    match index {
        0..=25 => Ok(Symbol::Letter(Letter(index as u8))),
        DELETE_INDEX => Ok(Symbol::Delete),
        SPACE_INDEX => Ok(Symbol::Space),
        _ => Err(SignError::InvalidClassIndex(index)),
    }
}

/// All symbols in class-index order.
pub fn all_symbols() -> Vec<Symbol> {
    (0..NUM_CLASSES).filter_map(|i| decode(i).ok()).collect()
}
