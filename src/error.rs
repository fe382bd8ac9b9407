use std::fmt;

use crate::{kind::KeyKind, typed::typedkey::Key};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Gets returned when a key of the wrong kind is used to read, write or remove.
    #[error("You must use type {expected} for keys, got {key}.")]
    KeyKind { expected: KeyKind, key: Key },
    /// Gets returned when a written value fails the record's value kind.
    #[error("Rejected value for property {key}: {mismatch}.")]
    ValueKind { key: Key, mismatch: Mismatch },
    /// Gets returned by strict reads when the stored value no longer matches the value kind.
    #[error("Value stored under {key} is not a valid {expected}, the backing storage was modified outside the record.")]
    StoredValueCorrupted { key: Key, expected: String },
    /// Gets returned by eager validation when the raw mapping holds an invalid entry.
    #[error("Could not construct record: {0}.")]
    Construction(Violation),
    /// Gets returned when a textual key kind tag names none of the three kinds.
    #[error("Unknown key kind `{0}`, expected one of String, Number or Symbol.")]
    UnknownKeyKind(String),
}

/// Why a value failed the value check on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    GuardRejected,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::GuardRejected => f.write_str("the type guard doesn't return true"),
            Mismatch::WrongType { expected, found } => {
                write!(f, "you must use type {expected} for values, found {found}")
            }
        }
    }
}

/// The class of invalid entry found while validating a raw mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Key,
    Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Key => f.write_str("a key does not match the declared key kind"),
            Violation::Value => f.write_str("a value does not match the declared value kind"),
        }
    }
}
