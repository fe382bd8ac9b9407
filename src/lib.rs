pub mod error;
pub mod kind;
pub mod record;
pub mod typed;

pub use crate::{
    error::Error,
    kind::{KeyKind, ValueKind},
    record::{RawRecord, RecordOptions, TypedRecord},
    typed::{
        typedkey::{Key, Symbol},
        typedvalue::TypedValue,
        GuardedAccessor,
    },
};

// Record wraps the raw mapping without looking at its current entries. Reads
// return whatever is stored; writes are checked.
pub fn record(raw: RawRecord, key_kind: KeyKind, value_kind: ValueKind) -> TypedRecord {
    TypedRecord::unchecked(raw, key_kind, value_kind)
}

// ValidatedRecord checks every entry of the raw mapping first and fails with
// Error::Construction on the first invalid key or value.
pub fn validated_record(
    raw: RawRecord,
    key_kind: KeyKind,
    value_kind: ValueKind,
    strict: bool,
) -> Result<TypedRecord, Error> {
    RecordOptions::new()
        .strict(strict)
        .build(raw, key_kind, value_kind)
}
