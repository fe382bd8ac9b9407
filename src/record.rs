use std::{any::Any, collections::HashMap};

use crate::{
    error::{Error, Mismatch, Violation},
    kind::{KeyKind, ValueKind},
    typed::{typedkey::Key, typedvalue::TypedValue, GuardedAccessor},
};

/// The unguarded mapping a record is built from.
pub type RawRecord = HashMap<Key, TypedValue>;

/// Settings for building a `TypedRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOptions {
    /// Re-validate stored values on read.
    pub strict: bool,
    /// Check every entry of the raw mapping before handing out the record.
    pub validate: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            strict: true,
            validate: true,
        }
    }
}

impl RecordOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No eager validation and no re-validation on read.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict: false,
            validate: false,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn build(
        self,
        raw: RawRecord,
        key_kind: KeyKind,
        value_kind: ValueKind,
    ) -> Result<TypedRecord, Error> {
        if self.validate {
            // Keys first, so a raw mapping with both kinds of violation always
            // reports the key one regardless of map iteration order.
            if let Some(key) = raw.keys().find(|key| !key_kind.accepts(key)) {
                tracing::debug!("Rejecting raw record: key {} is not a {}", key, key_kind);
                return Err(Error::Construction(Violation::Key));
            }
            if let Some((key, value)) = raw.iter().find(|(_, value)| !value_kind.accepts(value)) {
                tracing::debug!(
                    "Rejecting raw record: value {:?} under {} is not a {}",
                    value,
                    key,
                    value_kind.describe()
                );
                return Err(Error::Construction(Violation::Value));
            }
        }
        tracing::trace!(
            "Built {} record with {} entries (strict: {}, validated: {})",
            key_kind,
            raw.len(),
            self.strict,
            self.validate
        );
        let mut record = TypedRecord::unchecked(raw, key_kind, value_kind);
        record.strict = self.strict;
        Ok(record)
    }
}

/// A mapping whose keys and values are checked against declared kinds on every access.
pub struct TypedRecord {
    items: RawRecord,
    key_kind: KeyKind,
    value_kind: ValueKind,
    strict: bool,
}

impl TypedRecord {
    pub(crate) fn unchecked(raw: RawRecord, key_kind: KeyKind, value_kind: ValueKind) -> Self {
        Self {
            items: raw,
            key_kind,
            value_kind,
            strict: false,
        }
    }

    #[must_use]
    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    #[must_use]
    pub fn value_kind(&self) -> &ValueKind {
        &self.value_kind
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn check_key(&self, key: &Key) -> Result<(), Error> {
        if self.key_kind.accepts(key) {
            Ok(())
        } else {
            tracing::debug!("Key {} rejected, expected {}", key, self.key_kind);
            Err(Error::KeyKind {
                expected: self.key_kind,
                key: key.clone(),
            })
        }
    }

    fn check_value(&self, key: &Key, value: &TypedValue) -> Result<(), Error> {
        if self.value_kind.accepts(value) {
            return Ok(());
        }
        tracing::debug!("Value {:?} for {} rejected", value, key);
        let mismatch = match &self.value_kind {
            ValueKind::Guard(_) => Mismatch::GuardRejected,
            ValueKind::Nominal(desc) => Mismatch::WrongType {
                expected: desc.name(),
                found: value.type_name(),
            },
        };
        Err(Error::ValueKind {
            key: key.clone(),
            mismatch,
        })
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored. In strict mode a stored value
    /// that no longer matches the value kind fails with `StoredValueCorrupted`.
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<&TypedValue>, Error> {
        self.read(&key.into())
    }

    /// Reads the value under `key` as a `V`; a value of another type reads as `None`.
    pub fn get_as<V: Any>(&self, key: impl Into<Key>) -> Result<Option<&V>, Error> {
        Ok(self.get(key)?.and_then(|v| v.downcast_ref::<V>()))
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Storage is left untouched when the key or value is rejected.
    pub fn set(&mut self, key: impl Into<Key>, value: TypedValue) -> Result<(), Error> {
        self.write(key.into(), value)
    }

    /// Wraps `value` in a `TypedValue` and stores it under `key`.
    pub fn insert<V: Any + Send + Sync>(
        &mut self,
        key: impl Into<Key>,
        value: V,
    ) -> Result<(), Error> {
        self.set(key, TypedValue::from_value(value))
    }

    /// Removes the value under `key`. The key must still match the key kind.
    pub fn delete(&mut self, key: impl Into<Key>) -> Result<Option<TypedValue>, Error> {
        self.remove(&key.into())
    }

    /// Returns whether anything is stored under `key`, without checking its kind.
    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.items.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &TypedValue)> {
        self.items.iter()
    }

    /// Unguarded access to the backing storage. Nothing written here is checked
    /// until a strict read finds it.
    pub fn raw_mut(&mut self) -> &mut RawRecord {
        &mut self.items
    }

    #[must_use]
    pub fn into_inner(self) -> RawRecord {
        self.items
    }
}

impl GuardedAccessor for TypedRecord {
    fn read(&self, key: &Key) -> Result<Option<&TypedValue>, Error> {
        self.check_key(key)?;
        let Some(value) = self.items.get(key) else {
            return Ok(None);
        };
        if self.strict && !self.value_kind.accepts(value) {
            tracing::debug!("Stored value {:?} under {} failed re-validation", value, key);
            return Err(Error::StoredValueCorrupted {
                key: key.clone(),
                expected: self.value_kind.describe(),
            });
        }
        Ok(Some(value))
    }

    fn write(&mut self, key: Key, value: TypedValue) -> Result<(), Error> {
        self.check_key(&key)?;
        self.check_value(&key, &value)?;
        tracing::trace!("Storing {:?} under {}", value, key);
        self.items.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &Key) -> Result<Option<TypedValue>, Error> {
        self.check_key(key)?;
        let removed = self.items.remove(key);
        if removed.is_some() {
            tracing::trace!("Removed {}", key);
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for TypedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedRecord")
            .field("key_kind", &self.key_kind)
            .field("value_kind", &self.value_kind)
            .field("strict", &self.strict)
            .field("items", &self.items)
            .finish()
    }
}
