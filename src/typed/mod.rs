//! Type-erased keys and values plus the guarded accessor seam.

pub mod typedkey;
pub mod typedvalue;

use crate::error::Error;

use self::{typedkey::Key, typedvalue::TypedValue};

/// Checked access to a key-value store.
///
/// Every call validates the key, and writes validate the value, before the
/// backing storage is touched.
pub trait GuardedAccessor {
    fn read(&self, key: &Key) -> Result<Option<&TypedValue>, Error>;

    fn write(&mut self, key: Key, value: TypedValue) -> Result<(), Error>;

    fn remove(&mut self, key: &Key) -> Result<Option<TypedValue>, Error>;
}
