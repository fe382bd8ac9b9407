use std::{
    any::{Any, TypeId},
    fmt,
    str::FromStr,
    sync::Arc,
};

use crate::{
    error::Error,
    typed::{typedkey::Key, typedvalue::TypedValue},
};

/// The kind every key of a record must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    String,
    /// String keys holding a canonical decimal integer such as `"42"` or `"-3"`.
    Numeric,
    Symbolic,
}

impl KeyKind {
    #[must_use]
    pub fn accepts(&self, key: &Key) -> bool {
        match (self, key) {
            (KeyKind::String, Key::String(_)) => true,
            (KeyKind::Numeric, Key::String(s)) => is_canonical_integer(s),
            (KeyKind::Symbolic, Key::Symbol(_)) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            KeyKind::String => "String",
            KeyKind::Numeric => "Number",
            KeyKind::Symbolic => "Symbol",
        }
    }
}

// Parse and re-render: anything that doesn't survive the round trip unchanged
// ("00", "+1", "-0", "3.0", " 1") is not a numeric key.
fn is_canonical_integer(s: &str) -> bool {
    s.parse::<i64>().map_or(false, |n| n.to_string() == s)
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(KeyKind::String),
            "number" | "numeric" => Ok(KeyKind::Numeric),
            "symbol" | "symbolic" => Ok(KeyKind::Symbolic),
            _ => Err(Error::UnknownKeyKind(s.to_owned())),
        }
    }
}

/// A nominal type, compared by `TypeId` identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    #[must_use]
    pub fn of<V: Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Null never matches; anything else matches only its exact type.
    #[must_use]
    pub fn matches(&self, value: &TypedValue) -> bool {
        value.value_type_id() == Some(self.id)
    }
}

pub type Guard = Arc<dyn Fn(&TypedValue) -> bool + Send + Sync>;

/// The kind every value of a record must belong to.
#[derive(Clone)]
pub enum ValueKind {
    Nominal(TypeDescriptor),
    Guard(Guard),
}

impl ValueKind {
    #[must_use]
    pub fn of<V: Any>() -> Self {
        ValueKind::Nominal(TypeDescriptor::of::<V>())
    }

    pub fn guard(f: impl Fn(&TypedValue) -> bool + Send + Sync + 'static) -> Self {
        ValueKind::Guard(Arc::new(f))
    }

    /// A guard over values of type `V`; values of any other type (and null) are rejected
    /// without calling `f`.
    pub fn typed_guard<V: Any>(f: impl Fn(&V) -> bool + Send + Sync + 'static) -> Self {
        ValueKind::guard(move |value: &TypedValue| value.downcast_ref::<V>().map_or(false, &f))
    }

    /// Runs the value check. A panicking guard unwinds through the caller.
    #[must_use]
    pub fn accepts(&self, value: &TypedValue) -> bool {
        match self {
            ValueKind::Nominal(desc) => desc.matches(value),
            ValueKind::Guard(guard) => guard(value),
        }
    }

    #[must_use]
    pub fn is_guard(&self) -> bool {
        matches!(self, ValueKind::Guard(_))
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Nominal(desc) => desc.name().to_owned(),
            ValueKind::Guard(_) => "guarded value".to_owned(),
        }
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Nominal(desc) => f.debug_tuple("Nominal").field(&desc.name()).finish(),
            ValueKind::Guard(_) => f.write_str("Guard(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_keys_must_be_canonical() {
        for ok in ["0", "42", "-3", "9223372036854775807"] {
            assert!(KeyKind::Numeric.accepts(&Key::from(ok)), "{ok}");
        }
        for bad in ["3.0", "00", "1e2", " 1", "+1", "-0", "", "abc", "99999999999999999999"] {
            assert!(!KeyKind::Numeric.accepts(&Key::from(bad)), "{bad}");
        }
    }

    #[test]
    fn parses_key_kind_tags() {
        assert_eq!("String".parse::<KeyKind>().unwrap(), KeyKind::String);
        assert_eq!("number".parse::<KeyKind>().unwrap(), KeyKind::Numeric);
        assert_eq!("Symbol".parse::<KeyKind>().unwrap(), KeyKind::Symbolic);
        assert!(matches!(
            "Boolean".parse::<KeyKind>(),
            Err(Error::UnknownKeyKind(tag)) if tag == "Boolean"
        ));
    }

    #[test]
    fn nominal_kind_is_exact() {
        let kind = ValueKind::of::<i64>();
        assert!(kind.accepts(&TypedValue::from_value(1i64)));
        assert!(!kind.accepts(&TypedValue::from_value(1i32)));
        assert!(!kind.accepts(&TypedValue::null()));
    }
}
