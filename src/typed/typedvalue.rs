use std::any::{Any, TypeId};
use std::fmt;

pub type TypedValue = TypedValueBase<dyn Any + 'static + Send + Sync>;

/// A type-erased value cell. `None` inside is the null value.
pub struct TypedValueBase<T: ?Sized + 'static + Any = dyn Any + 'static> {
    value: Option<Box<T>>,
    type_name: &'static str,
}

impl TypedValueBase<dyn Any + Send + Sync + 'static> {
    pub fn from_value<V: Any + Send + Sync + 'static>(value: V) -> Self {
        Self {
            value: Some(Box::new(value)),
            type_name: std::any::type_name::<V>(),
        }
    }

    #[must_use]
    pub fn null() -> Self {
        Self {
            value: None,
            type_name: "null",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the `TypeId` of the boxed value, or `None` for null.
    #[must_use]
    pub fn value_type_id(&self) -> Option<TypeId> {
        self.value.as_ref().map(|v| (**v).type_id())
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn is<V: Any>(&self) -> bool {
        self.value_type_id() == Some(TypeId::of::<V>())
    }

    #[must_use]
    pub fn downcast<V: Any>(self) -> Option<V> {
        let boxed: Box<dyn Any + 'static> = self.value?;
        let boxed: Option<Box<V>> = boxed.downcast().ok();
        boxed.map(|v| *v)
    }

    #[must_use]
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.as_deref()?.downcast_ref::<V>()
    }

    pub fn downcast_mut<V: Any>(&mut self) -> Option<&mut V> {
        self.value.as_deref_mut()?.downcast_mut::<V>()
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("TypedValue(null)")
        } else {
            write!(f, "TypedValue({})", self.type_name)
        }
    }
}
