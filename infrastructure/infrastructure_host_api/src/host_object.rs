//! Host Objects
//!
//! Reference-counted host objects: a property bag, an optional link to the
//! class that constructed the object, and one internal slot.
//!
//! ## Internal Slot
//!
//! The internal slot attaches a native value to the object. It can be set
//! once; the value lives as long as the object and is dropped together with
//! the last reference to it.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;

use crate::call_context::CallContext;
use crate::class_template::ClassTemplate;
use crate::exception::HostException;
use crate::host_value::HostValue;

struct ObjectInner {
    class: Option<Arc<ClassTemplate>>,
    properties: RwLock<HashMap<String, HostValue>>,
    internal: OnceLock<Arc<dyn Any + Send + Sync>>,
}

/// Shared reference to a host object
#[derive(Clone)]
pub struct HostObject {
    inner: Arc<ObjectInner>,
}

/// Non-owning reference to a host object
#[derive(Clone)]
pub struct WeakHostObject {
    inner: Weak<ObjectInner>,
}

impl HostObject {
    /// Create a plain empty object
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create an empty instance of a class
    pub fn with_class(class: Arc<ClassTemplate>) -> Self {
        Self::build(Some(class))
    }

    fn build(class: Option<Arc<ClassTemplate>>) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                class,
                properties: RwLock::new(HashMap::new()),
                internal: OnceLock::new(),
            }),
        }
    }

    /// Class that constructed this object, if any
    pub fn class(&self) -> Option<&Arc<ClassTemplate>> {
        self.inner.class.as_ref()
    }

    /// Check whether this object was constructed by `class`
    pub fn is_instance_of(&self, class: &Arc<ClassTemplate>) -> bool {
        self.class().is_some_and(|own| Arc::ptr_eq(own, class))
    }

    /// Read a property; missing properties read as `Undefined`
    pub fn get(&self, key: &str) -> HostValue {
        self.inner
            .properties
            .read()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&self, key: &str, value: impl Into<HostValue>) {
        self.inner
            .properties
            .write()
            .insert(key.to_string(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.properties.read().contains_key(key)
    }

    /// Property names, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.properties.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Attach a native value to the internal slot
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Value attached
    /// * `Err(HostException)` - The slot was already set
    pub fn set_internal<T: Any + Send + Sync>(&self, value: T) -> Result<(), HostException> {
        let value: Arc<dyn Any + Send + Sync> = Arc::new(value);
        self.inner
            .internal
            .set(value)
            .map_err(|_| HostException::error("object is already wrapping a native value"))
    }

    /// Native value in the internal slot, if it has type `T`
    pub fn internal<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let value = Arc::clone(self.inner.internal.get()?);
        value.downcast::<T>().ok()
    }

    pub fn has_internal(&self) -> bool {
        self.inner.internal.get().is_some()
    }

    /// Call a method found on the object's class prototype, or a function
    /// stored as a property, with this object as the receiver
    ///
    /// # Returns
    ///
    /// * `Ok(HostValue)` - Method result
    /// * `Err(HostException)` - Method threw, or `TypeError` when `name` is
    ///   not callable on this object
    pub fn invoke(&self, name: &str, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        if let Some(class) = self.class() {
            if let Some(method) = class.method(name) {
                let ctx = CallContext::new(
                    HostValue::Object(self.clone()),
                    args,
                    false,
                    Some(Arc::clone(class)),
                );
                return method(&ctx);
            }
        }
        match self.get(name) {
            HostValue::Function(function) => function.call(HostValue::Object(self.clone()), args),
            _ => Err(HostException::type_error(format!("{} is not a function", name))),
        }
    }

    pub fn downgrade(&self) -> WeakHostObject {
        WeakHostObject {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Check whether two references point at the same object
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for HostObject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostObject")
            .field("class", &self.class().map(|class| class.name().to_string()))
            .field("keys", &self.keys())
            .field("wrapped", &self.has_internal())
            .finish()
    }
}

impl WeakHostObject {
    /// Recover the object if it is still alive
    pub fn upgrade(&self) -> Option<HostObject> {
        self.inner.upgrade().map(|inner| HostObject { inner })
    }
}
