//! External Handles
//!
//! An external carries an owned native value through the host as an opaque
//! value. The receiving native code takes the value out exactly once; taking
//! it again, or taking it as the wrong type, is an ownership-contract
//! violation and is reported as an error.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::exception::HostException;

/// Opaque host value owning one native value until it is taken
#[derive(Clone)]
pub struct ExternalHandle {
    slot: Arc<Mutex<Option<Box<dyn Any + Send>>>>,
}

impl ExternalHandle {
    /// Wrap an owned native value
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(value)))),
        }
    }

    /// Check whether the value has not been taken yet
    pub fn is_available(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Take ownership of the wrapped value
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The wrapped value; the handle is now empty
    /// * `Err(HostException)` - Already taken, or holds a different type (the
    ///   value is left in place)
    pub fn take<T: Any + Send>(&self) -> Result<T, HostException> {
        let mut slot = self.slot.lock();
        let boxed = slot
            .take()
            .ok_or_else(|| HostException::error("external handle was already consumed"))?;
        match boxed.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(other) => {
                *slot = Some(other);
                Err(HostException::error("external handle holds a different type"))
            }
        }
    }

    /// Check whether two handles refer to the same slot
    pub fn ptr_eq(&self, other: &ExternalHandle) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl std::fmt::Debug for ExternalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalHandle")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_once() {
        let handle = ExternalHandle::new(42u64);
        assert!(handle.is_available());
        assert_eq!(handle.take::<u64>().unwrap(), 42);
        assert!(!handle.is_available());
        assert!(handle.take::<u64>().is_err());
    }

    #[test]
    fn test_wrong_type_keeps_value() {
        let handle = ExternalHandle::new(String::from("x"));
        assert!(handle.take::<u64>().is_err());
        assert!(handle.is_available());
        assert_eq!(handle.take::<String>().unwrap(), "x");
    }

    #[test]
    fn test_clones_share_slot() {
        let handle = ExternalHandle::new(1u8);
        let copy = handle.clone();
        assert!(handle.ptr_eq(&copy));
        copy.take::<u8>().unwrap();
        assert!(!handle.is_available());
    }
}
