//! Call Context
//!
//! Everything a native function sees about the call it is serving: the
//! receiver, the argument list, whether it runs as a constructor, and the
//! class it belongs to.

use std::any::Any;
use std::sync::Arc;

use crate::class_template::ClassTemplate;
use crate::host_value::HostValue;

static UNDEFINED: HostValue = HostValue::Undefined;

/// Receiver, arguments and call mode of a native call
pub struct CallContext {
    this: HostValue,
    args: Vec<HostValue>,
    construct_call: bool,
    class: Option<Arc<ClassTemplate>>,
}

impl CallContext {
    /// Create a call context
    ///
    /// # Arguments
    ///
    /// * `this` - Receiver of the call
    /// * `args` - Arguments in call order
    /// * `construct_call` - Whether the call is a construct call
    /// * `class` - Class the called function belongs to, if any
    pub fn new(
        this: HostValue,
        args: Vec<HostValue>,
        construct_call: bool,
        class: Option<Arc<ClassTemplate>>,
    ) -> Self {
        Self {
            this,
            args,
            construct_call,
            class,
        }
    }

    pub fn this(&self) -> &HostValue {
        &self.this
    }

    pub fn args(&self) -> &[HostValue] {
        &self.args
    }

    /// Argument at `index`; missing arguments read as `Undefined`
    pub fn arg(&self, index: usize) -> &HostValue {
        self.args.get(index).unwrap_or(&UNDEFINED)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_construct_call(&self) -> bool {
        self.construct_call
    }

    pub fn class(&self) -> Option<&Arc<ClassTemplate>> {
        self.class.as_ref()
    }

    /// Class data of the called function's class, if it has type `T`
    pub fn class_data<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.class.as_ref()?.data::<T>()
    }
}
