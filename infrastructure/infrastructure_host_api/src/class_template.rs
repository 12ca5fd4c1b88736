//! Class Templates
//!
//! A class template describes a constructible host type: its name, the native
//! constructor, the native methods placed on its prototype, and opaque class
//! data shared by every call into the class.
//!
//! ## Construction
//!
//! [`ClassTemplate::new_instance`] creates an empty instance linked to the
//! class and runs the constructor as a construct call with the instance as
//! the receiver. [`ClassTemplate::call`] runs the same constructor as a plain
//! call; the constructor decides what a plain call means.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use log::trace;

use crate::call_context::CallContext;
use crate::exception::HostException;
use crate::host_object::HostObject;
use crate::host_value::{HostFunction, HostValue};

/// Native constructor or prototype method
pub type NativeMethod = fn(&CallContext) -> Result<HostValue, HostException>;

/// Description of a constructible host type
pub struct ClassTemplate {
    name: String,
    constructor: NativeMethod,
    prototype: HashMap<String, NativeMethod>,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl ClassTemplate {
    /// Create a class with no prototype methods and no class data
    pub fn new(name: &str, constructor: NativeMethod) -> Self {
        Self {
            name: name.to_string(),
            constructor,
            prototype: HashMap::new(),
            data: None,
        }
    }

    /// Place a native method on the prototype, replacing any method of the
    /// same name
    pub fn set_prototype_method(&mut self, name: &str, method: NativeMethod) {
        self.prototype.insert(name.to_string(), method);
    }

    /// Attach class data, available to every call through
    /// [`CallContext::class_data`]
    pub fn set_data<T: Any + Send + Sync>(&mut self, data: Arc<T>) {
        let data: Arc<dyn Any + Send + Sync> = data;
        self.data = Some(data);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self, name: &str) -> Option<NativeMethod> {
        self.prototype.get(name).copied()
    }

    /// Prototype method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prototype.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Class data, if it has type `T`
    pub fn data<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(self.data.as_ref()?).downcast::<T>().ok()
    }

    /// Construct a new instance
    ///
    /// # Returns
    ///
    /// * `Ok(HostValue::Object)` - The object returned by the constructor, or
    ///   the fresh instance when the constructor returns a non-object
    /// * `Err(HostException)` - The constructor threw
    pub fn new_instance(self: &Arc<Self>, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        trace!("constructing {} with {} argument(s)", self.name, args.len());
        let instance = HostObject::with_class(Arc::clone(self));
        let ctx = CallContext::new(
            HostValue::Object(instance.clone()),
            args,
            true,
            Some(Arc::clone(self)),
        );
        match (self.constructor)(&ctx)? {
            HostValue::Object(object) => Ok(HostValue::Object(object)),
            _ => Ok(HostValue::Object(instance)),
        }
    }

    /// Call the constructor as a plain function
    pub fn call(self: &Arc<Self>, this: HostValue, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        let ctx = CallContext::new(this, args, false, Some(Arc::clone(self)));
        (self.constructor)(&ctx)
    }

    /// The class constructor as a host function value
    pub fn function(self: &Arc<Self>) -> HostFunction {
        HostFunction::Class(Arc::clone(self))
    }
}

impl std::fmt::Debug for ClassTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassTemplate")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_new(ctx: &CallContext) -> Result<HostValue, HostException> {
        if !ctx.is_construct_call() {
            let class = ctx
                .class()
                .ok_or_else(|| HostException::error("missing class"))?;
            return class.new_instance(ctx.args().to_vec());
        }
        let this = ctx.require_object_receiver()?;
        let start = ctx.arg(0).to_number();
        let offset = ctx.class_data::<f64>().map(|d| *d).unwrap_or(0.0);
        this.set_internal(start + offset)?;
        Ok(HostValue::Object(this))
    }

    fn counter_value(ctx: &CallContext) -> Result<HostValue, HostException> {
        let this = ctx.require_object_receiver()?;
        let value = this
            .internal::<f64>()
            .ok_or_else(|| HostException::type_error("not a counter"))?;
        Ok(HostValue::Number(*value))
    }

    impl CallContext {
        fn require_object_receiver(&self) -> Result<HostObject, HostException> {
            self.this()
                .as_object()
                .cloned()
                .ok_or_else(|| HostException::type_error("receiver is not an object"))
        }
    }

    fn counter_class() -> Arc<ClassTemplate> {
        let mut template = ClassTemplate::new("Counter", counter_new);
        template.set_prototype_method("value", counter_value);
        template.set_data(Arc::new(100.0f64));
        Arc::new(template)
    }

    #[test]
    fn test_new_instance_runs_constructor() {
        let class = counter_class();
        let instance = class.new_instance(vec![HostValue::Number(5.0)]).unwrap();
        let object = instance.as_object().unwrap();
        assert!(object.is_instance_of(&class));
        assert_eq!(object.invoke("value", vec![]).unwrap().to_number(), 105.0);
    }

    #[test]
    fn test_plain_call_redirects() {
        let class = counter_class();
        let instance = class.call(HostValue::Undefined, vec![HostValue::Number(1.0)]).unwrap();
        assert_eq!(instance.as_object().unwrap().invoke("value", vec![]).unwrap().to_number(), 101.0);
    }

    #[test]
    fn test_class_metadata() {
        let class = counter_class();
        assert_eq!(class.name(), "Counter");
        assert_eq!(class.method_names(), vec!["value"]);
        assert!(class.method("missing").is_none());
        assert_eq!(*class.data::<f64>().unwrap(), 100.0);
        assert!(class.data::<u32>().is_none());
        assert_eq!(class.function().name(), "Counter");
    }

    #[test]
    fn test_constructor_errors_propagate() {
        fn failing(_: &CallContext) -> Result<HostValue, HostException> {
            Err(HostException::range_error("nope"))
        }
        let class = Arc::new(ClassTemplate::new("Failing", failing));
        let err = class.new_instance(vec![]).unwrap_err();
        assert_eq!(err.message(), "nope");
    }
}
