//! BigInt Module
//!
//! A module instance owns the `BigInt` class template and the state shared by
//! every call into it: configuration, the conditioner slot and the random
//! state. The state travels with the class as class data, so independent
//! modules never see each other's conditioner or generator.
//!
//! Most embedders use the process-wide module from [`BigIntModule::global`].

use std::sync::{Arc, OnceLock};

use log::debug;

use entities_bignum::NativeInteger;
use infrastructure_host_api::{
    ClassTemplate, ExternalHandle, HostException, HostFunction, HostObject, HostValue,
};

use crate::conditioner::Conditioner;
use crate::config::BigIntConfig;
use crate::construction::{self, ConstructorInput};
use crate::dispatcher;
use crate::random_state::RandomState;
use crate::wrapper::{unwrap_bigint, BigInt};

/// Name of the class as seen by the host
pub const CLASS_NAME: &str = "BigInt";

/// Name of the conditioner installer as seen by the host
pub const SET_CONDITIONER_NAME: &str = "setJSConditioner";

static GLOBAL_MODULE: OnceLock<BigIntModule> = OnceLock::new();

/// State shared by every call into one module's class
#[derive(Debug)]
pub struct ModuleState {
    config: BigIntConfig,
    conditioner: Conditioner,
    random: RandomState,
}

impl ModuleState {
    fn new(config: BigIntConfig) -> Self {
        let random = RandomState::new(config.random_seed);
        Self {
            config,
            conditioner: Conditioner::new(),
            random,
        }
    }

    pub fn config(&self) -> &BigIntConfig {
        &self.config
    }

    pub fn conditioner(&self) -> &Conditioner {
        &self.conditioner
    }

    pub fn random(&self) -> &RandomState {
        &self.random
    }
}

/// An initialized BigInt module
#[derive(Clone, Debug)]
pub struct BigIntModule {
    state: Arc<ModuleState>,
    class: Arc<ClassTemplate>,
}

impl BigIntModule {
    /// Build the class template and its module state
    pub fn new(config: BigIntConfig) -> Self {
        let state = Arc::new(ModuleState::new(config));
        let mut template = ClassTemplate::new(CLASS_NAME, construction::construct);
        dispatcher::register(&mut template);
        template.set_data(Arc::clone(&state));
        debug!(
            "initialized {} class with {} prototype methods",
            CLASS_NAME,
            dispatcher::METHODS.len()
        );
        Self {
            state,
            class: Arc::new(template),
        }
    }

    /// The process-wide module, configured from the environment on first use
    pub fn global() -> &'static BigIntModule {
        GLOBAL_MODULE.get_or_init(|| BigIntModule::new(BigIntConfig::from_env()))
    }

    pub fn state(&self) -> &ModuleState {
        &self.state
    }

    pub fn class(&self) -> &Arc<ClassTemplate> {
        &self.class
    }

    /// The `BigInt` constructor as a host function
    pub fn constructor(&self) -> HostFunction {
        self.class.function()
    }

    /// The `setJSConditioner` host function bound to this module
    ///
    /// It installs its first argument as the conditioner and fails with a
    /// `TypeError` when that argument is not a function.
    pub fn set_conditioner_function(&self) -> HostFunction {
        let state = Arc::clone(&self.state);
        HostFunction::native(SET_CONDITIONER_NAME, move |ctx| {
            let callback = ctx.require_function(0)?;
            state.conditioner().install(callback);
            Ok(HostValue::Undefined)
        })
    }

    /// Install a conditioner directly
    pub fn set_conditioner(&self, callback: HostFunction) {
        self.state.conditioner().install(callback);
    }

    /// Place `BigInt` and `setJSConditioner` on an exports object
    pub fn register(&self, exports: &HostObject) {
        exports.set(CLASS_NAME, self.constructor());
        exports.set(SET_CONDITIONER_NAME, self.set_conditioner_function());
        debug!("registered {} and {}", CLASS_NAME, SET_CONDITIONER_NAME);
    }

    /// Construct an instance from typed input
    ///
    /// # Returns
    ///
    /// * `Ok(HostValue::Object)` - New instance
    /// * `Err(HostException)` - Same failures as the host constructor
    pub fn construct(&self, input: ConstructorInput) -> Result<HostValue, HostException> {
        let handle = input.resolve(self.state.conditioner())?;
        self.wrap(handle)
    }

    /// Construct an instance from host arguments, as `new BigInt(...args)`
    pub fn construct_from_args(&self, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        self.class.new_instance(args)
    }

    /// Wrap an already-built handle in a new instance
    pub fn wrap(&self, handle: NativeInteger) -> Result<HostValue, HostException> {
        self.construct_from_args(vec![HostValue::External(ExternalHandle::new(handle))])
    }

    /// The [`BigInt`] of a host value created by this module's class
    pub fn unwrap(&self, value: &HostValue) -> Option<Arc<BigInt>> {
        let object = value.as_object()?;
        if !object.is_instance_of(&self.class) {
            return None;
        }
        unwrap_bigint(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_host_api::ExceptionKind;

    fn module() -> BigIntModule {
        BigIntModule::new(BigIntConfig::default().with_random_seed(11))
    }

    #[test]
    fn test_class_shape() {
        let module = module();
        assert_eq!(module.class().name(), "BigInt");
        assert_eq!(module.class().method_names().len(), 33);
        assert!(module.class().data::<ModuleState>().is_some());
    }

    #[test]
    fn test_construct_typed() {
        let module = module();
        let value = module.construct(ConstructorInput::from(-7i64)).unwrap();
        assert_eq!(module.unwrap(&value).unwrap().to_string(), "-7");
    }

    #[test]
    fn test_unwrap_checks_class() {
        let a = module();
        let b = module();
        let value = a.construct(ConstructorInput::from(1u64)).unwrap();
        assert!(a.unwrap(&value).is_some());
        assert!(b.unwrap(&value).is_none());
    }

    #[test]
    fn test_set_conditioner_function() {
        let module = module();
        let installer = module.set_conditioner_function();
        let err = installer
            .call(HostValue::Undefined, vec![HostValue::Number(1.0)])
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::TypeError);
        assert!(!module.state().conditioner().is_installed());

        let callback = HostFunction::native("c", |_| Ok(HostValue::Null));
        installer
            .call(HostValue::Undefined, vec![HostValue::Function(callback)])
            .unwrap();
        assert!(module.state().conditioner().is_installed());
    }

    #[test]
    fn test_register_exports() {
        let module = module();
        let exports = HostObject::new();
        module.register(&exports);
        assert_eq!(exports.keys(), vec!["BigInt".to_string(), "setJSConditioner".to_string()]);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(BigIntModule::global(), BigIntModule::global()));
    }
}
