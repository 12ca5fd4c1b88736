//! Module Registration Facades
//!
//! Load-time hooks of the binding.

use log::debug;

use infrastructure_host_api::HostObject;
use usecases_bigint::{BigIntConfig, BigIntModule};

/// Register the process-wide module on `exports`
///
/// Every exports object registered this way shares one class, one
/// conditioner slot and one random state.
pub fn init(exports: &HostObject) {
    debug!("loading BigInt binding into exports");
    BigIntModule::global().register(exports);
}

/// Register a new, isolated module on `exports`
///
/// # Returns
///
/// The module, for embedders that need typed access to its state
pub fn init_with_config(exports: &HostObject, config: BigIntConfig) -> BigIntModule {
    let module = BigIntModule::new(config);
    module.register(exports);
    module
}
