//! Value Wrapper
//!
//! [`BigInt`] is the native value stored in the internal slot of every
//! host-visible big integer. It owns exactly one [`NativeInteger`] and
//! releases it when the host object holding it is released.
//!
//! New results are wrapped by running the class constructor with the fresh
//! handle passed as an external, so every instance goes through the same
//! construction path.

use std::sync::Arc;

use log::trace;

use entities_bignum::NativeInteger;
use infrastructure_host_api::{CallContext, ExternalHandle, HostException, HostValue};

/// Native state of a host-visible big integer
#[derive(Debug)]
pub struct BigInt {
    handle: NativeInteger,
}

impl BigInt {
    /// Take ownership of a handle
    pub fn new(handle: NativeInteger) -> Self {
        trace!("wrapping native integer of {} bit(s)", handle.bit_length());
        Self { handle }
    }

    /// The owned handle, read-only
    pub fn handle(&self) -> &NativeInteger {
        &self.handle
    }
}

impl Drop for BigInt {
    fn drop(&mut self) {
        trace!("releasing native integer of {} bit(s)", self.handle.bit_length());
    }
}

impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.handle)
    }
}

/// The [`BigInt`] wrapped by a host value, if it is a big integer object
pub fn unwrap_bigint(value: &HostValue) -> Option<Arc<BigInt>> {
    value.as_object()?.internal::<BigInt>()
}

/// The receiver of a method call
pub(crate) fn this_bigint(ctx: &CallContext) -> Result<Arc<BigInt>, HostException> {
    unwrap_bigint(ctx.this())
        .ok_or_else(|| HostException::type_error("Receiver must be a BigInt"))
}

/// A big integer operand
pub(crate) fn bigint_arg(ctx: &CallContext, index: usize) -> Result<Arc<BigInt>, HostException> {
    unwrap_bigint(ctx.arg(index))
        .ok_or_else(|| HostException::type_error(format!("Argument {} must be a BigInt", index)))
}

/// Wrap a fresh result handle in a new instance of the calling class
pub(crate) fn wrap_native(ctx: &CallContext, handle: NativeInteger) -> Result<HostValue, HostException> {
    let class = ctx
        .class()
        .ok_or_else(|| HostException::error("BigInt method called outside its class"))?;
    class.new_instance(vec![HostValue::External(ExternalHandle::new(handle))])
}
