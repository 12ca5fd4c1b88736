//! Argument Decoding
//!
//! Typed accessors for call arguments. Each decoder checks the host type of
//! one argument and fails with `TypeError("Argument N must be ...")` when the
//! argument is missing or has the wrong kind.
//!
//! ## Number Conversion
//!
//! Every integer decoder accepts only integral numbers inside the range of
//! its width. NaN, infinities, fractions and out-of-range values fail with a
//! `TypeError`; nothing is truncated, saturated or wrapped.

use crate::call_context::CallContext;
use crate::exception::HostException;
use crate::host_object::HostObject;
use crate::host_value::{HostFunction, HostValue};

/// 2^63 as a double
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// 2^64 as a double
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn type_error(index: usize, expected: &str) -> HostException {
    HostException::type_error(format!("Argument {} must be {}", index, expected))
}

/// Integral and inside `[min, end)`; rejects NaN and infinities
fn is_integral_in(n: f64, min: f64, end: f64) -> bool {
    n.fract() == 0.0 && n >= min && n < end
}

impl CallContext {
    fn number_arg(&self, index: usize, expected: &str) -> Result<f64, HostException> {
        match self.arg(index) {
            HostValue::Number(n) => Ok(*n),
            _ => Err(type_error(index, expected)),
        }
    }

    /// Decode a string argument
    pub fn require_string(&self, index: usize) -> Result<String, HostException> {
        match self.arg(index) {
            HostValue::String(text) => Ok(text.clone()),
            _ => Err(type_error(index, "a string")),
        }
    }

    /// Decode an integral number in the `i32` range
    pub fn require_int32(&self, index: usize) -> Result<i32, HostException> {
        let n = self.number_arg(index, "an int32")?;
        if is_integral_in(n, i32::MIN as f64, i32::MAX as f64 + 1.0) {
            Ok(n as i32)
        } else {
            Err(type_error(index, "an int32"))
        }
    }

    /// Decode an integral number in the `u32` range
    pub fn require_uint32(&self, index: usize) -> Result<u32, HostException> {
        let n = self.number_arg(index, "a uint32")?;
        if is_integral_in(n, 0.0, u32::MAX as f64 + 1.0) {
            Ok(n as u32)
        } else {
            Err(type_error(index, "a uint32"))
        }
    }

    /// Decode an integral number in the `i64` range
    pub fn require_int64(&self, index: usize) -> Result<i64, HostException> {
        let n = self.number_arg(index, "an int64")?;
        if is_integral_in(n, -TWO_POW_63, TWO_POW_63) {
            Ok(n as i64)
        } else {
            Err(type_error(index, "an int64"))
        }
    }

    /// Decode an integral number in the `u64` range
    pub fn require_uint64(&self, index: usize) -> Result<u64, HostException> {
        let n = self.number_arg(index, "a uint64")?;
        if is_integral_in(n, 0.0, TWO_POW_64) {
            Ok(n as u64)
        } else {
            Err(type_error(index, "a uint64"))
        }
    }

    /// Decode an object argument
    pub fn require_object(&self, index: usize) -> Result<HostObject, HostException> {
        match self.arg(index) {
            HostValue::Object(object) => Ok(object.clone()),
            _ => Err(type_error(index, "an object")),
        }
    }

    /// Decode a function argument
    pub fn require_function(&self, index: usize) -> Result<HostFunction, HostException> {
        match self.arg(index) {
            HostValue::Function(function) => Ok(function.clone()),
            _ => Err(type_error(index, "a function")),
        }
    }
}
