//! Conditioner
//!
//! The conditioner is a host callback that turns arbitrary constructor input
//! into numeric text. It is installed with `setJSConditioner` and may be
//! replaced at any time.
//!
//! ## Callback Contract
//!
//! The callback is called with a fresh empty object as its receiver and the
//! constructor's full argument list. It must return an object with:
//! - `num` - the digits, as a string or a number (numbers are formatted with
//!   the host's `ToString`)
//! - `base` - the radix of `num`, as a non-negative integral number (0 selects
//!   the radix from a `0x`/`0b`/`0` prefix)
//!
//! Exceptions thrown by the callback propagate unchanged. Any other result is
//! a construction failure.

use log::debug;
use parking_lot::RwLock;

use infrastructure_host_api::{HostException, HostFunction, HostObject, HostValue};

use crate::error::BigIntError;

/// Numeric text produced by the conditioner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionedInput {
    /// Digits, with optional sign and prefix
    pub text: String,
    /// Radix of `text`, 0 for prefix detection
    pub radix: u32,
}

/// Slot holding the installed conditioner
#[derive(Default)]
pub struct Conditioner {
    slot: RwLock<Option<HostFunction>>,
}

impl Conditioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a conditioner, replacing the current one
    pub fn install(&self, callback: HostFunction) {
        debug!("installing conditioner {}", callback.name());
        *self.slot.write() = Some(callback);
    }

    /// Remove the installed conditioner
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    pub fn is_installed(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Run the installed conditioner over constructor arguments
    ///
    /// # Arguments
    ///
    /// * `args` - The constructor's full argument list
    ///
    /// # Returns
    ///
    /// * `Ok(ConditionedInput)` - Numeric text and its radix
    /// * `Err(HostException)` - The callback threw, or `ConstructionError`
    ///   when no conditioner is installed or its result is unusable
    pub fn condition(&self, args: &[HostValue]) -> Result<ConditionedInput, HostException> {
        // Released before the call so the callback may install a replacement
        let callback = self
            .slot
            .read()
            .clone()
            .ok_or_else(BigIntError::invalid_input)?;

        let receiver = HostValue::Object(HostObject::new());
        let result = callback.call(receiver, args.to_vec())?;
        read_result(&result).ok_or_else(|| BigIntError::invalid_input().into())
    }
}

impl std::fmt::Debug for Conditioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conditioner")
            .field("installed", &self.is_installed())
            .finish()
    }
}

fn read_result(result: &HostValue) -> Option<ConditionedInput> {
    let object = result.as_object()?;
    let text = match object.get("num") {
        HostValue::String(text) => text,
        value @ HostValue::Number(_) => value.to_display_string(),
        _ => return None,
    };
    let radix = match object.get("base") {
        HostValue::Number(n) if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 => n as u32,
        _ => return None,
    };
    Some(ConditionedInput { text, radix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_host_api::ExceptionKind;

    fn returning(num: HostValue, base: HostValue) -> HostFunction {
        HostFunction::native("conditioner", move |_| {
            let result = HostObject::new();
            result.set("num", num.clone());
            result.set("base", base.clone());
            Ok(HostValue::Object(result))
        })
    }

    #[test]
    fn test_missing_conditioner() {
        let conditioner = Conditioner::new();
        assert!(!conditioner.is_installed());
        let err = conditioner.condition(&[HostValue::Number(1.0)]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::ConstructionError);
        assert_eq!(err.message(), "invalid type passed to constructor");
    }

    #[test]
    fn test_string_and_number_results() {
        let conditioner = Conditioner::new();
        conditioner.install(returning(HostValue::from("ff"), HostValue::Number(16.0)));
        assert_eq!(
            conditioner.condition(&[]).unwrap(),
            ConditionedInput { text: "ff".to_string(), radix: 16 }
        );

        conditioner.install(returning(HostValue::Number(-42.0), HostValue::Number(10.0)));
        assert_eq!(conditioner.condition(&[]).unwrap().text, "-42");
    }

    #[test]
    fn test_receives_arguments_and_fresh_receiver() {
        let conditioner = Conditioner::new();
        conditioner.install(HostFunction::native("echo", |ctx| {
            assert!(ctx.this().as_object().is_some_and(|this| this.keys().is_empty()));
            let result = HostObject::new();
            result.set("num", ctx.arg(1).clone());
            result.set("base", ctx.arg(0).clone());
            Ok(HostValue::Object(result))
        }));
        let input = conditioner
            .condition(&[HostValue::Number(8.0), HostValue::from("777")])
            .unwrap();
        assert_eq!(input, ConditionedInput { text: "777".to_string(), radix: 8 });
    }

    #[test]
    fn test_unusable_results() {
        let conditioner = Conditioner::new();
        let cases = [
            returning(HostValue::Undefined, HostValue::Number(10.0)),
            returning(HostValue::from("1"), HostValue::from("10")),
            returning(HostValue::from("1"), HostValue::Number(2.5)),
            returning(HostValue::from("1"), HostValue::Number(-1.0)),
            HostFunction::native("scalar", |_| Ok(HostValue::Number(1.0))),
        ];
        for callback in cases {
            conditioner.install(callback);
            let err = conditioner.condition(&[]).unwrap_err();
            assert_eq!(err.kind(), ExceptionKind::ConstructionError);
        }
    }

    #[test]
    fn test_callback_exception_propagates() {
        let conditioner = Conditioner::new();
        conditioner.install(HostFunction::native("thrower", |_| {
            Err(HostException::range_error("rejected"))
        }));
        let err = conditioner.condition(&[]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::RangeError);
        assert_eq!(err.message(), "rejected");
    }

    #[test]
    fn test_clear() {
        let conditioner = Conditioner::new();
        conditioner.install(returning(HostValue::from("1"), HostValue::Number(10.0)));
        assert!(conditioner.is_installed());
        conditioner.clear();
        assert!(!conditioner.is_installed());
    }
}
