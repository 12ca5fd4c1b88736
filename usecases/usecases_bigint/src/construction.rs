//! Construction Protocol
//!
//! Normalizes constructor input into a native handle. Host arguments are
//! classified once into a [`ConstructorInput`]; nothing after classification
//! looks at host type tags again.
//!
//! ## Dispatch Order
//!
//! 1. An external as the first argument transfers an already-built handle
//!    into the new instance without copying.
//! 2. A string as the first argument is parsed in the radix given by the
//!    second argument (default 10). Any numeric radix other than 0 or 2..=62
//!    is a `FormatError`.
//! 3. Anything else is passed, with the full argument list, through the
//!    installed conditioner and its `num`/`base` result is parsed as in 2.
//!
//! Calling the class as a plain function re-runs the constructor as a
//! construct call with the same arguments.

use std::sync::Arc;

use log::trace;

use entities_bignum::{NativeInteger, ParseError};
use infrastructure_host_api::{CallContext, HostException, HostValue};

use crate::conditioner::Conditioner;
use crate::error::BigIntError;
use crate::module::ModuleState;
use crate::wrapper::BigInt;

/// Constructor input after classification
#[derive(Debug)]
pub enum ConstructorInput {
    /// Numeric text and its radix (0 selects the radix from a prefix)
    Text { text: String, radix: u32 },
    /// Signed machine integer
    Signed(i64),
    /// Unsigned machine integer
    Unsigned(u64),
    /// Already-built handle, moved in as is
    Native(NativeInteger),
    /// Arbitrary host arguments for the conditioner
    Conditioned(Vec<HostValue>),
}

impl ConstructorInput {
    /// Classify host constructor arguments
    ///
    /// # Arguments
    ///
    /// * `ctx` - Constructor call
    /// * `default_radix` - Radix for a string without an explicit radix
    ///
    /// # Returns
    ///
    /// * `Ok(ConstructorInput)` - Classified input; an external handle has
    ///   been taken
    /// * `Err(HostException)` - The external was already consumed, the radix
    ///   is not a number (`TypeError`) or is not a non-negative 32-bit
    ///   integer (`FormatError`)
    pub fn classify(ctx: &CallContext, default_radix: u32) -> Result<Self, HostException> {
        match ctx.arg(0) {
            HostValue::External(handle) => {
                trace!("taking ownership of native integer from external");
                Ok(ConstructorInput::Native(handle.take::<NativeInteger>()?))
            }
            HostValue::String(text) => {
                let radix = match ctx.arg(1) {
                    HostValue::Undefined => default_radix,
                    HostValue::Number(base) => radix_from_number(*base)?,
                    _ => return Err(HostException::type_error("Argument 1 must be a number")),
                };
                Ok(ConstructorInput::Text {
                    text: text.clone(),
                    radix,
                })
            }
            _ => Ok(ConstructorInput::Conditioned(ctx.args().to_vec())),
        }
    }

    /// Produce the native handle for this input
    ///
    /// # Returns
    ///
    /// * `Ok(NativeInteger)` - The handle
    /// * `Err(HostException)` - `FormatError` for bad text or radix,
    ///   `ConstructionError` for unusable conditioner output, or the
    ///   conditioner's own exception
    pub fn resolve(self, conditioner: &Conditioner) -> Result<NativeInteger, HostException> {
        match self {
            ConstructorInput::Text { text, radix } => parse_text(&text, radix),
            ConstructorInput::Signed(value) => Ok(NativeInteger::from_i64(value)),
            ConstructorInput::Unsigned(value) => Ok(NativeInteger::from_u64(value)),
            ConstructorInput::Native(handle) => Ok(handle),
            ConstructorInput::Conditioned(args) => {
                let input = conditioner.condition(&args)?;
                parse_text(&input.text, input.radix)
            }
        }
    }
}

impl From<i64> for ConstructorInput {
    fn from(value: i64) -> Self {
        ConstructorInput::Signed(value)
    }
}

impl From<u64> for ConstructorInput {
    fn from(value: u64) -> Self {
        ConstructorInput::Unsigned(value)
    }
}

impl From<NativeInteger> for ConstructorInput {
    fn from(handle: NativeInteger) -> Self {
        ConstructorInput::Native(handle)
    }
}

/// Radix from a host number; range against 2..=62 is checked by the parser
fn radix_from_number(base: f64) -> Result<u32, BigIntError> {
    if base.fract() == 0.0 && base >= 0.0 && base <= u32::MAX as f64 {
        Ok(base as u32)
    } else {
        let shown = HostValue::Number(base).to_display_string();
        Err(BigIntError::Format(ParseError::UnrepresentableRadix(shown)))
    }
}

fn parse_text(text: &str, radix: u32) -> Result<NativeInteger, HostException> {
    NativeInteger::parse(text, radix).map_err(|err| BigIntError::from(err).into())
}

/// Module state attached to the class of a call
pub(crate) fn module_state(ctx: &CallContext) -> Result<Arc<ModuleState>, HostException> {
    ctx.class_data::<ModuleState>()
        .ok_or_else(|| HostException::error("BigInt class has no module state"))
}

/// Native constructor of the `BigInt` class
pub(crate) fn construct(ctx: &CallContext) -> Result<HostValue, HostException> {
    let class = ctx
        .class()
        .ok_or_else(|| HostException::error("BigInt constructor called outside its class"))?;
    if !ctx.is_construct_call() {
        trace!("plain BigInt call, re-running as construct call");
        return class.new_instance(ctx.args().to_vec());
    }

    let state = module_state(ctx)?;
    let this = ctx
        .this()
        .as_object()
        .cloned()
        .ok_or_else(|| HostException::type_error("Receiver must be an object"))?;

    let input = ConstructorInput::classify(ctx, state.config().default_radix)?;
    let handle = input.resolve(state.conditioner())?;
    this.set_internal(BigInt::new(handle))?;
    Ok(HostValue::Object(this))
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_host_api::{ExceptionKind, ExternalHandle};

    fn ctx(args: Vec<HostValue>) -> CallContext {
        CallContext::new(HostValue::Undefined, args, true, None)
    }

    #[test]
    fn test_classify_external() {
        let external = ExternalHandle::new(NativeInteger::from_u64(9));
        let input = ConstructorInput::classify(&ctx(vec![HostValue::External(external.clone())]), 10)
            .unwrap();
        assert!(matches!(input, ConstructorInput::Native(_)));
        assert!(!external.is_available());
    }

    #[test]
    fn test_classify_consumed_external() {
        let external = ExternalHandle::new(NativeInteger::from_u64(9));
        external.take::<NativeInteger>().unwrap();
        let err = ConstructorInput::classify(&ctx(vec![HostValue::External(external)]), 10)
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Error);
    }

    #[test]
    fn test_classify_text() {
        let input = ConstructorInput::classify(&ctx(vec![HostValue::from("ff")]), 10).unwrap();
        assert!(matches!(input, ConstructorInput::Text { ref text, radix: 10 } if text == "ff"));

        let args = vec![HostValue::from("ff"), HostValue::Number(16.0)];
        let input = ConstructorInput::classify(&ctx(args), 10).unwrap();
        assert!(matches!(input, ConstructorInput::Text { radix: 16, .. }));

        let args = vec![HostValue::from("ff"), HostValue::from("16")];
        let err = ConstructorInput::classify(&ctx(args), 10).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::TypeError);
        assert_eq!(err.message(), "Argument 1 must be a number");
    }

    #[test]
    fn test_classify_bad_numeric_radix() {
        for base in [-1.0, 2.5, f64::NAN, 1e10] {
            let args = vec![HostValue::from("10"), HostValue::Number(base)];
            let err = ConstructorInput::classify(&ctx(args), 10).unwrap_err();
            assert_eq!(err.kind(), ExceptionKind::FormatError, "base {}", base);
        }
        let err = ConstructorInput::classify(
            &ctx(vec![HostValue::from("10"), HostValue::Number(-1.0)]),
            10,
        )
        .unwrap_err();
        assert_eq!(err.message(), "Base should be between 2 and 62, inclusive (got -1)");
    }

    #[test]
    fn test_classify_other_values() {
        for value in [HostValue::Number(5.0), HostValue::Null, HostValue::Undefined] {
            let input = ConstructorInput::classify(&ctx(vec![value, HostValue::Number(1.0)]), 10)
                .unwrap();
            assert!(matches!(input, ConstructorInput::Conditioned(ref args) if args.len() == 2));
        }
    }

    #[test]
    fn test_resolve() {
        let conditioner = Conditioner::new();
        let text = ConstructorInput::Text { text: "-ff".into(), radix: 16 };
        assert_eq!(text.resolve(&conditioner).unwrap().to_string(), "-255");
        assert_eq!(ConstructorInput::from(-3i64).resolve(&conditioner).unwrap().to_string(), "-3");
        assert_eq!(
            ConstructorInput::from(u64::MAX).resolve(&conditioner).unwrap().to_string(),
            "18446744073709551615"
        );
        let native = ConstructorInput::from(NativeInteger::from_u64(7));
        assert_eq!(native.resolve(&conditioner).unwrap().to_string(), "7");
    }

    #[test]
    fn test_resolve_errors() {
        let conditioner = Conditioner::new();
        let bad = ConstructorInput::Text { text: "12z".into(), radix: 10 };
        assert_eq!(bad.resolve(&conditioner).unwrap_err().kind(), ExceptionKind::FormatError);
        let bad_radix = ConstructorInput::Text { text: "1".into(), radix: 99 };
        assert_eq!(
            bad_radix.resolve(&conditioner).unwrap_err().kind(),
            ExceptionKind::FormatError
        );
        let conditioned = ConstructorInput::Conditioned(vec![HostValue::Number(1.0)]);
        assert_eq!(
            conditioned.resolve(&conditioner).unwrap_err().kind(),
            ExceptionKind::ConstructionError
        );
    }

    #[test]
    fn test_construct_needs_class() {
        let err = construct(&ctx(vec![])).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Error);
    }
}
