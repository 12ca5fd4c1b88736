//! Operation Dispatcher
//!
//! The prototype methods of the `BigInt` class. Each method reads its
//! receiver and operands without modifying them, computes into a fresh
//! native handle and wraps that handle in a new instance.
//!
//! ## Operand Naming
//!
//! - `b*` methods take a BigInt operand (or none)
//! - `u*` methods take an unsigned machine integer
//! - `s*` methods take a signed machine integer
//!
//! Comparisons, `probprime` and `bitLength` return host numbers; `toString`
//! returns a string.

use std::cmp::Ordering;

use entities_bignum::radix::is_valid_radix;
use entities_bignum::NativeInteger;
use infrastructure_host_api::{CallContext, ClassTemplate, HostException, HostValue, NativeMethod};

use crate::config::DEFAULT_RADIX;
use crate::construction::module_state;
use crate::error::BigIntError;
use crate::wrapper::{bigint_arg, this_bigint, wrap_native};

/// Prototype methods in registration order
pub const METHODS: [(&str, NativeMethod); 33] = [
    ("toString", to_string),
    ("badd", badd),
    ("bsub", bsub),
    ("bmul", bmul),
    ("bdiv", bdiv),
    ("uadd", uadd),
    ("usub", usub),
    ("umul", umul),
    ("udiv", udiv),
    ("umul2exp", umul2exp),
    ("udiv2exp", udiv2exp),
    ("babs", babs),
    ("bneg", bneg),
    ("bmod", bmod),
    ("umod", umod),
    ("bpowm", bpowm),
    ("upowm", upowm),
    ("upow", upow),
    ("uupow", uupow),
    ("brand0", brand0),
    ("probprime", probprime),
    ("nextprime", nextprime),
    ("bcompare", bcompare),
    ("scompare", scompare),
    ("ucompare", ucompare),
    ("band", band),
    ("bor", bor),
    ("bxor", bxor),
    ("binvertm", binvertm),
    ("bsqrt", bsqrt),
    ("broot", broot),
    ("bitLength", bit_length),
    ("bgcd", bgcd),
];

/// Place every operation on the class prototype
pub fn register(template: &mut ClassTemplate) {
    for (name, method) in METHODS {
        template.set_prototype_method(name, method);
    }
}

type OpResult = Result<NativeInteger, BigIntError>;

fn unary<F>(ctx: &CallContext, op: F) -> Result<HostValue, HostException>
where
    F: FnOnce(&NativeInteger) -> OpResult,
{
    let this = this_bigint(ctx)?;
    let result = op(this.handle())?;
    wrap_native(ctx, result)
}

fn binary<F>(ctx: &CallContext, op: F) -> Result<HostValue, HostException>
where
    F: FnOnce(&NativeInteger, &NativeInteger) -> OpResult,
{
    let this = this_bigint(ctx)?;
    let other = bigint_arg(ctx, 0)?;
    let result = op(this.handle(), other.handle())?;
    wrap_native(ctx, result)
}

fn scalar<F>(ctx: &CallContext, op: F) -> Result<HostValue, HostException>
where
    F: FnOnce(&NativeInteger, u64) -> OpResult,
{
    let this = this_bigint(ctx)?;
    let x = ctx.require_uint64(0)?;
    let result = op(this.handle(), x)?;
    wrap_native(ctx, result)
}

fn ordering_number(ordering: Ordering) -> HostValue {
    HostValue::Number(match ordering {
        Ordering::Less => -1.0,
        Ordering::Equal => 0.0,
        Ordering::Greater => 1.0,
    })
}

fn to_string(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let radix = if ctx.arg(0).is_undefined() {
        module_state(ctx)
            .map(|state| state.config().default_radix)
            .unwrap_or(DEFAULT_RADIX)
    } else {
        let base = ctx.require_uint64(0)?;
        match u32::try_from(base) {
            Ok(radix) if is_valid_radix(radix) => radix,
            _ => {
                return Err(BigIntError::Range(
                    "Base should be between 2 and 62, inclusive".to_string(),
                )
                .into())
            }
        }
    };
    let text = this.handle().to_string_radix(radix).map_err(BigIntError::from)?;
    Ok(HostValue::String(text))
}

fn badd(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.plus(b)))
}

fn bsub(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.minus(b)))
}

fn bmul(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.times(b)))
}

fn bdiv(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| a.div_floor(b).map_err(BigIntError::from))
}

fn uadd(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| Ok(a.add_u64(x)))
}

fn usub(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| Ok(a.sub_u64(x)))
}

fn umul(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| Ok(a.mul_u64(x)))
}

fn udiv(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| a.div_u64(x).map_err(BigIntError::from))
}

fn umul2exp(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| a.lshift(x).map_err(BigIntError::from))
}

fn udiv2exp(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| Ok(a.rshift_floor(x)))
}

fn babs(ctx: &CallContext) -> Result<HostValue, HostException> {
    unary(ctx, |a| Ok(a.abs()))
}

fn bneg(ctx: &CallContext) -> Result<HostValue, HostException> {
    unary(ctx, |a| Ok(a.negate()))
}

fn bmod(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| a.modulo(b).map_err(BigIntError::from))
}

fn umod(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| a.mod_u64(x).map_err(BigIntError::from))
}

fn bpowm(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let exponent = bigint_arg(ctx, 0)?;
    let modulus = bigint_arg(ctx, 1)?;
    let result = this
        .handle()
        .pow_mod(exponent.handle(), modulus.handle())
        .map_err(BigIntError::from)?;
    wrap_native(ctx, result)
}

fn upowm(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let x = ctx.require_uint64(0)?;
    let modulus = bigint_arg(ctx, 1)?;
    let result = this
        .handle()
        .pow_mod_u64(x, modulus.handle())
        .map_err(BigIntError::from)?;
    wrap_native(ctx, result)
}

fn upow(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| a.pow_u64(x).map_err(BigIntError::from))
}

/// `x^y` from two machine integers; the receiver is not read
fn uupow(ctx: &CallContext) -> Result<HostValue, HostException> {
    let x = ctx.require_uint64(0)?;
    let y = ctx.require_uint64(1)?;
    let result = NativeInteger::u64_pow_u64(x, y).map_err(BigIntError::from)?;
    wrap_native(ctx, result)
}

fn brand0(ctx: &CallContext) -> Result<HostValue, HostException> {
    let state = module_state(ctx)?;
    unary(ctx, |a| state.random().sample_below(a).map_err(BigIntError::from))
}

fn probprime(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let reps = ctx.require_uint32(0)?;
    let verdict = this.handle().probable_prime(reps);
    Ok(HostValue::Number(verdict.code() as f64))
}

fn nextprime(ctx: &CallContext) -> Result<HostValue, HostException> {
    unary(ctx, |a| Ok(a.next_prime()))
}

fn bcompare(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let other = bigint_arg(ctx, 0)?;
    Ok(ordering_number(this.handle().compare(other.handle())))
}

fn scompare(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let x = ctx.require_int64(0)?;
    Ok(ordering_number(this.handle().compare_i64(x)))
}

fn ucompare(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    let x = ctx.require_uint64(0)?;
    Ok(ordering_number(this.handle().compare_u64(x)))
}

fn band(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.bitand(b)))
}

fn bor(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.bitor(b)))
}

fn bxor(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.bitxor(b)))
}

fn binvertm(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| a.invert(b).map_err(BigIntError::from))
}

fn bsqrt(ctx: &CallContext) -> Result<HostValue, HostException> {
    unary(ctx, |a| a.sqrt().map_err(BigIntError::from))
}

fn broot(ctx: &CallContext) -> Result<HostValue, HostException> {
    scalar(ctx, |a, x| a.root(x).map_err(BigIntError::from))
}

fn bit_length(ctx: &CallContext) -> Result<HostValue, HostException> {
    let this = this_bigint(ctx)?;
    Ok(HostValue::Number(this.handle().bit_length() as f64))
}

fn bgcd(ctx: &CallContext) -> Result<HostValue, HostException> {
    binary(ctx, |a, b| Ok(a.gcd(b)))
}
