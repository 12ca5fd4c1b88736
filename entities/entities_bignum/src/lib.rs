//! Entities Layer: Bignum
//!
//! Provides the native integer handle wrapped by host-visible big integers:
//! - Owned arbitrary-precision handles and the engine operations on them
//! - Base-N text conversion for bases 2 through 62
//! - Probable-primality testing and next-prime search
//! - Uniform sampling below a bound
//!
//! Arithmetic is delegated to `malachite`; the routines it does not provide
//! (text in bases above 36, primality, sampling) are layered here.

pub mod error;
pub mod native;
pub mod primes;
pub mod radix;
pub mod sampling;

pub use error::{EngineError, ParseError};
pub use native::{NativeInteger, MAX_RESULT_BITS};
pub use primes::Primality;
pub use radix::{MAX_RADIX, MIN_RADIX};
