//! Use Cases Layer: BigInt
//!
//! Host-visible arbitrary-precision integers. A `BigInt` class is registered
//! with the host; each instance owns one native integer handle, and every
//! operation computes into a fresh handle wrapped in a new instance.
//!
//! ## Modules
//!
//! - **[`module`](module/index.html)**: Class initialization and shared module state
//! - **[`construction`](construction/index.html)**: Constructor input classification and normalization
//! - **[`conditioner`](conditioner/index.html)**: Host callback converting arbitrary input to numeric text
//! - **[`dispatcher`](dispatcher/index.html)**: Prototype methods
//! - **[`wrapper`](wrapper/index.html)**: Native value stored in each instance
//! - **[`random_state`](random_state/index.html)**: Lazily seeded generator for sampling
//! - **[`config`](config/index.html)**: Module configuration
//! - **[`error`](error/index.html)**: Error taxonomy and host exception mapping
//!
//! ## Example
//!
//! ```
//! use infrastructure_host_api::HostValue;
//! use usecases_bigint::{BigIntConfig, BigIntModule};
//!
//! let module = BigIntModule::new(BigIntConfig::default());
//! let a = module.construct_from_args(vec![HostValue::from("123456789012345678901234567890")]).unwrap();
//! let b = module.construct_from_args(vec![HostValue::from("ff"), HostValue::Number(16.0)]).unwrap();
//! let sum = a.as_object().unwrap().invoke("badd", vec![b]).unwrap();
//! let text = sum.as_object().unwrap().invoke("toString", vec![]).unwrap();
//! assert_eq!(text.as_str(), Some("123456789012345678901234568145"));
//! ```
//!
//! ## See Also
//!
//! - [`entities_bignum`](../entities_bignum/index.html): Native integer handles
//! - [`infrastructure_host_api`](../infrastructure_host_api/index.html): Host object model

pub mod conditioner;
pub mod config;
pub mod construction;
pub mod dispatcher;
pub mod error;
pub mod module;
pub mod random_state;
pub mod wrapper;

pub use conditioner::{ConditionedInput, Conditioner};
pub use config::{BigIntConfig, DEFAULT_RADIX, RANDOM_SEED_ENV};
pub use construction::ConstructorInput;
pub use error::{BigIntError, INVALID_CONSTRUCTOR_INPUT};
pub use module::{BigIntModule, ModuleState, CLASS_NAME, SET_CONDITIONER_NAME};
pub use random_state::RandomState;
pub use wrapper::{unwrap_bigint, BigInt};
