//! Infrastructure Host API
//!
//! Provides the object model of the embedding scripting runtime that native
//! classes are registered with.
//!
//! ## Overview
//!
//! The host API provides:
//! - **Values**: Dynamically typed host values and their coercions
//! - **Objects**: Shared property bags with a write-once internal slot used to
//!   attach a native value to a host object
//! - **Externals**: Opaque one-shot ownership slots for passing native values
//!   through host calls
//! - **Classes**: Class templates with a native constructor, prototype methods
//!   and class data
//! - **Call Contexts**: Receiver, arguments and construct-call flag of a native
//!   call, with argument decoders
//! - **Exceptions**: Typed host exceptions raised by native code
//!
//! ## Lifetime
//!
//! Objects are reference counted. A native value attached to an object is
//! dropped when the last reference to the object goes away, so native
//! resources are released exactly once.

pub mod arg_decoding;
pub mod call_context;
pub mod class_template;
pub mod exception;
pub mod external;
pub mod host_object;
pub mod host_value;

pub use call_context::CallContext;
pub use class_template::{ClassTemplate, NativeMethod};
pub use exception::{ExceptionKind, HostException};
pub use external::ExternalHandle;
pub use host_object::{HostObject, WeakHostObject};
pub use host_value::{HostFunction, HostValue, NativeFn};
