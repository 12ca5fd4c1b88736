//! API Facades Layer
//!
//! Entry points the host calls when it loads the binding. Registration places
//! the `BigInt` constructor and `setJSConditioner` on the host's exports
//! object; everything else is reached through those two values.

pub mod module_facades;

pub use module_facades::*;
