//! Diagnostic fault-injection server functions.
//!
//! `abort`, `sleep`, `sum_until` and `error` exist to exercise a host
//! server's failure handling, timeouts and latency paths. The module
//! registers them into a host [`FunctionRegistry`] once at load; the host
//! then calls [`Dispatcher::invoke`] with decoded arguments.

pub mod expr;
pub mod model;
pub mod plugin;

pub use model::failure::{DiagnosticResult, ErrorKindTable, Failure, FailureKind};
pub use model::value::Value;
pub use plugin::{DebugFunctions, Dispatcher, FunctionRegistry, RegistryError};
