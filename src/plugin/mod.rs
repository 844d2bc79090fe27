pub mod host_fns;
pub mod manager;
pub mod manifest;
pub mod registry;

pub use manager::Dispatcher;
pub use registry::{DebugFunctions, FunctionRegistry, RegistryError};
