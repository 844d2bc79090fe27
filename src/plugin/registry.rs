use crate::model::config::FunctionsConfig;
use crate::plugin::manifest::{FunctionDescriptor, catalog};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("function already registered: {0}")]
    Duplicate(String),
}

/// Host-side function table that a module registers its functions into.
pub trait FunctionRegistry {
    fn register(&mut self, descriptor: FunctionDescriptor) -> Result<(), RegistryError>;

    fn function_names(&self) -> Vec<String>;
}

/// The debug function module.
#[derive(Debug, Default)]
pub struct DebugFunctions;

impl DebugFunctions {
    /// Register every enabled debug function with `registry`.
    ///
    /// Returns the names that were registered.
    pub fn initialize<R: FunctionRegistry + ?Sized>(
        registry: &mut R,
        config: &FunctionsConfig,
    ) -> Result<Vec<&'static str>, RegistryError> {
        tracing::debug!(
            names = %registry.function_names().join(", "),
            "initialize: begin"
        );

        let mut registered = Vec::new();
        for descriptor in catalog() {
            if !config.is_enabled(descriptor.name) {
                tracing::debug!(name = descriptor.name, "skipping disabled function");
                continue;
            }

            registry.register(descriptor.clone())?;
            registered.push(descriptor.name);
        }

        tracing::debug!(
            names = %registry.function_names().join(", "),
            "initialize: end"
        );
        Ok(registered)
    }
}
