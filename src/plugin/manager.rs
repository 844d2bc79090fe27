use std::collections::HashMap;

use crate::model::failure::{DiagnosticResult, ErrorKindTable, Failure, FailureKind};
use crate::model::value::Value;
use crate::plugin::host_fns;
use crate::plugin::manifest::{Behavior, FunctionDescriptor};
use crate::plugin::registry::{FunctionRegistry, RegistryError};

/// Resolves function names to descriptors and runs the matching behavior.
///
/// Registration needs `&mut self`, invocation only `&self`: once the module
/// is initialized the dispatcher can be shared freely across request threads.
#[derive(Debug, Default)]
pub struct Dispatcher {
    functions: HashMap<String, FunctionDescriptor>,
    error_kinds: ErrorKindTable,
}

impl Dispatcher {
    pub fn new(error_kinds: ErrorKindTable) -> Self {
        Self {
            functions: HashMap::new(),
            error_kinds,
        }
    }

    pub fn error_kinds(&self) -> &ErrorKindTable {
        &self.error_kinds
    }

    pub fn descriptor(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(name)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// One `name: usage description` line per function, sorted by name.
    pub fn help(&self) -> Vec<String> {
        if self.functions.is_empty() {
            return vec!["functions: none registered".to_string()];
        }

        let mut rows: Vec<String> = self
            .functions
            .values()
            .map(|descriptor| {
                format!(
                    "{}: {} {}",
                    descriptor.name, descriptor.usage, descriptor.description
                )
            })
            .collect();

        rows.sort();
        rows
    }

    /// Run `name` against `args`.
    ///
    /// `abort` with valid arguments does not return.
    pub fn invoke(&self, name: &str, args: &[Value]) -> DiagnosticResult {
        let Some(descriptor) = self.functions.get(name) else {
            tracing::info!(name, "unknown function requested");
            return DiagnosticResult::TypedFailure(Failure::new(
                FailureKind::SyntaxUser,
                format!(
                    "No such function: {name}. Available functions: {}",
                    self.function_names().join(", ")
                ),
            ));
        };

        tracing::info!(name, args = %describe_args(args), "invoking debug function");

        match descriptor.behavior {
            Behavior::Abort => DiagnosticResult::TextMessage(host_fns::abort(descriptor, args)),
            Behavior::Sleep => DiagnosticResult::TextMessage(host_fns::sleep(descriptor, args)),
            Behavior::SumUntil => {
                DiagnosticResult::TextMessage(host_fns::sum_until(descriptor, args))
            }
            Behavior::Error => host_fns::error(descriptor, args, &self.error_kinds).into(),
        }
    }
}

/// `Int32 5, String "x"` style rendering of decoded arguments.
fn describe_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| format!("{} {arg}", arg.type_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FunctionRegistry for Dispatcher {
    fn register(&mut self, descriptor: FunctionDescriptor) -> Result<(), RegistryError> {
        if self.functions.contains_key(descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name.to_string()));
        }

        tracing::debug!(name = descriptor.name, role = %descriptor.role, "registered function");
        self.functions.insert(descriptor.name.to_string(), descriptor);
        Ok(())
    }

    fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}
