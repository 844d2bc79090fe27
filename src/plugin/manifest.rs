use std::sync::LazyLock;

const DOC_URL: &str = "http://docs.opendap.org/index.php/Debug_Functions";
const ROLE_BASE: &str = "http://services.opendap.org/dap4/server-side-function/debug";

/// Which diagnostic action a registered function performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    Abort,
    Sleep,
    Error,
    SumUntil,
}

/// Static description of one server function, as handed to the host registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub role: String,
    pub doc_url: &'static str,
    pub version: &'static str,
    pub behavior: Behavior,
}

impl FunctionDescriptor {
    fn debug_function(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        behavior: Behavior,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            role: format!("{ROLE_BASE}/{name}"),
            doc_url: DOC_URL,
            version: "1.0",
            behavior,
        }
    }
}

static CATALOG: LazyLock<Vec<FunctionDescriptor>> = LazyLock::new(|| {
    vec![
        FunctionDescriptor::debug_function(
            "abort",
            "This function calls abort() killing the server process.",
            "abort(##) where ## is the number of milliseconds to sleep before calling abort.",
            Behavior::Abort,
        ),
        FunctionDescriptor::debug_function(
            "sleep",
            "This function calls sleep() for the specified number of milliseconds.",
            "sleep(##) where ## is the number of milliseconds to sleep.",
            Behavior::Sleep,
        ),
        FunctionDescriptor::debug_function(
            "sum_until",
            "This function sums integers in a tight loop until the specified number of milliseconds has elapsed.",
            "sum_until(##) where ## is the number of milliseconds to keep summing.",
            Behavior::SumUntil,
        ),
        FunctionDescriptor::debug_function(
            "error",
            "This function triggers a server error of the type specified.",
            "error(##) where ## is the error type code to generate.",
            Behavior::Error,
        ),
    ]
});

/// The four debug functions, in registration order.
pub fn catalog() -> &'static [FunctionDescriptor] {
    &CATALOG
}
