//! The diagnostic behaviors behind each registered function.
//!
//! Argument problems never surface as failures: they come back as text that
//! embeds the function's usage string, so a malformed call cannot be mistaken
//! for the fault it was meant to provoke.

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use crate::model::failure::{ErrorKindTable, Failure};
use crate::model::value::Value;
use crate::plugin::manifest::FunctionDescriptor;

/// Time between deadline checks in `sum_until`, in loop iterations.
const SUM_CHECK_INTERVAL: u64 = 1024;

fn single_int32(descriptor: &FunctionDescriptor, args: &[Value]) -> Result<i32, String> {
    let [arg] = args else {
        return Err(format!("Missing time parameter! USAGE: {}", descriptor.usage));
    };

    arg.as_int32().ok_or_else(|| {
        format!(
            "This function only accepts integer values for the time parameter. USAGE: {}",
            descriptor.usage
        )
    })
}

fn duration_arg(descriptor: &FunctionDescriptor, args: &[Value]) -> Result<(i32, Duration), String> {
    let ms = single_int32(descriptor, args)?;
    let millis = u64::try_from(ms).map_err(|_| {
        format!(
            "The time parameter must not be negative! USAGE: {}",
            descriptor.usage
        )
    })?;
    Ok((ms, Duration::from_millis(millis)))
}

/// Validates, waits, then kills the process. Only returns on bad arguments.
pub fn abort(descriptor: &FunctionDescriptor, args: &[Value]) -> String {
    match duration_arg(descriptor, args) {
        Ok((_, delay)) => abort_after(delay),
        Err(message) => message,
    }
}

/// Sleep for `delay`, then terminate the process abnormally.
pub fn abort_after(delay: Duration) -> ! {
    tracing::warn!(delay_ms = delay.as_millis() as u64, "abort requested");
    thread::sleep(delay);
    std::process::abort()
}

pub fn sleep(descriptor: &FunctionDescriptor, args: &[Value]) -> String {
    match duration_arg(descriptor, args) {
        Ok((ms, delay)) => {
            thread::sleep(delay);
            format!("Slept for {ms} ms.")
        }
        Err(message) => message,
    }
}

pub fn sum_until(descriptor: &FunctionDescriptor, args: &[Value]) -> String {
    match duration_arg(descriptor, args) {
        Ok((ms, budget)) => {
            let count = busy_sum(budget);
            format!("sum_until() summed {count} values in {ms} ms.")
        }
        Err(message) => message,
    }
}

/// Keep the CPU busy until `budget` of monotonic time has passed.
///
/// Bounded by the clock, not by an iteration count, so a fast machine cannot
/// finish early.
fn busy_sum(budget: Duration) -> u64 {
    let deadline = Instant::now() + budget;
    let mut sum: u64 = 0;
    let mut count: u64 = 0;

    loop {
        sum = black_box(sum.wrapping_add(count));
        count += 1;
        if count % SUM_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
            break;
        }
    }

    black_box(sum);
    count
}

/// Raise the failure kind bound to the requested code.
pub fn error(
    descriptor: &FunctionDescriptor,
    args: &[Value],
    table: &ErrorKindTable,
) -> Result<String, Failure> {
    let code = match single_int32(descriptor, args) {
        Ok(code) => code,
        Err(message) => return Ok(message),
    };

    match table.kind_for(code) {
        Some(kind) => {
            tracing::warn!(%kind, code, "raising requested failure");
            Err(Failure::new(kind, format!("A {kind} was requested.")))
        }
        None => Ok(format!(
            "An unrecognized error_type parameter was received. error_type: {code}"
        )),
    }
}
