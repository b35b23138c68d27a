//! Output formatting helpers.

use anyhow::{Result, bail};
use colored::Colorize;
use serde::Serialize;

use sesame_core::AuthResult;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a service result and turn failures into a non-zero exit.
///
/// With `as_json` the whole envelope goes to stdout; otherwise `render` prints
/// the success data and failures print their message and code. `failure_prefix`
/// labels the failure line.
pub fn report<T, F>(
    result: AuthResult<T>,
    as_json: bool,
    failure_prefix: &str,
    render: F,
) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    if as_json {
        json(&result)?;
    }

    match result {
        AuthResult::Success { data } => {
            if !as_json {
                render(&data);
            }
            Ok(())
        }
        AuthResult::Failure { message, code, .. } => {
            if !as_json {
                error(&format!("{}: {} [{}]", failure_prefix, message, code.bold()));
            }
            bail!("{} ({})", failure_prefix, code)
        }
    }
}
