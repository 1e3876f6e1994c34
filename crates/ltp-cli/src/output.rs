use std::io::Write;

use ltp_core::ErrorResponse;
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

pub fn render(value: &Value, pretty: bool) -> Result<(), CliError> {
    write_json(value, pretty)
}

/// Quote failures are printed as an error document on stdout; everything else goes to stderr.
pub fn render_error(error: &CliError, pretty: bool) {
    if let CliError::Quote(quote_error) = error {
        if write_json(&ErrorResponse::from(quote_error), pretty).is_ok() {
            return;
        }
    }
    eprintln!("error: {error}");
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
