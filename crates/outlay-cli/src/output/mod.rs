use std::io;

use outlay_client::ClientError;
use outlay_client::contracts::envelope::render_failure_json;
use tracing::warn;

use crate::stdout_io::write_stdout_line;

/// Prints `{"error": "<message>"}` to stdout. Code, structured data and
/// recovery steps go to the stderr log only.
pub fn print_failure(error: &ClientError) -> io::Result<()> {
    match log_data(error) {
        Some(data) => warn!(code = %error.code, %data, "prediction run failed: {}", error.message),
        None => warn!(code = %error.code, "prediction run failed: {}", error.message),
    }
    for step in &error.recovery_steps {
        warn!(code = %error.code, "next step: {step}");
    }

    let body = render_failure_json(error).map_err(|err| io::Error::other(err.message))?;
    write_stdout_line(&body)
}

fn log_data(error: &ClientError) -> Option<String> {
    error.data.as_ref().map(|value| value.to_string())
}
