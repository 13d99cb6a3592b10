mod cli;
mod dispatch;
mod logging;
mod output;
mod paths;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use outlay_client::{API_VERSION, ClientError};
use stdout_io::write_stdout_line;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_line(err.to_string().trim_end()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let parse_error = ClientError::invalid_argument(&strip_clap_boilerplate(&err.to_string()));
            if output::print_failure(&parse_error).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    logging::init_logging(&cli.log_level);
    debug!(version = API_VERSION, "outlay starting");

    match dispatch::dispatch(&cli) {
        Ok(summary) => {
            debug!(
                method = %summary.method,
                rows = summary.rows_written,
                output = %summary.output_path,
                "run finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Strips clap's trailing usage/help hints so the error line stays one line.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed
        .trim_end()
        .trim_start_matches("error: ")
        .to_string()
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_") || error.code == "output_write_failed"
}

#[cfg(test)]
mod tests {
    use super::{is_internal_error, strip_clap_boilerplate};
    use outlay_client::ClientError;

    #[test]
    fn clap_hints_are_removed() {
        let raw = "error: unexpected argument '--bogus' found\n\nUsage: outlay predict [OPTIONS]\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(raw),
            "unexpected argument '--bogus' found"
        );
    }

    #[test]
    fn write_failures_are_internal() {
        let error = ClientError::output_write_failed(std::path::Path::new("/nope/out.json"), "denied");
        assert!(is_internal_error(&error));
        assert!(!is_internal_error(&ClientError::missing_salt("summa_random_salt")));
    }
}
