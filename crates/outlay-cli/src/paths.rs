use std::path::Path;

use outlay_client::commands::predict::PredictRequest;
use outlay_client::{ClientError, ClientResult};

use crate::cli::PredictArgs;

/// Environment variable the upstream producer sets to namespace one run.
pub const SALT_ENV_VAR: &str = "summa_random_salt";

pub fn salt_from_env() -> Option<String> {
    std::env::var(SALT_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Fills in whichever of input/output was not given explicitly from the salt.
pub fn resolve_request(args: &PredictArgs, salt: Option<&str>) -> ClientResult<PredictRequest> {
    let (input_path, output_path) = match (&args.input, &args.output) {
        (Some(input), Some(output)) => (input.clone(), output.clone()),
        (input, output) => {
            let salt = salt.ok_or_else(|| ClientError::missing_salt(SALT_ENV_VAR))?;
            (
                input
                    .clone()
                    .unwrap_or_else(|| salted_path(&args.tmp_dir, salt, "csv")),
                output
                    .clone()
                    .unwrap_or_else(|| salted_path(&args.tmp_dir, salt, "json")),
            )
        }
    };

    Ok(PredictRequest {
        method: args.method,
        input_path,
        output_path,
    })
}

fn salted_path(dir: &Path, salt: &str, extension: &str) -> std::path::PathBuf {
    dir.join(format!("{salt}.{extension}"))
}
