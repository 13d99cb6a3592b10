use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use outlay_client::{DEFAULT_METHOD, PredictionMethod};

pub const DEFAULT_TMP_DIR: &str = "/tmp";

pub fn parse_method(value: &str) -> Result<PredictionMethod, String> {
    value.parse::<PredictionMethod>()
}

/// Extended help shown after `outlay predict --help`.
pub const PREDICT_AFTER_HELP: &str = "\
Input:
  A CSV with a header row (case-sensitive; other columns are ignored).

  trend      requires `createdAt`, `amount` and `categoryId`
  aggregate  requires `createdAt` and `amount`

Dates:
  trend      accepts `createdAt` as YYYY-MM-DD, an ISO 8601 datetime, or MM-DD-YYYY
  aggregate  accepts `createdAt` as MM-DD-YYYY only

Paths:
  Without --input/--output, both are derived from the `summa_random_salt`
  environment variable: <tmp-dir>/<salt>.csv and <tmp-dir>/<salt>.json.

Output:
  trend      JSON array of [yhat, yhat_lower, yhat_upper, \"YYYY-MM-DD\"], 12 month ends
  aggregate  JSON array of normalized monthly totals in [0, 1]

  On failure nothing is written; stdout receives {\"error\": \"<message>\"}.
";

#[derive(Debug, Parser)]
#[command(
    name = "outlay",
    version,
    about = "Forecast monthly expenses from a transaction CSV"
)]
pub struct Cli {
    /// Log level for stderr diagnostics (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one prediction pipeline and write its JSON result
    #[command(after_help = PREDICT_AFTER_HELP)]
    Predict(PredictArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Pipeline to run: trend or aggregate
    #[arg(long, value_parser = parse_method, default_value = DEFAULT_METHOD.as_str())]
    pub method: PredictionMethod,

    /// Input CSV (defaults to <tmp-dir>/<salt>.csv)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output JSON (defaults to <tmp-dir>/<salt>.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Directory holding salted input/output files
    #[arg(long, default_value = DEFAULT_TMP_DIR)]
    pub tmp_dir: PathBuf,
}

impl Default for PredictArgs {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD,
            input: None,
            output: None,
            tmp_dir: PathBuf::from(DEFAULT_TMP_DIR),
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
