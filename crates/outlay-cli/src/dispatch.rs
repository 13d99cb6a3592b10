use outlay_client::commands::predict;
use outlay_client::{ClientResult, PredictSummary};

use crate::cli::{Cli, Commands, PredictArgs};
use crate::paths::{resolve_request, salt_from_env};

pub fn dispatch(cli: &Cli) -> ClientResult<PredictSummary> {
    match &cli.command {
        Some(Commands::Predict(args)) => run_predict(args),
        None => run_predict(&PredictArgs::default()),
    }
}

fn run_predict(args: &PredictArgs) -> ClientResult<PredictSummary> {
    let salt = salt_from_env();
    let request = resolve_request(args, salt.as_deref())?;
    predict::run(&request)
}
