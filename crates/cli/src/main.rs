//! `project-item-id` entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse inputs**: read action inputs from flags or `INPUT_*` variables
//!    and fill unspecified issue coordinates from the workflow context.
//! 2. **Wire observability**: configure `tracing-subscriber` with a JSON (or
//!    text) layer on stderr and, when configured, an OpenTelemetry OTLP
//!    exporter. All spans and events from every crate flow through it.
//! 3. **Construct infrastructure**: resolve credentials into a
//!    [`github::GithubClient`], which the matcher sees only as a
//!    [`locator::ProjectItemSource`].
//! 4. **Report**: publish `GITHUB_PROJECT_ITEM_ID`, or turn any error into a
//!    single `::error::` command and a non-zero exit code.

mod actions;
mod context;
mod inputs;
mod telemetry;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use github::{Credentials, GithubClient, GithubEndpoints};
use locator::{find_project_item, report, InvocationId, LocatorError, ResultReporter};
use tracing::{error, info, Instrument};

use crate::actions::ActionsReporter;
use crate::context::WorkflowContext;
use crate::inputs::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let reporter = ActionsReporter::from_env();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            reporter.set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let telemetry = match telemetry::init(args.log_format) {
        Ok(telemetry) => Some(telemetry),
        Err(e) => {
            eprintln!("telemetry disabled: {e:#}");
            None
        }
    };

    let invocation_id = InvocationId::new_random();
    let span = tracing::info_span!("project_item_id", invocation = %invocation_id);
    let outcome = run(args, &reporter).instrument(span).await;

    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Invocation failed");
            reporter.set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    };

    if let Some(telemetry) = telemetry {
        telemetry.shutdown();
    }
    code
}

async fn run(args: Args, reporter: &ActionsReporter<std::io::Stdout>) -> Result<(), LocatorError> {
    let invocation = args.into_invocation(&WorkflowContext::from_env())?;
    info!(project = %invocation.project, key = %invocation.key, "Resolving project item");

    let client = GithubClient::resolve(GithubEndpoints::from_env(), &invocation.credentials).await?;
    if matches!(invocation.credentials, Credentials::App(_)) {
        reporter.add_mask(client.access_token().expose());
    }

    let result = find_project_item(&client, &invocation.project, &invocation.key).await?;
    report(reporter, &result, invocation.fail_if_not_found)
}
