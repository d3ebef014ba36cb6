//! Local invocation harness for the Service Catalog resource providers.
//!
//! Reads a `ResourceHandlerRequest` JSON document, runs the selected
//! provider handler against real AWS, and plays the CloudFormation
//! framework's part for in-progress results: sleep for the callback delay,
//! then re-invoke with the returned callback context. The final progress
//! event is printed to stdout as JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use servicecatalog_provider_core::{
    default_client, Action, AwsServiceCatalog, OperationStatus, ResourceHandlerRequest,
};
use servicecatalog_provider_serviceaction as serviceaction;
use servicecatalog_provider_serviceactionassociation as association;

#[derive(Parser)]
#[command(
    name = "servicecatalog-provider",
    version,
    about = "Invoke the Service Catalog CloudFormation resource providers locally"
)]
struct Cli {
    #[command(subcommand)]
    provider: Provider,
}

#[derive(Subcommand)]
enum Provider {
    /// Invoke the AWS::ServiceCatalog::ServiceAction provider.
    ServiceAction(InvokeArgs),
    /// Invoke the AWS::ServiceCatalog::ServiceActionAssociation provider.
    ServiceActionAssociation(InvokeArgs),
}

#[derive(Args)]
struct InvokeArgs {
    /// Lifecycle action to run: create, read, update, delete or list.
    #[arg(long)]
    action: Action,

    /// Path to the ResourceHandlerRequest JSON document.
    #[arg(long)]
    request: PathBuf,

    /// Upper bound on re-invocations while an operation stabilizes.
    #[arg(long, default_value_t = 60)]
    max_reinvocations: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let failed = match cli.provider {
        Provider::ServiceAction(args) => run_serviceaction(args).await?,
        Provider::ServiceActionAssociation(args) => run_association(args).await?,
    };
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_serviceaction(args: InvokeArgs) -> Result<bool> {
    let request: ResourceHandlerRequest<serviceaction::ResourceModel> =
        load_request(&args.request)?;
    let api = AwsServiceCatalog::new(default_client().await);

    let mut callback_context: Option<serviceaction::CallbackContext> = None;
    let mut reinvocations = 0;
    loop {
        let event = match serviceaction::handle_request(
            &api,
            args.action,
            &request,
            callback_context.as_ref(),
        )
        .await
        {
            Ok(event) => event,
            Err(err) => err.into_progress_event(),
        };
        match event.status {
            OperationStatus::InProgress => {
                wait_for_reinvocation(
                    &mut reinvocations,
                    args.max_reinvocations,
                    event.callback_delay_seconds,
                )
                .await?;
                callback_context = event.callback_context;
            }
            status => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                return Ok(status == OperationStatus::Failed);
            }
        }
    }
}

async fn run_association(args: InvokeArgs) -> Result<bool> {
    let request: ResourceHandlerRequest<association::ResourceModel> =
        load_request(&args.request)?;
    let api = AwsServiceCatalog::new(default_client().await);

    let mut callback_context: Option<association::CallbackContext> = None;
    let mut reinvocations = 0;
    loop {
        let event = match association::handle_request(
            &api,
            args.action,
            &request,
            callback_context.as_ref(),
        )
        .await
        {
            Ok(event) => event,
            Err(err) => err.into_progress_event(),
        };
        match event.status {
            OperationStatus::InProgress => {
                wait_for_reinvocation(
                    &mut reinvocations,
                    args.max_reinvocations,
                    event.callback_delay_seconds,
                )
                .await?;
                callback_context = event.callback_context;
            }
            status => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                return Ok(status == OperationStatus::Failed);
            }
        }
    }
}

async fn wait_for_reinvocation(
    reinvocations: &mut u32,
    max_reinvocations: u32,
    callback_delay_seconds: Option<u64>,
) -> Result<()> {
    if *reinvocations >= max_reinvocations {
        bail!("operation still in progress after {max_reinvocations} re-invocations");
    }
    *reinvocations += 1;
    let delay = callback_delay_seconds.unwrap_or(1);
    log::info!("in progress, re-invoking in {delay}s ({reinvocations}/{max_reinvocations})");
    tokio::time::sleep(Duration::from_secs(delay)).await;
    Ok(())
}

fn load_request<M: DeserializeOwned>(path: &Path) -> Result<ResourceHandlerRequest<M>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("request file {} is not a valid handler request", path.display()))
}
