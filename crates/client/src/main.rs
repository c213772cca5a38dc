//! profilesync CLI entry point.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use profilesync_client::accounts::load_accounts;
use profilesync_client::cli::users::{draft_from_args, UsersAction};
use profilesync_client::cli::{Cli, Commands, OutputFormat};
use profilesync_client::output::{format_output, pretty};
use profilesync_client::{ClientConfig, InMemoryProfileBackend, ProfileClient};
use profilesync_core::identity::{extract, resolve, synthesize, FallbackOptions};
use profilesync_core::profile::{Existence, ProfileBackend};
use profilesync_core::reconcile::ReconciliationController;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "profilesync=info,profilesync_client=info,profilesync_core=info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Extract {
            ref file,
            single_token_first_name,
        } => {
            let accounts = load_accounts(file)?;
            let Some(account) = accounts.first() else {
                bail!("{} contains no account", file.display());
            };
            let options = FallbackOptions {
                single_token_as_first_name: single_token_first_name,
            };
            let draft = resolve(extract(account), options);
            let profile = synthesize(draft.clone())?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(
                        &serde_json::json!({ "draft": draft, "profile": profile }),
                        cli.format
                    )
                ),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_draft(&draft));
                    println!("\n{}", pretty::format_profile(&profile));
                }
            }
        }
        Commands::Reconcile(ref reconcile_cmd) => {
            let controller =
                ReconciliationController::new(backend(&cli)?, reconcile_cmd.options());
            let mut failures = 0usize;

            for file in &reconcile_cmd.files {
                let accounts = load_accounts(file)?;
                tracing::info!(file = %file.display(), accounts = accounts.len(), "notification");
                match controller.on_accounts_changed(&accounts).await {
                    Ok(outcome) if !cli.shows(&outcome) => {}
                    Ok(outcome) => match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&outcome, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_outcome(&outcome)),
                    },
                    Err(e) => {
                        failures += 1;
                        eprintln!("Error ({}): {}", file.display(), e);
                    }
                }
            }

            if failures > 0 {
                bail!("{} of {} notifications failed", failures, reconcile_cmd.files.len());
            }
        }
        Commands::Users(ref users_cmd) => match &users_cmd.action {
            UsersAction::Lookup { email } => {
                let existence = backend(&cli)?.check_exists(email).await?;
                match cli.format {
                    OutputFormat::Json => {
                        let record = match &existence {
                            Existence::Found(record) => Some(record),
                            Existence::NotFound => None,
                        };
                        let value = serde_json::json!({
                            "email": email,
                            "found": existence.is_found(),
                            "record": record,
                        });
                        println!("{}", format_output(&value, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_existence(email, &existence))
                    }
                }
            }
            UsersAction::Create {
                email,
                first_name,
                last_name,
                display_name,
            } => {
                let profile = synthesize(draft_from_args(
                    email.clone(),
                    first_name.clone(),
                    last_name.clone(),
                    display_name.clone(),
                ))?;
                let record = backend(&cli)?.create(&profile).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&record, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_record(&record))
                    }
                }
            }
        },
    }

    Ok(())
}

/// Pick the backend selected on the command line.
fn backend(cli: &Cli) -> Result<Arc<dyn ProfileBackend>> {
    if cli.offline {
        tracing::debug!("using in-memory backend");
        return Ok(Arc::new(InMemoryProfileBackend::new()));
    }

    let config = ClientConfig::new(&cli.base_url)?;
    tracing::debug!(base_url = config.base_url(), "using HTTP backend");
    Ok(Arc::new(ProfileClient::new(&config)))
}
