//! Command implementations.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use contracts::{OPT_STDERR, OPT_STDOUT};
use session::{FifoStreamFactory, SessionRegistry};
use tracing::info;

use crate::cli::ForwardArgs;

/// Run the `forward` command: one session, torn down on Ctrl-C.
pub async fn run_forward(args: &ForwardArgs) -> Result<()> {
    let options = build_options(args)?;

    let registry = SessionRegistry::new(FifoStreamFactory);
    let id = args.fifo.display().to_string();

    registry
        .start(&id, &options)
        .await
        .with_context(|| format!("failed to start session for '{id}'"))?;

    info!(session = %id, "forwarding, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    if let Some(snapshot) = registry.metrics(&id).await {
        info!(
            stdout_records = snapshot.stdout_records,
            stderr_records = snapshot.stderr_records,
            dropped_records = snapshot.dropped_records,
            write_failures = snapshot.write_failures,
            "final dispatch counters"
        );
    }

    registry.stop_and_wait(&id).await;
    Ok(())
}

/// Assemble the session option map from file, flags, and overrides.
fn build_options(args: &ForwardArgs) -> Result<HashMap<String, String>> {
    let mut options = match &args.options_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file '{}'", path.display()))?;
            serde_json::from_str::<HashMap<String, String>>(&content)
                .with_context(|| format!("invalid options file '{}'", path.display()))?
        }
        None => HashMap::new(),
    };

    if let Some(stdout) = &args.stdout {
        options.insert(OPT_STDOUT.to_string(), stdout.display().to_string());
    }
    if let Some(stderr) = &args.stderr {
        options.insert(OPT_STDERR.to_string(), stderr.display().to_string());
    }

    for pair in &args.options {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid option '{pair}', expected KEY=VALUE");
        };
        options.insert(key.to_string(), value.to_string());
    }

    Ok(options)
}
