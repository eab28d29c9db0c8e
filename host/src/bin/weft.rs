//! `weft` - pipe passthrough over the full bootstrap.
//!
//! Numbers every stdin line to stdout and reports the line count on stderr
//! at EOF, exercising the whole stack end to end: chunked producer thread,
//! line iterator, console shim. `RUST_LOG` controls diagnostics.

use anyhow::{Context, Result};
use serde_json::json;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

use weft_core::Environment;
use weft_host::{HostConfig, TokioHost};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let host = TokioHost::from_stdin(&HostConfig::default());
    let mut env = Environment::new(host);
    let mut stdin = env.take_stdin().context("stdin already taken")?;

    LocalSet::new()
        .run_until(async move {
            let console = env.console();
            let mut count: u64 = 0;
            loop {
                match stdin.next().await {
                    Ok(Some(line)) => {
                        count += 1;
                        console.log(&[json!(format!("{count:>6}")), json!(line)]);
                    }
                    Ok(None) => break,
                    Err(e) => return Err(e).context("reading stdin"),
                }
            }
            console.error(&[json!(format!("{count} lines"))]);
            Ok(())
        })
        .await
}
