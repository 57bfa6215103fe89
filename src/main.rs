use snapline::config::{MatchConfig, ModelConfig};
use snapline::network::Network;
use snapline::route::Ubodt;
use snapline::server::trace::initialize_tracer;
use snapline::server::{DEFAULT_MAX_REQUEST_BYTES, Server, ServerConfig};
use snapline::{Matcher, Response};

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "snapline", version, about)]
struct Cli {
    /// Show everything at `DEBUG` and above, ignoring `RUST_LOG`.
    #[arg(long, global = true, env = "SNAPLINE_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serves map-matching requests over TCP.
    Serve(ServeArgs),

    /// Matches a single WKT trajectory, printing the response.
    Match {
        #[arg(long, env = "SNAPLINE_CONFIG", default_value = "fmm_config.json")]
        config: PathBuf,

        /// A WKT `LINESTRING`.
        wkt: String,
    },

    /// Precomputes the cost table used by the `fmm` model.
    Ubodt {
        #[arg(long, env = "SNAPLINE_CONFIG", default_value = "fmm_config.json")]
        config: PathBuf,

        /// Upper bound of the precomputed shortest path distances.
        #[arg(long)]
        delta: f64,

        /// Destination of the table, `.csv` or `.bin`. Defaults to the
        /// configuration's `input.ubodt.file`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "SNAPLINE_CONFIG", default_value = "fmm_config.json")]
    config: PathBuf,

    #[arg(long, env = "SNAPLINE_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "SNAPLINE_PORT", default_value_t = 1235)]
    port: u16,

    #[arg(long, env = "SNAPLINE_READ_TIMEOUT_SECS", default_value_t = 30)]
    read_timeout_secs: u64,

    #[arg(long, env = "SNAPLINE_MAX_REQUEST_BYTES", default_value_t = DEFAULT_MAX_REQUEST_BYTES)]
    max_request_bytes: usize,
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn Error>> {
    // Everything fallible happens before the socket is bound.
    let config = MatchConfig::load(&args.config).map_err(snapline::Error::from)?;
    let matcher = tokio::task::spawn_blocking(move || Matcher::build(config)).await??;

    let server_config = ServerConfig {
        read_timeout: Duration::from_secs(args.read_timeout_secs),
        max_request_bytes: args.max_request_bytes,
    };

    let server = Server::bind(
        (args.host.as_str(), args.port),
        Arc::new(matcher),
        server_config,
    )
    .await?;

    server
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "Could not listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}

fn generate_ubodt(
    config: PathBuf,
    delta: f64,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    if !(delta.is_finite() && delta > 0.0) {
        return Err(format!("delta must be positive, got {delta}").into());
    }

    let config = MatchConfig::load(&config).map_err(snapline::Error::from)?;
    let output = match (output, &config.model) {
        (Some(output), _) => output,
        (None, ModelConfig::Fmm(fmm)) => fmm.ubodt.clone(),
        (None, ModelConfig::Stmatch(_)) => {
            return Err("no --output given, and the configuration names no UBODT file".into());
        }
    };

    let network = Network::load(&config.network)?;
    let ubodt = Ubodt::generate(&network, delta);
    ubodt.write(&output, &network)?;

    tracing::info!(records = ubodt.len(), output = %output.display(), "Wrote UBODT");
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing `.env` file is not an error.
    dotenv().ok();

    let cli = Cli::parse();
    initialize_tracer(cli.debug);

    let outcome = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Match { config, wkt } => Matcher::from_config_file(config)
            .and_then(|matcher| matcher.match_wkt(&wkt))
            .map_err(Box::<dyn Error>::from)
            .and_then(|result| Ok(Response::encode(&result).to_bytes()?))
            .map(|bytes| println!("{}", String::from_utf8_lossy(&bytes))),
        Command::Ubodt {
            config,
            delta,
            output,
        } => generate_ubodt(config, delta, output),
    };

    if let Err(err) = outcome {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
