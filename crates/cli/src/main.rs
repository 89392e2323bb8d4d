use clap::Parser;
use gabench_cli::telemetry::{init_tracing, TelemetryConfig};
use gabench_cli::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = init_tracing(TelemetryConfig {
        verbose: args.verbose,
        json: args.log_json,
        output: args.log_output.as_deref(),
    }) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }

    if let Err(err) = gabench_cli::run(&args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
