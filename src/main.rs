use asmnav::{cli, output, router};

fn main() {
    let cli = cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    if let Err(err) = router::dispatch(cli) {
        std::process::exit(output::format_error(&err, json));
    }
}

/// Diagnostics go to stderr at `warn` (or `debug` with `--verbose`) unless
/// `RUST_LOG` says otherwise.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
