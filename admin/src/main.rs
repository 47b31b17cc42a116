use std::io;

use anyhow::Context;
use clap::Parser;
use library_admin::{logging, Settings, Shell, UreqTransport};
use library_core::{Api, Route};

/// `library-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "library-admin",
    about = "Manage books and student loans of the university library",
    version
)]
struct CliArgs {
    /// Route to open first, e.g. `/loans/active`.
    #[arg(value_name = "route", default_value = "/books", value_parser = parse_route)]
    route: Route,
    /// Base URL of the library API. Falls back to `LIBRARY_API_URL`.
    #[arg(long = "api-url", value_name = "url")]
    api_url: Option<String>,
    /// Render the route once and exit instead of starting the shell.
    #[arg(long)]
    once: bool,
}

fn parse_route(raw: &str) -> Result<Route, String> {
    Route::parse(raw).ok_or_else(|| format!("unknown route '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut settings = Settings::load().with_context(|| "failed to load library-admin settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    logging::init(&settings.log_level)?;
    tracing::info!(api_url = %settings.api_url, route = %args.route, "starting library-admin");

    let api = Api::new(&settings.api_url, UreqTransport::new());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(api, args.route, stdin.lock(), stdout.lock());

    if args.once {
        shell.render()?;
    } else {
        shell.run()?;
    }
    Ok(())
}
