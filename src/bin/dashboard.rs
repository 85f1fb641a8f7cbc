use clap::Parser;
use tracing_subscriber::EnvFilter;

use ipl_dashboard::config::DEFAULT_API_URL;
use ipl_dashboard::services::match_client::MatchClient;
use ipl_dashboard::services::match_filter::MatchFilter;
use ipl_dashboard::services::render::{render_dashboard, FETCH_ERROR_MESSAGE};

/// Terminal scoreboard for the IPL dashboard API.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version)]
struct Args {
    /// Which matches to show: all, live, completed or upcoming
    #[arg(long, default_value = "all")]
    filter: MatchFilter,

    /// Expand every card into its full scorecard
    #[arg(long)]
    details: bool,

    /// Origin of the dashboard API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = MatchClient::new(args.api_url);

    match client.fetch_matches().await {
        Ok(matches) => {
            print!("{}", render_dashboard(&matches, args.filter, args.details));
        }
        Err(e) => {
            tracing::error!("Error fetching matches: {}", e);
            println!("{}", FETCH_ERROR_MESSAGE);
            std::process::exit(1);
        }
    }
}
