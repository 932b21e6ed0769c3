use clap::Parser;
use mock_interview::config::{Config, API_KEY_ENV};
use mock_interview::daemon;
use mock_interview::error::Result;

#[derive(Parser, Debug)]
#[command(name = "mock-interviewd")]
#[command(about = "Mock interview chat-completion proxy")]
struct Cli {
    /// JSON config file; conventions apply when omitted.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    mock_interview::logging::init_tracing("mock_interviewd");
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::convention_defaults(),
    }
    .with_env_overrides();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(model) = cli.model {
        config.provider.model = Some(model);
    }
    if let Some(api_key) = cli.api_key {
        config.provider.api_key = Some(api_key);
    }

    daemon::run(&config).await
}
