mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use lions_essays::config::AppConfig;
use logging::LogTarget;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    // Headless when asked to, or when stdout is not a terminal
    let headless = args.headless || !is_terminal();
    let target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    let _log_guard = logging::init(target, config.debug, &config.log_dir)?;

    if headless {
        info!(json = args.json, "running headless");
        return event::run_headless(args.json);
    }

    info!(
        essay = config.start_essay.as_str(),
        map = config.map_token.is_some(),
        "starting interactive session"
    );
    let mut app = App::new(config);
    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup(true, true);
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
