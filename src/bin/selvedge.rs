use anyhow::Result;
use clap::Parser;

use selvedge::modules::bootstrap::build_window;
use selvedge::modules::cli::{Cli, Commands};
use selvedge::modules::config;
use selvedge::modules::inspect;
use selvedge::modules::logging::{self, log_info};
use selvedge::modules::runner;
use selvedge::registry::Catalog;
use selvedge::state::BarState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = config::config_path(cli.config.as_deref());

    // Logging is configured from the file, so load it before anything logs.
    let loaded = config::try_load_bar_config(&config_path);
    let logging_config = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let command = cli.action();
    logging::init_logging(
        &logging::LogSink::for_command(command),
        cli.debug,
        &logging_config.level,
        &logging_config.debug_filter,
    )?;

    match command {
        Commands::Check => {
            let bar_config = loaded?;
            let window = build_window(&bar_config)?;
            let state = BarState::detached(bar_config);
            print!("{}", inspect::render_tree(&window, &state));
            log_info("CHECK", &format!("{:?} is valid", config_path));
            Ok(())
        }
        Commands::Widgets => {
            print!("{}", inspect::list_widgets(&Catalog::builtin()));
            Ok(())
        }
        Commands::Preview => runner::run_preview(config::or_defaults(loaded)).await,
        Commands::Run => {
            log_info("BAR", "selvedge starting...");
            runner::run_server(config::or_defaults(loaded)).await
        }
    }
}
