use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "selvedge",
    version,
    about = "Hyprland status bar assembled from widget references"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of $XDG_CONFIG_HOME/selvedge/config.toml
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging using [logging].debug_filter
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Show the bar on the Wayland compositor (default)
    Run,

    /// Validate the config and print the assembled bar
    Check,

    /// Render the bar inside this terminal
    #[command(alias = "p")]
    Preview,

    /// List every widget reference the bar understands
    #[command(alias = "ls")]
    Widgets,
}

impl Cli {
    pub fn action(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_and_aliases() {
        let cli = Cli::parse_from(["selvedge"]);
        assert_eq!(cli.action(), Commands::Run);

        let cli = Cli::parse_from(["selvedge", "ls", "--debug"]);
        assert_eq!(cli.action(), Commands::Widgets);
        assert!(cli.debug);

        let cli = Cli::parse_from(["selvedge", "--config", "/tmp/bar.toml", "check"]);
        assert_eq!(cli.action(), Commands::Check);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bar.toml")));
    }
}
