//! CLI module for usergate
//!
//! Provides command-line interface parsing and handling for the usergate-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// usergate - user management API server
///
/// Serves user CRUD, registration, login and role-gated routes over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "usergate-server",
    version,
    about = "usergate - user management API server",
    long_about = "A user management HTTP API with password login, JWT identity tokens\n\
                  and role-gated routes.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new project.",
    after_help = "EXAMPLES:\n    \
                  usergate-server init                 # Scaffold usergate.toml and .env.example\n    \
                  usergate-server config --validate    # Check the configuration\n    \
                  usergate-server                      # Start the server (requires usergate.toml)\n    \
                  usergate-server --config my.toml     # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "usergate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new usergate project
    ///
    /// Creates usergate.toml, .env.example, a data/ directory and a
    /// .gitignore in the target directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration, including the JWT secret
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_arguments() {
        let cli = Cli::try_parse_from(["usergate-server"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("usergate.toml"));
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_init_arguments() {
        let cli = Cli::try_parse_from([
            "usergate-server",
            "init",
            "/tmp/project",
            "--force",
            "--port",
            "8080",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Init {
                path,
                force,
                host,
                port,
            }) => {
                assert_eq!(path, PathBuf::from("/tmp/project"));
                assert!(force);
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            other => panic!("expected init command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["usergate-server", "config", "--validate", "-c", "other.toml"])
                .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Some(Commands::Config { validate: true })));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["usergate-server", "init", "--port", "99999"]).is_err());
    }
}
