//! usergate-server entry point
//!
//! - `usergate-server` - Start the HTTP server (requires usergate.toml)
//! - `usergate-server init` - Scaffold a new project
//! - `usergate-server config` - Show or validate the configuration

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use usergate::{
    api::routes::build_app,
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    utils::{
        logging::init_tracing,
        toml_config::{load_dotenv, AppConfig},
    },
    AppState, AuthService, DatabaseProvider,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
            };
            match init::run(config, output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
            }
        }
        Some(Commands::Config { validate }) => {
            load_dotenv();
            show_config(&cli.config, validate, output)
        }
        None => {
            load_dotenv();
            serve(&cli.config, cli.verbose).await
        }
    }
}

fn show_config(path: &Path, validate: bool, output: &Output) -> anyhow::Result<()> {
    let config = AppConfig::read(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    output.header(&format!("Configuration ({})", path.display()));
    output.kv("bind address", &config.bind_address());
    output.kv(
        "jwt secret",
        &format!("${} (redacted)", config.auth.jwt_secret_env),
    );
    output.kv(
        "database",
        &DatabaseProvider::from_config(&config.database).to_string(),
    );
    output.block(&config.to_toml_string()?);

    if validate {
        config.validate().context("configuration is invalid")?;
        output.success("Configuration is valid");
    }

    Ok(())
}

async fn serve(config_path: &Path, verbose: bool) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    init_tracing(&config.server, verbose);

    let provider = DatabaseProvider::from_config(&config.database);
    tracing::info!(%provider, "Opening user store");
    let store = provider
        .create_client()
        .await
        .context("failed to open the user store")?;

    let auth_service = Arc::new(AuthService::new(
        config.jwt_secret()?,
        config.auth.jwt_expiry_secs,
    ));

    let addr = config.bind_address();
    let state = AppState {
        config: Arc::new(config),
        store,
        auth_service,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("usergate listening on http://{}", addr);
    #[cfg(feature = "swagger-ui")]
    tracing::info!("API docs at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("usergate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
