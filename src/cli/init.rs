//! Init command implementation
//!
//! Scaffolds a new usergate project: `usergate.toml`, `.env.example`,
//! a `data/` directory and a `.gitignore`.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (usergate.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing usergate project");

    let base_path = &config.path;

    let config_path = base_path.join("usergate.toml");
    if config_path.exists() && !config.force {
        output.warning("usergate.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data/", "already exists");
    } else if let Err(e) = fs::create_dir_all(&data_dir) {
        output.error(&format!("Failed to create data/: {}", e));
        return InitResult::Error(e.to_string());
    } else {
        output.created("data/");
    }

    let files = [
        ("usergate.toml", generate_usergate_toml(&config), config.force),
        (".env.example", generate_env_example(), config.force),
        // An existing .gitignore belongs to the user and is never replaced
        (".gitignore", generate_gitignore(), false),
    ];

    for (name, content, force) in files {
        match write_file(&base_path.join(name), &content, force) {
            Ok(true) => output.created(name),
            Ok(false) => output.skipped(name, "already exists"),
            Err(e) => {
                output.error(&format!("Failed to create {}: {}", name, e));
                return InitResult::Error(e.to_string());
            }
        }
    }

    output.success("usergate project initialized");

    output.header("Next Steps");
    output.info("1. Set the token signing secret:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set JWT_SECRET (min 32 chars)");
    output.info("2. Start the server:");
    output.command("usergate-server");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

/// Returns `Ok(false)` when an existing file was left alone.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_usergate_toml(config: &InitConfig) -> String {
    format!(
        r#"# usergate configuration
# Secrets are read from the environment variables named here, never from this file.

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Environment variable holding the JWT signing secret (min 32 characters)
jwt_secret_env = "JWT_SECRET"
# Token validity in seconds
jwt_expiry_secs = 3600

[database]
# SQLite file path, or ":memory:" for an ephemeral database
url = "./data/usergate.db"

# Remote Turso database (requires the `turso` feature)
# turso_url_env = "TURSO_URL"
# turso_token_env = "TURSO_AUTH_TOKEN"
"#,
        host = config.host,
        port = config.port
    )
}

fn generate_env_example() -> String {
    r#"# usergate environment variables
# Copy this file to .env and fill in the values.

# REQUIRED: JWT signing secret (minimum 32 characters)
# Generate with: openssl rand -base64 32
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: log filter, overrides server.log_level
RUST_LOG=info,usergate=debug

# Optional: override server.host / server.port
# USERGATE_HOST=0.0.0.0
# USERGATE_PORT=8080

# Optional: Turso cloud database
# TURSO_URL=libsql://your-db.turso.io
# TURSO_AUTH_TOKEN=your-token
"#
    .to_string()
}

fn generate_gitignore() -> String {
    r#"# usergate generated files
/data/
*.db
*.db-journal

# Environment
.env
.env.local
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::AppConfig;
    use tempfile::TempDir;

    fn init_config(path: &Path, force: bool) -> InitConfig {
        InitConfig {
            path: path.to_path_buf(),
            force,
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }

    #[test]
    fn test_init_creates_project_files() {
        let dir = TempDir::new().unwrap();

        let result = run(init_config(dir.path(), false), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        assert!(dir.path().join("usergate.toml").is_file());
        assert!(dir.path().join(".env.example").is_file());
        assert!(dir.path().join(".gitignore").is_file());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = AppConfig::from_toml_str(&generate_usergate_toml(&init_config(
            Path::new("."),
            false,
        )))
        .expect("generated config should parse");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.database.url, "./data/usergate.db");
    }

    #[test]
    fn test_init_refuses_existing_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("usergate.toml"), "# mine").unwrap();

        let result = run(init_config(dir.path(), false), &Output::no_color());

        assert_eq!(result, InitResult::AlreadyExists);
        assert_eq!(
            fs::read_to_string(dir.path().join("usergate.toml")).unwrap(),
            "# mine"
        );
    }

    #[test]
    fn test_force_overwrites_config_but_keeps_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("usergate.toml"), "# mine").unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();

        let result = run(init_config(dir.path(), true), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        let toml = fs::read_to_string(dir.path().join("usergate.toml")).unwrap();
        assert!(toml.contains("[auth]"));
        assert_eq!(
            fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
            "target/\n"
        );
    }
}
