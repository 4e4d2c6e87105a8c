use crate::config::{load_server_config, ServerConfig, StoreBackend};
use crate::errors::Error;
use clap::Parser;

/// Command line interface for the user registry server
#[derive(Parser, Debug)]
#[command(version, about = "HTTP CRUD service for user records")]
pub struct Cli {
    /// Optional YAML or TOML file with server settings; flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Storage backend for user records
    #[arg(long, value_enum)]
    pub backend: Option<StoreBackend>,

    /// SQLite database file used by the sqlite backend
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<String>,

    /// Address to bind the HTTP listener to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under ./logs
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Merges the config file (if any) with the flags given on the command line
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the config file cannot be loaded
    pub fn server_config(&self) -> Result<ServerConfig, Error> {
        let mut config = match &self.config {
            Some(path) => load_server_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        if let Some(path) = &self.database_path {
            config.store.database_path = path.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "user-registry",
            "--backend",
            "sqlite",
            "--database-path",
            "test.db",
            "--port",
            "9090",
        ])
        .unwrap();
        let config = cli.server_config().unwrap();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.database_path, "test.db");
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let cli = Cli::try_parse_from(["user-registry", "--config", "/nonexistent/server.yaml"]).unwrap();
        assert!(matches!(cli.server_config(), Err(Error::Config(_))));
    }
}
