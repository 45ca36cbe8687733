//! Command-line and environment configuration

use crate::oracle::{OpenAiConfig, OpenAiOracle, Oracle, RemoteOracle};
use crate::server::ServerConfig;
use anyhow::{Context, Result, bail};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Where words come from
#[derive(Debug, Clone, Args)]
pub struct OracleArgs {
    /// API key for the chat-completion provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Model used to generate and validate words
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4", global = true)]
    pub openai_model: String,

    /// Base URL of the chat-completion API
    #[arg(
        long,
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1",
        global = true
    )]
    pub openai_base_url: String,

    /// Timeout for each oracle call, in seconds
    #[arg(long, env = "ORACLE_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Use a running word service (e.g. http://localhost:3000) instead of the API directly
    #[arg(long, env = "PALABRLE_SERVER", global = true)]
    pub server: Option<String>,
}

impl OracleArgs {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the chat-completion oracle
    ///
    /// # Errors
    /// Fails without an API key or if the HTTP client cannot be built.
    pub fn openai(&self) -> Result<OpenAiOracle> {
        let Some(api_key) = self.openai_api_key.clone().filter(|k| !k.trim().is_empty()) else {
            bail!("OPENAI_API_KEY must be set (or pass --server to use a word service)");
        };

        let config = OpenAiConfig {
            model: self.openai_model.clone(),
            base_url: self.openai_base_url.clone(),
            timeout: self.timeout(),
            ..OpenAiConfig::new(api_key)
        };
        OpenAiOracle::new(config).context("building OpenAI client")
    }

    /// Build the oracle a game client should use
    ///
    /// # Errors
    /// See [`OracleArgs::openai`] and [`RemoteOracle::new`].
    pub fn client_oracle(&self) -> Result<Arc<dyn Oracle>> {
        if let Some(url) = &self.server {
            info!(%url, "using remote word service");
            let remote = RemoteOracle::new(url.as_str(), self.timeout())
                .context("building word service client")?;
            return Ok(Arc::new(remote));
        }
        Ok(Arc::new(self.openai()?))
    }
}

/// HTTP service settings
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Comma-separated browser origins allowed by CORS; any origin when empty or `*`
    #[arg(long = "cors-origin", env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            cors_origins: args
                .cors_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        oracle: OracleArgs,
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn flags_parse() {
        let cli = TestCli::parse_from([
            "palabrle",
            "--openai-api-key",
            "k",
            "--timeout-secs",
            "3",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.oracle.timeout(), Duration::from_secs(3));
        assert_eq!(cli.serve.port, 8080);
        assert!(cli.oracle.openai().is_ok());
    }

    #[test]
    fn cors_origins_split_and_trimmed() {
        let cli = TestCli::parse_from([
            "palabrle",
            "--cors-origin",
            "http://a.test, http://b.test,",
        ]);
        let config = ServerConfig::from(cli.serve);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn blank_api_key_is_an_error() {
        let cli = TestCli::parse_from(["palabrle", "--openai-api-key", " "]);
        assert!(cli.oracle.openai().is_err());
    }
}
