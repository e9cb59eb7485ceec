use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub seed: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Restaurant table reservation API")]
pub struct Args {
    /// Host to bind to (overrides RESTAURANT_API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides RESTAURANT_API_PORT / PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Start with an empty store instead of the fixture tables and clients
    #[arg(long)]
    pub no_seed: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |name| env::var(name))
    }

    /// Merge parsed CLI args over values read through `env`.
    ///
    /// CLI flags win over environment variables, RESTAURANT_API_PORT wins
    /// over PORT, and `--no-seed` wins over RESTAURANT_API_SEED.
    pub fn resolve<F>(args: Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = env("RESTAURANT_API_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match port_from_env(&env, "RESTAURANT_API_PORT")? {
            Some(port) => port,
            None => port_from_env(&env, "PORT")?.unwrap_or(3000),
        };
        let env_seed = match env("RESTAURANT_API_SEED") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("parsing RESTAURANT_API_SEED value `{}`", value))?,
            Err(env::VarError::NotPresent) => true,
            Err(err) => return Err(err).context("reading RESTAURANT_API_SEED"),
        };

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            seed: env_seed && !args.no_seed,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn port_from_env<F>(env: &F, name: &str) -> Result<Option<u16>>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match env(name) {
        Ok(value) => value
            .parse::<u16>()
            .map(Some)
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got `{}`", other),
    }
}
