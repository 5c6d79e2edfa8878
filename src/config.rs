// src/config.rs
//! Command-line input and the resolved, read-only build configuration.

use crate::constants::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_HUB_ENDPOINT, ENV_HUB_ENDPOINT, ENV_HUB_TOKEN,
    ENV_PREVIEW_SECRET,
};
use crate::error::AppError;
use crate::output::OutputFormat;
use crate::preview::PreviewGate;
use crate::query::homepage::homepage_query;
use crate::query::{HubSchema, QuerySpec};
use crate::types::{ApiToken, PageId, PreviewSecret, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Identifier of the page to build, used in output names and error reports
    #[arg(long, default_value = "index")]
    pub page: String,

    /// Build in preview mode; must equal CONTENT_HUB_PREVIEW_SECRET
    #[arg(long)]
    pub preview_secret: Option<String>,

    /// Read content from a JSON record dump instead of the live hub
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// GraphQL endpoint (overrides CONTENT_HUB_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Seconds to wait for the hub before failing the build
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Artifact format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file (defaults to <page>.page.<format> in the working directory)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pipe mode - write the artifact to stdout instead of a file
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where content comes from.
#[derive(Debug, Clone)]
pub enum HubSource {
    Live {
        token: ApiToken,
        endpoint: ValidatedUrl,
        timeout: Duration,
    },
    Fixture {
        path: PathBuf,
    },
}

/// Resolved build configuration. Read-only once resolved.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub page_id: PageId,
    pub source: HubSource,
    pub gate: PreviewGate,
    pub query: QuerySpec,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub pipe: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration reading variables through `env`.
    ///
    /// Everything that can be wrong with the configuration fails here,
    /// before any request is made: credentials, preview secret, endpoint
    /// and the query's fit with the hub schema.
    pub fn resolve_with<F>(cli: CommandLineInput, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_id = PageId::new(cli.page)?;
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let source = match cli.fixture {
            Some(path) => HubSource::Fixture { path },
            None => {
                let token = env(ENV_HUB_TOKEN).ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set",
                        ENV_HUB_TOKEN
                    ))
                })?;
                let endpoint = cli
                    .endpoint
                    .or_else(|| env(ENV_HUB_ENDPOINT))
                    .unwrap_or_else(|| DEFAULT_HUB_ENDPOINT.to_string());
                if cli.timeout_secs == 0 {
                    return Err(AppError::MissingConfiguration(
                        "--timeout-secs must be at least 1".to_string(),
                    ));
                }
                HubSource::Live {
                    token: ApiToken::new(token)?,
                    endpoint: ValidatedUrl::parse(&endpoint)?,
                    timeout: Duration::from_secs(cli.timeout_secs),
                }
            }
        };

        let configured_secret = env(ENV_PREVIEW_SECRET)
            .map(PreviewSecret::new)
            .transpose()?;
        let gate = PreviewGate::enter(cli.preview_secret.as_deref(), configured_secret.as_ref())?;

        let query = homepage_query();
        query.validate(&HubSchema::marketing_site())?;

        Ok(PipelineConfig {
            page_id,
            source,
            gate,
            query,
            format: cli.format,
            output_file: cli.output.map(PathBuf::from),
            pipe: cli.pipe,
            verbose: cli.verbose,
        })
    }

    /// File the artifact is written to when not piping.
    pub fn output_path(&self) -> PathBuf {
        self.output_file.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}.page.{}",
                self.page_id.as_str().replace('/', "_"),
                self.format.extension()
            ))
        })
    }
}
