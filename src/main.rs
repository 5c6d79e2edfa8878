// src/main.rs

use clap::Parser;
use hub2page::{
    build_page, deliver, document, AppError, CommandLineInput, ContentFetchError,
    ContentFetcher, ContentHub, ContentSnapshot, ContentSource, DeliveryTarget, FetchFailure,
    FixtureHub, HubHttpClient, HubSource, OutputFormat, OutputPlan, OutputReport, PageArtifact,
    PageComposer, PageDelivery, PipelineConfig, PreviewGate, QuerySpec, SectionSlot,
    ENV_HUB_TOKEN,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console logs go to stderr so `--pipe` output stays clean.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("hub2page.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Orchestrates fetching, composing and delivering one page.
struct HubToPage<'a> {
    config: &'a PipelineConfig,
}

impl<'a> HubToPage<'a> {
    fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Arc<dyn ContentHub>, AppError> {
        match &self.config.source {
            HubSource::Live {
                token,
                endpoint,
                timeout,
            } => {
                log::info!("Using content hub at {} (token {})", endpoint, token);
                Ok(Arc::new(HubHttpClient::new(token, endpoint.clone(), *timeout)?))
            }
            HubSource::Fixture { path } => Ok(Arc::new(FixtureHub::load(path).await?)),
        }
    }

    fn render(&self, artifact: &PageArtifact) -> Result<String, AppError> {
        match self.config.format {
            OutputFormat::Json => document::to_json(artifact),
            OutputFormat::Html => Ok(document::render_document(artifact)?.into_string()),
        }
    }

    /// Reports completion to the user.
    fn report_completion(&self, artifact: &PageArtifact, report: &OutputReport) {
        if self.config.pipe {
            return;
        }

        let stories = artifact.props.success_stories.len();
        if artifact.props.page.is_none() {
            eprintln!("⚠️  Page record is absent; the document head will be empty.");
        }
        println!(
            "📄 Composed {} sections ({} success {}){}.",
            artifact.tree.sections.len(),
            stories,
            if stories == 1 { "story" } else { "stories" },
            if self.config.gate.is_preview() {
                " in preview mode"
            } else {
                ""
            }
        );
        if artifact.tree.section(SectionSlot::UseCaseExcerpts).is_none() {
            log::info!("No success stories published; use-case excerpts omitted");
        }

        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
                println!("✓ Page saved to {}", path.display());
            }
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for HubToPage<'_> {
    async fn fetch(
        &self,
        spec: &QuerySpec,
        gate: PreviewGate,
    ) -> Result<ContentSnapshot, AppError> {
        let fetcher = ContentFetcher::new(self.connect().await?);
        fetcher.fetch(spec, gate).await
    }
}

impl PageComposer for HubToPage<'_> {
    fn compose(&self, snapshot: ContentSnapshot, gate: PreviewGate) -> PageArtifact {
        document::assemble(self.config.page_id.clone(), snapshot, gate)
    }
}

impl PageDelivery for HubToPage<'_> {
    fn deliver(&self, artifact: &PageArtifact) -> Result<OutputReport, AppError> {
        let content = self.render(artifact)?;
        let target = if self.config.pipe {
            DeliveryTarget::PrintToStdout { content }
        } else {
            DeliveryTarget::WriteFile {
                path: self.config.output_path(),
                content,
            }
        };

        let report = deliver(OutputPlan::new().with_operation(target))?;
        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }
        Ok(report)
    }
}

/// Prints a follow-up hint for failures the user can act on.
fn print_hint(error: &AppError) {
    let AppError::ContentFetch(ContentFetchError { failure, .. }) = error else {
        return;
    };
    match failure {
        FetchFailure::Service { code, .. } if code.is_auth() => {
            eprintln!("hint: check that {} holds a valid read-only token", ENV_HUB_TOKEN);
        }
        FetchFailure::Service { code, .. } if code.is_retryable() => {
            eprintln!("hint: the hub reported a transient failure ({}); rerunning the build may succeed", code);
        }
        failure if failure.is_timeout() => {
            eprintln!("hint: the hub did not answer in time; raise --timeout-secs or try again");
        }
        _ => {}
    }
}

/// Executes the fetch → compose → deliver pipeline for the configured page.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let pipeline = HubToPage::new(config);
    let (artifact, report) = build_page(&pipeline, &config.query, config.gate).await?;
    pipeline.report_completion(&artifact, &report);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();
    let page = cli.page.clone();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("error: could not initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match PipelineConfig::resolve(cli) {
        Ok(config) => execute_pipeline(&config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Build of page '{}' failed: {:?}", page, e);
            eprintln!("error: page '{}': {}", page, e);
            print_hint(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
