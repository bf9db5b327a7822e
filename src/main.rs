// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitelingo::app_config::{self, Config};
use sitelingo::session::SwitchOutcome;
use sitelingo::storage::{FileStore, KeyValueStore, LANGUAGE_SLOT};
use sitelingo::{StaticPage, TranslationCache, TranslationSession};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a page file into a supported language
    Translate(TranslateArgs),

    /// List the supported languages
    Languages,

    /// Inspect or clear the translation cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Generate shell completions for sitelingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Show the number of cached translations
    Stats,
    /// Remove every cached translation
    Clear,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Page JSON file to translate
    #[arg(value_name = "PAGE")]
    page_path: PathBuf,

    /// Target language code; without it the stored preference or system locale is used
    #[arg(short, long)]
    lang: Option<String>,

    /// Output file (defaults to <page>.<lang>.json next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,
}

/// sitelingo - live page translation
///
/// Translates the text of a static page through the Google translation API,
/// caching every translation and remembering the last language chosen.
#[derive(Parser, Debug)]
#[command(name = "sitelingo")]
#[command(version)]
#[command(about = "Translate static page text on demand")]
#[command(long_about = "sitelingo translates the translatable elements of a page file through an external translation API.

EXAMPLES:
    sitelingo translate page.json -l en        # Translate into English
    sitelingo translate page.json              # Use the stored preference or system locale
    sitelingo translate page.json -l ko        # Restore the source text
    sitelingo languages                        # List supported languages
    sitelingo cache stats                      # Show cache size
    sitelingo completions bash > sitelingo.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The API key can also be supplied through the
    SITELINGO_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation API key
    #[arg(long, global = true, env = "SITELINGO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every level here; the effective level is applied through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sitelingo", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Translate(args) => run_translate(config, args).await,
        Commands::Languages => list_languages(&config),
        Commands::Cache { action } => run_cache(&config, action),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the configuration, apply CLI overrides and validate it
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if !Path::new(&cli.config_path).exists() {
        warn!("Config file not found at '{}', creating default config.", cli.config_path);
    }
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(api_key) = &cli.api_key {
        config.translation.api_key = api_key.clone();
    }

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    if !config.translation.has_credential() {
        warn!("No translation API key configured; pages will keep their source text");
    }

    Ok(config)
}

fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let dir = config.resolve_storage_dir()?;
    let store = FileStore::open(&dir)
        .with_context(|| format!("Failed to open storage directory: {}", dir.display()))?;
    Ok(Arc::new(store))
}

/// First non-empty locale from the usual environment variables
fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

async fn run_translate(config: Config, args: TranslateArgs) -> Result<()> {
    let page = StaticPage::load(&args.page_path)?;
    let store = open_store(&config)?;
    let session = TranslationSession::with_google(config, page, store)
        .with_context(|| format!("Cannot translate {}", args.page_path.display()))?;

    let outcome = match &args.lang {
        Some(lang) => session.switch_language(lang).await
            .with_context(|| format!("Failed to switch page to '{}'", lang))?,
        None => session.start(system_locale().as_deref()).await
            .context("Failed to apply the initial page language")?,
    };

    match &outcome {
        SwitchOutcome::Completed(report) if report.restored => {
            info!("Restored {} of {} elements to {}",
                  report.restored_elements, report.elements, report.to_language);
        }
        SwitchOutcome::Completed(report) => {
            info!("Translated {} elements to {} in {} batches ({} requests, {} cached, {} kept source text)",
                  report.elements, report.to_language, report.batches,
                  report.stats.translated, report.stats.cache_hits, report.stats.fallbacks);
        }
        SwitchOutcome::Ignored { requested, .. } => {
            info!("Page already in {}", requested);
        }
    }

    let page = session.into_document();
    let output = args.output.clone()
        .unwrap_or_else(|| output_path(&args.page_path, &page.lang));

    if output.exists() && !args.force_overwrite {
        warn!("Output file already exists: {:?}. Use -f to force overwrite.", output);
        return Ok(());
    }

    page.save(&output)?;
    info!("Success: {:?}", output);

    Ok(())
}

// @generates: <stem>.<lang>.json next to the input
fn output_path(page_path: &Path, lang: &str) -> PathBuf {
    let stem = page_path.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{}.{}.json", stem, lang);
    page_path.with_file_name(file_name)
}

fn list_languages(config: &Config) -> Result<()> {
    let preferred = open_store(config)?.get(LANGUAGE_SLOT).unwrap_or_else(|e| {
        warn!("Failed to read language preference: {}", e);
        None
    });

    for (code, name) in &config.supported_languages {
        let mut markers = Vec::new();
        if *code == config.default_language {
            markers.push("source");
        }
        if preferred.as_deref() == Some(code.as_str()) {
            markers.push("preferred");
        }

        if markers.is_empty() {
            println!("{:<4} {}", code, name);
        } else {
            println!("{:<4} {} ({})", code, name, markers.join(", "));
        }
    }

    Ok(())
}

fn run_cache(config: &Config, action: CacheAction) -> Result<()> {
    let cache = TranslationCache::load(open_store(config)?, config.cache_expiry_ms);

    match action {
        CacheAction::Stats => {
            println!("Cached translations: {}", cache.len());
            match cache.ttl_ms() {
                Some(ttl) => println!("Entry lifetime: {} minutes", ttl / 60_000),
                None => println!("Entry lifetime: unlimited"),
            }
        }
        CacheAction::Clear => {
            let count = cache.len();
            cache.clear().context("Failed to clear the translation cache")?;
            info!("Removed {} cached translations", count);
        }
    }

    Ok(())
}
