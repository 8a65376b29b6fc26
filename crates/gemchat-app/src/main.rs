mod cli;
mod repl;

use std::path::Path;

use gemchat_ai::{ChatSession, ImageBlob};
use gemchat_common::{ConfigError, GemchatError};
use gemchat_config::GemchatConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Current directory
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/gemchat-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// Config for this run. A file named on the command line must load and
/// validate; a broken default file falls back to built-in defaults and the
/// error is handed back for logging.
fn resolve_config(
    path: Option<&str>,
) -> Result<(GemchatConfig, Option<ConfigError>), ConfigError> {
    match path {
        Some(path) => {
            let config = gemchat_config::toml_loader::load_from_path(Path::new(path))?;
            gemchat_config::validation::validate(&config)?;
            Ok((config, None))
        }
        None => Ok(match gemchat_config::load_config() {
            Ok(config) => (config, None),
            Err(e) => (GemchatConfig::default(), Some(e)),
        }),
    }
}

fn init_logging(cli_level: Option<&str>, config: &GemchatConfig) {
    let fallback = format!("gemchat={}", config.logging.level.as_directive());
    let directive = cli_level.map(str::to_string).unwrap_or(fallback);
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| "gemchat=info".parse::<Directive>());

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(args: cli::Args, config: GemchatConfig) -> Result<(), GemchatError> {
    let api_key = args
        .api_key
        .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
        .ok_or_else(|| GemchatError::Other(format!("{API_KEY_ENV_VAR} is not set")))?;

    let mut session =
        ChatSession::from_config(&config, api_key).map_err(|e| GemchatError::Ai(e.to_string()))?;

    match args.image {
        Some(path) => {
            let image = ImageBlob::from_path(&path).await?;
            tracing::info!("Loaded image {path} ({}, {} bytes)", image.mime_type, image.len());
            session.set_image(Some(image));
            println!("{}", session.describe_image(args.prompt.as_deref()).await);
        }
        None => repl::run(&mut session).await?,
    }

    let usage = session.usage();
    tracing::info!(
        calls = usage.call_count(),
        tokens = usage.total_tokens(),
        "session finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    load_dotenv();

    let args = cli::parse();

    let (config, load_error) = match resolve_config(args.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("gemchat: cannot use config file: {e}");
            std::process::exit(1);
        }
    };
    init_logging(args.log_level.as_deref(), &config);

    tracing::info!("gemchat v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        eprintln!("gemchat: {e}");
        std::process::exit(1);
    }
}
