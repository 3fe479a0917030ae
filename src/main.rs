mod cli;
mod logging;

use photoforged::{
    config,
    images::{ImageService, LocalImageStore},
    server,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pf_pipeline::{ActionDescriptor, PipelineExecutor, ProcessRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config first: the logging format depends on it
    let mut config = match &cli.command {
        // `validate` reports problems itself
        Commands::Validate { .. } | Commands::Version => config::Config::default(),
        _ => config::load_config_or_default(cli.config.as_deref())?,
    };

    logging::init(config.logging.env, cli.verbose);
    for warning in config::config_warnings(&config) {
        tracing::warn!("{warning}");
    }

    match cli.command {
        Commands::Start { host, port } => {
            // Override host/port from CLI if specified
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Starting photoforged server");
            tracing::info!(
                "Server will listen on {}:{}",
                config.server.host,
                config.server.port
            );

            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(config))
        }
        Commands::Process {
            image,
            actions,
            storage,
            dry_run,
        } => process_file(&config, &image, &actions, storage, dry_run),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("photoforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn process_file(
    config: &config::Config,
    image: &Path,
    actions: &str,
    storage: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let actions = read_actions(actions)?;

    if dry_run {
        let plan = PipelineExecutor::new().plan(&actions)?;
        println!("[DRY RUN] {} actions would be applied:", plan.len());
        for (i, action) in plan.iter().enumerate() {
            println!("  {}. {:?}", i + 1, action);
        }
        return Ok(());
    }

    // Without --storage the image's own directory acts as the store
    let (dir, name) = match storage {
        Some(dir) => (dir, image.to_string_lossy().into_owned()),
        None => {
            let name = image
                .file_name()
                .with_context(|| format!("Not a file: {:?}", image))?
                .to_string_lossy()
                .into_owned();
            let dir = image
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, name)
        }
    };

    let store = LocalImageStore::new(&dir)
        .with_context(|| format!("Cannot open image directory {:?}", dir))?
        .with_jpeg_quality(config.storage.jpeg_quality);
    let base_dir = store.base_dir().to_path_buf();
    let service = ImageService::new(Arc::new(store), &config.storage);

    tracing::info!("Processing image: {:?}", base_dir.join(&name));

    let request = ProcessRequest::new(name, actions);
    let saved = service.process(&request)?;

    println!("Processing complete!");
    println!("Output: {}", base_dir.join(&saved.name).display());
    Ok(())
}

/// Parse `--actions`: inline JSON, or `@path` to read it from a file.
fn read_actions(arg: &str) -> Result<Vec<ActionDescriptor>> {
    let json = match arg.strip_prefix('@') {
        Some(path) => {
            let path = shellexpand::tilde(path);
            std::fs::read_to_string(path.as_ref())
                .with_context(|| format!("Failed to read actions file: {}", path))?
        }
        None => arg.to_string(),
    };
    serde_json::from_str(&json).context("Actions must be a JSON array of {action, params}")
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            for warning in config::config_warnings(&config) {
                println!("  warning: {warning}");
            }
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Request timeout: {}s", config.server.request_timeout_secs);
            println!("  Upload limit: {} bytes", config.server.max_upload_bytes);
            println!("  Storage: {:?}", config.storage.path);
            println!("  JPEG quality: {}", config.storage.jpeg_quality);
            println!("  Logging: {:?}", config.logging.env);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Storage: {:?}", config.storage.path);
        }
    }

    Ok(())
}
