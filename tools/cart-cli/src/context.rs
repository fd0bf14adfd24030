//! CLI execution context.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cart_cache::FileStore;
use cart_commerce::analytics::{AnalyticsSink, JsonLinesSink, NoopSink};
use cart_commerce::{Capabilities, CartService};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;
use crate::terminal::{TerminalNavigator, TerminalRenderer};

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, Path::new(path));
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative paths in the config resolve against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd)
    }

    /// Directory holding the cart record.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(self.base_dir(), &self.config.storage.dir)
    }

    /// Open a cart session over the file store.
    pub fn open_service(&self) -> Result<CartService<FileStore>> {
        let dir = self.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        self.output.debug(&format!("Storage: {}", dir.display()));

        Ok(CartService::open(
            store,
            self.config.widget.clone(),
            Capabilities {
                sink: self.pixel_sink()?,
                renderer: Box::new(TerminalRenderer::new(self.output.clone())),
                navigator: Box::new(TerminalNavigator::new(self.output.clone())),
            },
        ))
    }

    fn pixel_sink(&self) -> Result<Box<dyn AnalyticsSink>> {
        let pixel = &self.config.pixel;
        if !pixel.enabled {
            return Ok(Box::new(NoopSink));
        }

        match pixel.log {
            Some(ref log) => {
                let path = resolve(self.base_dir(), log);
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("Failed to open pixel log: {}", path.display()))?;
                Ok(Box::new(JsonLinesSink::new(file)))
            }
            None => Ok(Box::new(JsonLinesSink::new(std::io::stderr()))),
        }
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
