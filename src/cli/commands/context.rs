use std::env;

use anyhow::{Context as _, Result};

use super::super::args::{CommonArgs, SelectArgs};
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config, load_config_file},
    files::{Selection, select},
    fs::FileSystem,
};

/// Configuration with command-line overrides applied.
pub struct SelectContext {
    pub config: Config,
    pub files: Vec<String>,
    pub verbose: bool,
}

impl SelectContext {
    pub fn new(args: &SelectArgs) -> Result<Self> {
        let config = resolve_config(&args.common)?;
        Ok(Self {
            config,
            files: args.files.clone(),
            verbose: args.common.verbose,
        })
    }

    pub fn select(&self, fs: &dyn FileSystem) -> Result<Selection> {
        select(fs, &self.config, &self.files).context("Failed to select files")
    }
}

fn resolve_config(args: &CommonArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => {
            let current_dir = env::current_dir().context("Failed to read current directory")?;
            let result = load_config(&current_dir)?;
            if args.verbose && result.path.is_none() {
                eprintln!(
                    "Note: No {} found, using default configuration",
                    CONFIG_FILE_NAME
                );
            }
            result.config
        }
    };

    if let Some(base_path) = &args.base_path {
        config.base_path = base_path.clone();
    }

    Ok(config)
}
