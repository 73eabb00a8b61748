//! CLI helpers for the config file

use std::path::{Path, PathBuf};

use crate::config::InkTagConfig;

/// Load `path` if given, otherwise start from defaults
pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<InkTagConfig> {
    match path {
        Some(path) => Ok(InkTagConfig::load(path)?),
        None => Ok(InkTagConfig::default()),
    }
}

/// Apply `--folder` and `--file-pattern` over loaded settings
pub fn apply_scan_overrides(
    config: &mut InkTagConfig,
    folder: Option<&Path>,
    file_pattern: Option<&str>,
) {
    if let Some(folder) = folder {
        config.localizer.root_folder = folder.to_path_buf();
    }
    if let Some(pattern) = file_pattern {
        config.localizer.file_pattern = pattern.to_string();
    }
}

/// Write a default config file
pub fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut config = InkTagConfig::default();
    config.outputs.csv = Some(PathBuf::from("strings.csv"));
    config.save(path)?;

    println!("Config written: {}", path.display());
    Ok(())
}
