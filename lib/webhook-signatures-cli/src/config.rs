use miette::{Context, IntoDiagnostic};
use std::{fs, path::Path};
use webhook_signatures::{Configuration, Mode};

pub fn load(path: &Path, mode: Option<Mode>) -> miette::Result<Configuration> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read configuration from {}", path.display()))?;

    let mut config = Configuration::from_toml_str(&content)?;
    if let Some(mode) = mode {
        config.mode = mode;
    }

    tracing::debug!(?config, "loaded configuration");

    Ok(config)
}
