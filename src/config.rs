use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use briefing_client::ClientConfig;

/// Resolve the client configuration.
///
/// Layers, lowest first: built-in defaults, the JSON config file, then the
/// base URL override from the command line or environment. A missing file is
/// only an error when it was named explicitly.
pub fn load_client_config(
  explicit: Option<&Path>,
  data_dir: &Path,
  base_url: Option<String>,
) -> Result<ClientConfig> {
  let path = explicit
    .map(Path::to_path_buf)
    .unwrap_or_else(|| default_config_path(data_dir));

  let mut config = if path.exists() {
    let content = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse config file: {}", path.display()))?
  } else if explicit.is_some() {
    anyhow::bail!("config file not found: {}", path.display());
  } else {
    ClientConfig::default()
  };

  if let Some(base_url) = base_url {
    config.base_url = base_url;
  }

  Ok(config)
}

pub fn default_config_path(data_dir: &Path) -> PathBuf {
  data_dir.join("config.json")
}
