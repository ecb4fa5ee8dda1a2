use crate::error::{Result, ScoreError};
use crate::types::config::ScoreConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "reposcore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".reposcore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/reposcore/config.toml";

/// Where a configuration file sits in the precedence order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Global,
    Repository,
    Local,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Repository => "repository",
            Self::Local => "local",
        })
    }
}

/// Loads global, repository and local configuration, later layers winning.
/// Missing files are skipped; with no files at all the defaults apply.
pub fn load_config(root: &Path) -> Result<ScoreConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<ScoreConfig> {
    let mut merged = Table::new();
    for (layer, path) in layers(root, global_path) {
        if let Some(table) = read_layer(layer, &path)? {
            overlay(&mut merged, table);
        }
    }

    let cfg: ScoreConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn layers(root: &Path, global_path: Option<&Path>) -> Vec<(Layer, PathBuf)> {
    let mut layers = Vec::with_capacity(3);
    if let Some(path) = global_path {
        layers.push((Layer::Global, path.to_path_buf()));
    }
    layers.push((Layer::Repository, root.join(DEFAULT_CONFIG_FILE)));
    layers.push((Layer::Local, root.join(DEFAULT_LOCAL_FILE)));
    layers
}

fn read_layer(layer: Layer, path: &Path) -> Result<Option<Table>> {
    if !path.is_file() {
        return Ok(None);
    }
    tracing::debug!(%layer, path = %path.display(), "reading config layer");
    let content = std::fs::read_to_string(path)?;
    content.parse::<Table>().map(Some).map_err(|e| {
        ScoreError::ConfigParse(format!("{layer} config {}: {e}", path.display()))
    })
}

/// Nested tables merge key by key; any other value from `top` replaces the
/// one underneath, arrays included.
fn overlay(base: &mut Table, top: Table) {
    for (key, value) in top {
        match value {
            Value::Table(above) => match base.get_mut(&key) {
                Some(Value::Table(below)) => overlay(below, above),
                _ => {
                    base.insert(key, Value::Table(above));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
