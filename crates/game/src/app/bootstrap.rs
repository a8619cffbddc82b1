use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use scroller_engine::{ConfigPreset, LoopConfig, WorldConfig, ALL_PRESETS};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) const PRESET_ENV_VAR: &str = "SCROLLER_PRESET";
pub(crate) const CONFIG_ENV_VAR: &str = "SCROLLER_CONFIG";

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) world_config: WorldConfig,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Side Scroller Startup ===");

    let preset_name = read_env_var(PRESET_ENV_VAR)?;
    let config_path = read_env_var(CONFIG_ENV_VAR)?.map(PathBuf::from);
    let preset = resolve_preset(preset_name.as_deref())?;
    let world_config = resolve_world_config(preset, config_path.as_deref())?;
    let config_file = config_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    info!(
        preset = preset.name(),
        config_file = config_file.as_str(),
        time_step = ?world_config.time_step,
        "config_resolved"
    );

    let loop_config = LoopConfig {
        window_title: format!("Side Scroller [{}]", preset.name()),
        ..LoopConfig::default()
    };
    Ok(AppWiring {
        loop_config,
        world_config,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Unset and blank both read as `None`.
fn read_env_var(var: &'static str) -> Result<Option<String>, String> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(format!("read {var}: {error}")),
    }
}

pub(crate) fn resolve_preset(name: Option<&str>) -> Result<ConfigPreset, String> {
    let Some(name) = name else {
        return Ok(ConfigPreset::Stable);
    };
    ConfigPreset::from_name(name).ok_or_else(|| {
        let known = ALL_PRESETS
            .iter()
            .map(|preset| preset.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown preset '{}' in {PRESET_ENV_VAR}; expected one of {known}", name.trim())
    })
}

/// Starts from the preset and, when a file is given, overrides its top-level
/// fields with the file's. The result is validated either way.
pub(crate) fn resolve_world_config(
    preset: ConfigPreset,
    config_path: Option<&Path>,
) -> Result<WorldConfig, String> {
    let base = preset.world_config();
    let config = match config_path {
        Some(path) => load_world_config_file(path, &base)?,
        None => base,
    };
    config
        .validate()
        .map_err(|error| format!("invalid world config: {error}"))?;
    Ok(config)
}

fn load_world_config_file(path: &Path, base: &WorldConfig) -> Result<WorldConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read config '{}': {error}", path.display()))?;
    parse_world_config_json(&raw, base)
        .map_err(|error| format!("config '{}': {error}", path.display()))
}

fn parse_world_config_json(raw: &str, base: &WorldConfig) -> Result<WorldConfig, String> {
    let overrides: Value =
        serde_json::from_str(raw).map_err(|error| format!("parse config json: {error}"))?;
    let Value::Object(overrides) = overrides else {
        return Err("parse config json: top level must be an object".to_string());
    };
    let mut merged = match serde_json::to_value(base) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Err("preset did not serialize to an object".to_string()),
        Err(error) => return Err(format!("serialize preset: {error}")),
    };
    merged.extend(overrides);

    match serde_path_to_error::deserialize::<_, WorldConfig>(Value::Object(merged)) {
        Ok(config) => Ok(config),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse config json: {source}"))
            } else {
                Err(format!("parse config json at {path}: {source}"))
            }
        }
    }
}
