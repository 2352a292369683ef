use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use blockfall_engine::EngineConfig;
use tracing_subscriber::EnvFilter;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads and validates the engine configuration.
///
/// Without a path the built-in defaults are used.
pub fn load_engine_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config: EngineConfig = read_json_file("engine configuration", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid engine configuration: {}", path.display()))?;
    Ok(config)
}

/// Sends `tracing` output to a file.
///
/// The terminal belongs to the game, so nothing is logged unless a file is
/// given. The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("blockfall-{}-{name}.json", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_engine_config(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let path = write_temp("partial", r#"{ "lines_per_level": 4, "cell_size": 1 }"#);
        let config = load_engine_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.lines_per_level, 4);
        assert_eq!(config.cell_size, 1);
        assert_eq!(config.initial_gravity_ms, 1000);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = write_temp("invalid", r#"{ "gravity_table_ms": [] }"#);
        let err = load_engine_config(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Invalid engine configuration"));
        assert_eq!(err.root_cause().to_string(), "gravity table must not be empty");
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let path = write_temp("malformed", r#"{ "lines_per_level": "ten" }"#);
        let err = load_engine_config(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Failed to parse engine configuration"));
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("blockfall-does-not-exist.json");
        let err = load_engine_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open engine configuration"));
    }
}
