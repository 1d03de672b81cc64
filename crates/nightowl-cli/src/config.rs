use std::path::{Path, PathBuf};

use nightowl_core::models::language::Language;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const STORE_ENV: &str = "NIGHTOWL_STORE";
pub const TRANSLATIONS_ENV: &str = "NIGHTOWL_TRANSLATIONS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightowlConfig {
    /// Schema version. A hand-written file without one is read as current.
    #[serde(default = "current_version")]
    pub config_version: u32,
    /// CSV file every completed session is appended to.
    pub store_path: PathBuf,
    /// Translations file to load option catalogs from. The catalog shipped
    /// with the instrument is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations_path: Option<PathBuf>,
    /// Language used when a command is not given `--lang`.
    #[serde(default)]
    pub default_language: Language,
    pub created_at: jiff::Timestamp,
}

impl NightowlConfig {
    /// Defaults used before `config init` has been run.
    pub fn defaults() -> eyre::Result<Self> {
        Ok(Self {
            config_version: CURRENT_VERSION,
            store_path: config_dir()?.join("responses.csv"),
            translations_path: None,
            default_language: Language::DEFAULT,
            created_at: jiff::Timestamp::now(),
        })
    }

    /// Let `NIGHTOWL_STORE` and `NIGHTOWL_TRANSLATIONS` override the file.
    pub fn apply_env(mut self) -> Self {
        if let Ok(store) = std::env::var(STORE_ENV) {
            self.store_path = PathBuf::from(store);
        }
        if let Ok(translations) = std::env::var(TRANSLATIONS_ENV) {
            self.translations_path = Some(PathBuf::from(translations));
        }
        self
    }
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("nightowl"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, falling back to defaults when the file does
/// not exist yet.
pub fn load_config(path: &Path) -> eyre::Result<NightowlConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return NightowlConfig::defaults();
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> eyre::Result<NightowlConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version") {
        None => CURRENT_VERSION,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| eyre::eyre!("config_version {v} is not a valid version"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: NightowlConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value. Version 1 is
/// the first config shape, so the chain is empty for now.
fn migrate(json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update nightowl."
        ));
    }
    if from_version == 0 {
        return Err(eyre::eyre!("config_version 0 was never a nightowl config version"));
    }
    Ok(json)
}

pub fn save_config(config: &NightowlConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_config_is_read_as_current() {
        let config = parse_config(
            r#"{"store_path": "/tmp/sheet.csv", "created_at": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(config.config_version, CURRENT_VERSION);
        assert_eq!(config.store_path, PathBuf::from("/tmp/sheet.csv"));
        assert_eq!(config.default_language, Language::En);
        assert!(config.translations_path.is_none());
    }

    #[test]
    fn current_config_is_read_as_is() {
        let config = parse_config(
            r#"{"config_version": 1, "store_path": "out.csv", "default_language": "mr",
                "translations_path": "t.json", "created_at": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(config.default_language, Language::Mr);
        assert_eq!(config.translations_path, Some(PathBuf::from("t.json")));
    }

    #[test]
    fn newer_config_is_rejected() {
        let err = parse_config(r#"{"config_version": 7, "store_path": "x.csv"}"#).unwrap_err();
        assert!(err.to_string().contains("newer than this build"));
    }

    #[test]
    fn version_beyond_u32_is_rejected_not_wrapped() {
        // 2^32 + 1 would truncate to 1.
        let err = parse_config(
            r#"{"config_version": 4294967297, "store_path": "x.csv",
                "created_at": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a valid version"));

        let err = parse_config(r#"{"config_version": "1", "store_path": "x.csv"}"#).unwrap_err();
        assert!(err.to_string().contains("not a valid version"));
    }

    #[test]
    fn version_zero_is_rejected() {
        let err = parse_config(
            r#"{"config_version": 0, "store_path": "x.csv", "created_at": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("never a nightowl config version"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = NightowlConfig {
            config_version: 0,
            store_path: dir.path().join("responses.csv"),
            translations_path: None,
            default_language: Language::Hi,
            created_at: jiff::Timestamp::UNIX_EPOCH,
        };

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.config_version, 1);
        assert_eq!(loaded.default_language, Language::Hi);
        assert_eq!(loaded.store_path, config.store_path);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
