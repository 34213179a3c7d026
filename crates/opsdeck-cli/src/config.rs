// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";

pub const CONFIG_PATH_ENV: &str = "OPSDECK_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub feed: Feed,
    #[serde(default)]
    pub dispatch: Dispatch,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            feed: Feed::default(),
            dispatch: Dispatch::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dispatch {
    pub default_team: Option<String>,
}

impl Default for Dispatch {
    fn default() -> Self {
        Self {
            default_team: Some(opsdeck_app::DEFAULT_TEAM.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(opsdeck_feed::APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [feed], [dispatch], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(snapshot_path) = &self.feed.snapshot_path {
            opsdeck_feed::validate_snapshot_path(snapshot_path)
                .with_context(|| format!("invalid feed.snapshot_path in {}", path.display()))?;
        }

        if let Some(team) = &self.dispatch.default_team
            && team.trim().is_empty()
        {
            bail!(
                "dispatch.default_team in {} must not be empty",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).map_err(|error| {
                anyhow!(
                    "log.level {level:?} in {} is not a valid filter directive: {error}",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn snapshot_path(&self) -> Result<PathBuf> {
        match &self.feed.snapshot_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => opsdeck_feed::default_snapshot_path(),
        }
    }

    pub fn default_team(&self) -> &str {
        self.dispatch
            .default_team
            .as_deref()
            .map(str::trim)
            .unwrap_or(opsdeck_app::DEFAULT_TEAM)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# opsdeck config\n# Place this file at: {}\n\nversion = 1\n\n[feed]\n# Optional. Default is the platform data dir (for example ~/.local/share/opsdeck/snapshot.json)\n# snapshot_path = \"/absolute/path/to/snapshot.json\"\n\n[dispatch]\n# Target for actions on records without an assignee\ndefault_team = \"{}\"\n\n[log]\n# tracing filter directive; OPSDECK_LOG and RUST_LOG take precedence\nlevel = \"{}\"\n",
            path.display(),
            opsdeck_app::DEFAULT_TEAM,
            DEFAULT_LOG_LEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.default_team(), "operations");
        assert_eq!(config.log_level(), "warn");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[dispatch]\ndefault_team = \"night shift\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[feed], [dispatch], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[feed]\nsnapshot_path = \"/srv/opsdeck/snapshot.json\"\n[dispatch]\ndefault_team = \" night shift \"\n[log]\nlevel = \"opsdeck_app=debug,warn\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(
            config.snapshot_path()?,
            PathBuf::from("/srv/opsdeck/snapshot.json")
        );
        assert_eq!(config.default_team(), "night shift");
        assert_eq!(config.log_level(), "opsdeck_app=debug,warn");
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn blank_default_team_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[dispatch]\ndefault_team = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank team should fail");
        assert!(error.to_string().contains("must not be empty"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"opsdeck=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad directive should fail");
        assert!(error.to_string().contains("not a valid filter directive"));
        Ok(())
    }

    #[test]
    fn snapshot_path_rejects_uri_style_value() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[feed]\nsnapshot_path = \"https://example.com/s.json\"\n")?;
        let error = Config::load(&path).expect_err("URI snapshot_path should fail validation");
        let message = format!("{error:#}");
        assert!(message.contains("looks like a URI"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn snapshot_path_uses_env_override_when_feed_path_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(opsdeck_feed::SNAPSHOT_PATH_ENV, "/from/env-only.json");
        }
        let config = Config::load(&path)?;
        let resolved = config.snapshot_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(opsdeck_feed::SNAPSHOT_PATH_ENV);
        }
        assert_eq!(resolved, PathBuf::from("/from/env-only.json"));
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let example = Config::example_config(&temp.path().join("config.toml"));
        assert!(example.contains("version = 1"));
        assert!(example.contains("[feed]"));
        assert!(example.contains("[dispatch]"));
        assert!(example.contains("[log]"));

        let (_temp, path) = write_config(&example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.default_team(), "operations");
        Ok(())
    }
}
