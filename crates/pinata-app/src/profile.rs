use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pinata_config::Config;
use serde::{Deserialize, Serialize};

const MAIN_PROFILE: &str = "main";

fn pinata_root() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("No config directory on this platform")?;
    Ok(dir.join("pinata"))
}

fn profiles_dir() -> anyhow::Result<PathBuf> {
    Ok(pinata_root()?.join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config() -> anyhow::Result<()> {
    init_profiles_in(&profiles_dir()?)
}

/// Load a user profile by name, defaulting to main if name not found.
/// Environment variables override whatever the profile says.
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    let mut config = load_profile_from(&profiles_dir()?, name)?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

fn init_profiles_in(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let main_profile = profile_path(dir, MAIN_PROFILE);
    if !main_profile.exists() {
        // Defaults only; keys stay in the environment
        let profile = Profile {
            name: MAIN_PROFILE.into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn load_profile_from(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(dir, name);
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = profile_path(dir, MAIN_PROFILE);
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}

fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}

#[cfg(test)]
mod tests {
    use pinata_core::TargetLanguage;

    use super::*;

    #[test]
    fn test_init_writes_main_once() {
        let dir = tempfile::tempdir().unwrap();
        init_profiles_in(dir.path()).unwrap();

        let main = profile_path(dir.path(), "main");
        assert!(main.exists());

        fs::write(&main, r#"{"name": "main", "value": {"language": "korean"}}"#).unwrap();
        init_profiles_in(dir.path()).unwrap();
        assert_eq!(
            load_profile_from(dir.path(), "main").unwrap().language,
            TargetLanguage::Korean
        );
    }

    #[test]
    fn test_missing_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            profile_path(dir.path(), "main"),
            r#"{"name": "main", "value": {"quota": {"daily_limit": 9}}}"#,
        )
        .unwrap();

        let config = load_profile_from(dir.path(), "travel").unwrap();
        assert_eq!(config.quota.daily_limit, 9);
    }

    #[test]
    fn test_named_profile_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_profile_from(dir.path(), "main").unwrap().language,
            TargetLanguage::Spanish
        );

        fs::write(
            profile_path(dir.path(), "travel"),
            r#"{"name": "travel", "value": {"language": "hindi"}}"#,
        )
        .unwrap();
        assert_eq!(
            load_profile_from(dir.path(), "travel").unwrap().language,
            TargetLanguage::Hindi
        );
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(profile_path(dir.path(), "main"), "{not json").unwrap();
        assert!(load_profile_from(dir.path(), "main").is_err());
    }
}
