use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Preferences that survive restarts. Animation state (particle
/// positions, timers) is deliberately not part of this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    pub dark_mode: bool,
    pub fps: u8,
    pub no_flash: bool,
    pub last_icon: String,
}

impl RuntimeSettings {
    #[must_use]
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        Self {
            dark_mode: cli.dark,
            fps: cli.fps,
            no_flash: cli.no_flash,
            last_icon: cli.default_icon(),
        }
    }
}

pub fn load_runtime_settings(cli: &Cli) -> (RuntimeSettings, Option<PathBuf>) {
    let mut settings = RuntimeSettings::from_cli_defaults(cli);
    if cli.no_settings {
        return (settings, None);
    }

    let Some(path) = settings_path() else {
        return (settings, None);
    };

    if let Some(saved) = read_settings_file(&path) {
        settings = saved;
        apply_cli_overrides(&mut settings, cli);
    }

    (settings, Some(path))
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn read_settings_file(path: &Path) -> Option<RuntimeSettings> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Explicit CLI flags beat whatever was saved.
fn apply_cli_overrides(settings: &mut RuntimeSettings, cli: &Cli) {
    if cli.dark {
        settings.dark_mode = true;
    }
    if cli.fps != 30 {
        settings.fps = cli.fps;
    }
    if cli.no_flash {
        settings.no_flash = true;
    }
    if let Some(icon) = &cli.icon {
        settings.last_icon = icon.clone();
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("SKYWASH_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("skywash")
            .join("settings.json"),
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["skywash"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn settings_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");
        let settings = RuntimeSettings {
            dark_mode: true,
            fps: 45,
            no_flash: true,
            last_icon: "11n".to_string(),
        };

        save_runtime_settings(&path, &settings).expect("save");
        assert_eq!(read_settings_file(&path), Some(settings));
    }

    #[test]
    fn unreadable_file_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        assert_eq!(read_settings_file(&path), None);

        fs::write(&path, "not json").expect("write");
        assert_eq!(read_settings_file(&path), None);
    }

    #[test]
    fn cli_overrides_beat_saved_settings() {
        let mut settings = RuntimeSettings {
            dark_mode: false,
            fps: 24,
            no_flash: false,
            last_icon: "01d".to_string(),
        };
        apply_cli_overrides(&mut settings, &cli(&["13n", "--dark", "--fps", "60"]));

        assert!(settings.dark_mode);
        assert_eq!(settings.fps, 60);
        assert!(!settings.no_flash);
        assert_eq!(settings.last_icon, "13n");
    }

    #[test]
    fn default_cli_leaves_saved_settings_alone() {
        let mut settings = RuntimeSettings {
            dark_mode: true,
            fps: 24,
            no_flash: true,
            last_icon: "50d".to_string(),
        };
        let before = settings.clone();
        apply_cli_overrides(&mut settings, &cli(&[]));
        assert_eq!(settings, before);
    }

    #[test]
    fn defaults_come_from_cli() {
        let settings = RuntimeSettings::from_cli_defaults(&cli(&[]));
        assert!(!settings.dark_mode);
        assert_eq!(settings.fps, 30);
        assert!(!settings.no_flash);
        assert_eq!(settings.last_icon, "01d");
    }
}
