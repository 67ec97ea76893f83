use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use counter_core::{FeedbackConfig, PlaybackOverlap};
use serde::Deserialize;
use shared::{domain::ClipId, state::SettingsState};
use tracing::warn;

const ENV_PREFIX: &str = "COUNTER__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub initial_settings: SettingsState,
    pub feedback: FeedbackConfig,
    pub media_permission: bool,
    pub playback_latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_settings: SettingsState::default(),
            feedback: FeedbackConfig::default(),
            media_permission: true,
            playback_latency: Duration::from_millis(120),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    vibration_enabled: Option<bool>,
    sound_enabled: Option<bool>,
    selected_clip: Option<String>,
    strong_pulse_ms: Option<u64>,
    playback_overlap: Option<String>,
    media_permission: Option<bool>,
    playback_latency_ms: Option<u64>,
}

/// Defaults, then `path` if it exists, then `COUNTER__*` environment variables.
/// An unreadable or malformed file is an error; a malformed environment value
/// is skipped with a warning.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file(&mut config, file_cfg);
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_file(config: &mut AppConfig, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.vibration_enabled {
        config.initial_settings.vibration_enabled = v;
    }
    if let Some(v) = file_cfg.sound_enabled {
        config.initial_settings.sound_enabled = v;
    }
    if let Some(v) = file_cfg.selected_clip {
        config.initial_settings.selected_clip = ClipId::new(v);
    }
    if let Some(v) = file_cfg.strong_pulse_ms {
        config.feedback.strong_pulse = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.playback_overlap {
        match v.parse() {
            Ok(policy) => config.feedback.overlap = policy,
            Err(err) => warn!("config: ignoring playback_overlap: {err}"),
        }
    }
    if let Some(v) = file_cfg.media_permission {
        config.media_permission = v;
    }
    if let Some(v) = file_cfg.playback_latency_ms {
        config.playback_latency = Duration::from_millis(v);
    }
}

fn apply_env(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("VIBRATION_ENABLED").and_then(|v| parse_env_bool("VIBRATION_ENABLED", &v)) {
        config.initial_settings.vibration_enabled = v;
    }
    if let Some(v) = var("SOUND_ENABLED").and_then(|v| parse_env_bool("SOUND_ENABLED", &v)) {
        config.initial_settings.sound_enabled = v;
    }
    if let Some(v) = var("SELECTED_CLIP") {
        config.initial_settings.selected_clip = ClipId::new(v);
    }
    if let Some(v) = var("STRONG_PULSE_MS").and_then(|v| parse_env_millis("STRONG_PULSE_MS", &v)) {
        config.feedback.strong_pulse = v;
    }
    if let Some(v) = var("PLAYBACK_OVERLAP") {
        match v.parse::<PlaybackOverlap>() {
            Ok(policy) => config.feedback.overlap = policy,
            Err(err) => warn!("config: ignoring {ENV_PREFIX}PLAYBACK_OVERLAP: {err}"),
        }
    }
    if let Some(v) = var("MEDIA_PERMISSION").and_then(|v| parse_env_bool("MEDIA_PERMISSION", &v)) {
        config.media_permission = v;
    }
    if let Some(v) = var("PLAYBACK_LATENCY_MS")
        .and_then(|v| parse_env_millis("PLAYBACK_LATENCY_MS", &v))
    {
        config.playback_latency = v;
    }
}

fn parse_env_bool(name: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("config: ignoring {ENV_PREFIX}{name}={raw}: expected a boolean");
            None
        }
    }
}

fn parse_env_millis(name: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!("config: ignoring {ENV_PREFIX}{name}={raw}: expected milliseconds");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("counter_cli_{tag}_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = temp_dir("missing");
        let config = load_config(&dir.join("counter.toml")).expect("defaults");

        assert_eq!(config.initial_settings, SettingsState::default());
        assert!(config.media_permission);
        assert_eq!(config.feedback.overlap, PlaybackOverlap::Overlap);

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = temp_dir("file");
        let path = dir.join("counter.toml");
        fs::write(
            &path,
            r#"
sound_enabled = false
selected_clip = "tap2.mp3"
strong_pulse_ms = 150
playback_overlap = "stop-on-replace"
"#,
        )
        .expect("write config");

        let raw = fs::read_to_string(&path).expect("read");
        let mut config = AppConfig::default();
        apply_file(&mut config, toml::from_str(&raw).expect("parse"));

        assert!(!config.initial_settings.sound_enabled);
        assert!(config.initial_settings.vibration_enabled);
        assert_eq!(config.initial_settings.selected_clip.as_str(), "tap2.mp3");
        assert_eq!(config.feedback.strong_pulse, Duration::from_millis(150));
        assert_eq!(config.feedback.overlap, PlaybackOverlap::StopOnReplace);

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = temp_dir("unknown");
        let path = dir.join("counter.toml");
        fs::write(&path, "standard_pulse_ms = 40\n").expect("write config");

        assert!(load_config(&path).is_err());

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = temp_dir("malformed");
        let path = dir.join("counter.toml");
        fs::write(&path, "sound_enabled = \"loud\"\n").expect("write config");

        let err = load_config(&path).expect_err("bad type");
        assert!(err.to_string().contains("failed to parse config file"));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn env_overrides_and_ignores_garbage() {
        let vars: HashMap<String, String> = [
            ("COUNTER__VIBRATION_ENABLED", "off"),
            ("COUNTER__STRONG_PULSE_MS", "soon"),
            ("COUNTER__PLAYBACK_OVERLAP", "queue"),
            ("COUNTER__MEDIA_PERMISSION", "no"),
            ("COUNTER__PLAYBACK_LATENCY_MS", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut config = AppConfig::default();
        apply_env(&mut config, |key| vars.get(key).cloned());

        assert!(!config.initial_settings.vibration_enabled);
        assert_eq!(config.feedback.strong_pulse, FeedbackConfig::default().strong_pulse);
        assert_eq!(config.feedback.overlap, PlaybackOverlap::Overlap);
        assert!(!config.media_permission);
        assert_eq!(config.playback_latency, Duration::from_millis(5));
    }
}
