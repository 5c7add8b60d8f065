use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SOCKET_PATH: &str = "/my-custom-socket-path";
pub const DEFAULT_ACTION_REASON: &str = "Performed from web panel";
pub const DEFAULT_STATS_REFRESH_MS: u32 = 20_000;
pub const DEFAULT_VOICE_REFRESH_MS: u32 = 5_000;
pub const DEFAULT_COUNTDOWN_TICK_MS: u32 = 1_000;
pub const DEFAULT_FADE_MS: u32 = 500;
pub const DEFAULT_EXPIRED_ROW_DELAY_MS: u32 = 1_000;
pub const DEFAULT_TYPING_MS: u32 = 60;
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2_000;

/// Runtime knobs for the web shell.
///
/// Every field has a default, so the optional `#panel-config` island only
/// needs to carry the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub socket_path: String,
    pub action_reason: String,
    pub stats_refresh_ms: u32,
    pub voice_refresh_ms: u32,
    pub countdown_tick_ms: u32,
    pub fade_ms: u32,
    pub expired_row_delay_ms: u32,
    pub typing_ms: u32,
    pub copy_feedback_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            socket_path: DEFAULT_SOCKET_PATH.to_string(),
            action_reason: DEFAULT_ACTION_REASON.to_string(),
            stats_refresh_ms: DEFAULT_STATS_REFRESH_MS,
            voice_refresh_ms: DEFAULT_VOICE_REFRESH_MS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            fade_ms: DEFAULT_FADE_MS,
            expired_row_delay_ms: DEFAULT_EXPIRED_ROW_DELAY_MS,
            typing_ms: DEFAULT_TYPING_MS,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
        }
    }
}

impl PanelConfig {
    /// Parses and validates the JSON island text.
    pub fn from_island(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)
            .map_err(|error| ConfigError::Malformed(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Island text if present, defaults otherwise. A bad island is logged and ignored.
    pub fn resolve(island: Option<&str>) -> Self {
        let Some(raw) = island else {
            return Self::default();
        };
        match Self::from_island(raw) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "ignoring panel config island");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let path = self.socket_path.trim();
        if path.is_empty() || !path.starts_with('/') {
            return Err(ConfigError::InvalidSocketPath);
        }
        if self.action_reason.trim().is_empty() {
            return Err(ConfigError::EmptyReason);
        }
        for (field, value) in [
            ("stats_refresh_ms", self.stats_refresh_ms),
            ("voice_refresh_ms", self.voice_refresh_ms),
            ("countdown_tick_ms", self.countdown_tick_ms),
            ("typing_ms", self.typing_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_island_yields_defaults() {
        let config = PanelConfig::from_island("  ").expect("empty island should parse");
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.socket_path, "/my-custom-socket-path");
        assert_eq!(config.action_reason, "Performed from web panel");
    }

    #[test]
    fn partial_island_overrides_only_named_keys() {
        let config = PanelConfig::from_island(r#"{"socket_path":"/rt","stats_refresh_ms":5000}"#)
            .expect("partial island should parse");
        assert_eq!(config.socket_path, "/rt");
        assert_eq!(config.stats_refresh_ms, 5_000);
        assert_eq!(config.voice_refresh_ms, DEFAULT_VOICE_REFRESH_MS);
    }

    #[test]
    fn invalid_islands_are_rejected() {
        let error = PanelConfig::from_island(r#"{"socket_path":"rt"}"#)
            .expect_err("relative socket path should be rejected");
        assert_eq!(error, ConfigError::InvalidSocketPath);

        let error = PanelConfig::from_island(r#"{"countdown_tick_ms":0}"#)
            .expect_err("zero tick should be rejected");
        assert_eq!(
            error,
            ConfigError::ZeroInterval {
                field: "countdown_tick_ms"
            }
        );

        assert!(matches!(
            PanelConfig::from_island("{not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn resolve_falls_back_on_bad_island() {
        assert_eq!(PanelConfig::resolve(Some("[]")), PanelConfig::default());
        assert_eq!(PanelConfig::resolve(None), PanelConfig::default());
    }
}
