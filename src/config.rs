//! Build-time configuration for log verbosity and flash timings with an
//! optional runtime override. The runtime config is read from
//! `window.AUTHPAGE_CONFIG` (if present) so a deployment can tune the page
//! without rebuilding the wasm bundle. Configuration values are public; do not
//! store secrets here.

use crate::error::Result;
use serde::Deserialize;
use tracing::Level;

/// Delay before a flash message starts fading.
pub const DEFAULT_FLASH_DISMISS_MS: u32 = 10_000;
/// Time between the fade starting and the message leaving the document.
pub const DEFAULT_FLASH_FADE_MS: u32 = 500;
pub const DEFAULT_LOG_LEVEL: Level = Level::WARN;
/// Largest delay `setTimeout` honours; larger values wrap to a negative delay.
pub const MAX_TIMER_MS: u32 = i32::MAX as u32;

/// Name of the global object consulted for runtime overrides.
pub const RUNTIME_CONFIG_GLOBAL: &str = "AUTHPAGE_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashTiming {
    pub dismiss_after_ms: u32,
    pub fade_ms: u32,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            dismiss_after_ms: DEFAULT_FLASH_DISMISS_MS,
            fade_ms: DEFAULT_FLASH_FADE_MS,
        }
    }
}

/// Page behavior configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub flash: FlashTiming,
    pub log_level: Level,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            flash: FlashTiming::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl BehaviorConfig {
    /// Reads the values baked in at compile time, falling back to defaults for
    /// anything unset or unparseable.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            flash: FlashTiming {
                dismiss_after_ms: parse_ms(
                    option_env!("AUTHPAGE_FLASH_DISMISS_MS"),
                    DEFAULT_FLASH_DISMISS_MS,
                ),
                fade_ms: parse_ms(option_env!("AUTHPAGE_FLASH_FADE_MS"), DEFAULT_FLASH_FADE_MS),
            },
            log_level: option_env!("AUTHPAGE_LOG_LEVEL")
                .and_then(parse_log_level)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    /// Loads the build-time config and applies runtime overrides.
    ///
    /// A runtime config that fails to decode is returned alongside the
    /// build-time config so the caller can report it once logging is up.
    #[must_use]
    pub fn load() -> (Self, Option<crate::Error>) {
        let config = Self::from_build_env();
        match runtime_config_json() {
            Some(raw) => match config.clone().with_runtime_json(&raw) {
                Ok(merged) => (merged, None),
                Err(err) => (config, Some(err)),
            },
            None => (config, None),
        }
    }

    /// Applies overrides decoded from a JSON object.
    ///
    /// # Errors
    /// Returns `Error::Config` if `raw` is not a JSON object matching the
    /// override schema.
    pub fn with_runtime_json(mut self, raw: &str) -> Result<Self> {
        let runtime: RuntimeConfig = serde_json::from_str(raw)?;
        apply_runtime_overrides(&mut self, runtime);
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuntimeConfig {
    log_level: Option<String>,
    flash_dismiss_ms: Option<u32>,
    flash_fade_ms: Option<u32>,
}

fn apply_runtime_overrides(config: &mut BehaviorConfig, runtime: RuntimeConfig) {
    if let Some(level) = runtime
        .log_level
        .as_deref()
        .and_then(normalize_runtime_value)
        .and_then(|value| parse_log_level(&value))
    {
        config.log_level = level;
    }
    if let Some(value) = runtime.flash_dismiss_ms.and_then(timer_ms) {
        config.flash.dismiss_after_ms = value;
    }
    if let Some(value) = runtime.flash_fade_ms.and_then(timer_ms) {
        config.flash.fade_ms = value;
    }
}

fn parse_ms(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|value| value.trim().parse().ok())
        .and_then(timer_ms)
        .unwrap_or(default)
}

fn timer_ms(value: u32) -> Option<u32> {
    (value <= MAX_TIMER_MS).then_some(value)
}

/// Accepts a level name or its numeric verbosity (0 = error ... 4 = trace).
#[must_use]
pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" | "0" => Some(Level::ERROR),
        "warn" | "1" => Some(Level::WARN),
        "info" | "2" => Some(Level::INFO),
        "debug" | "3" => Some(Level::DEBUG),
        "trace" | "4" => Some(Level::TRACE),
        _ => None,
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config_json() -> Option<String> {
    use js_sys::{JSON, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str(RUNTIME_CONFIG_GLOBAL)).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    JSON::stringify(&config).ok().map(String::from)
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config_json() -> Option<String> {
    None
}
