//! Runtime configuration for the browser form.
//!
//! Deployments inject settings into the page as a global object:
//!
//! ```html
//! <script>
//!   window.__ENV__ = { API_BASE_URL: "https://extract.example.org/api/v1/compare" };
//! </script>
//! ```
//!
//! Runtime values win over the ones baked in at build time
//! (`API_BASE_URL=... trunk build`). The endpoint is the full URL the form
//! posts to.

use intelli_extract_core::config::{resolve_endpoint, BUILD_API_BASE_URL};
use intelli_extract_core::SchemaProfile;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Global the page script assigns settings to.
pub const RUNTIME_ENV_GLOBAL: &str = "__ENV__";

/// Schema preset baked in at build time, if any.
pub const BUILD_SCHEMA_PROFILE: Option<&str> = option_env!("SCHEMA_PROFILE");

/// Settings read from `window.__ENV__`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RuntimeEnv {
    #[serde(rename = "API_BASE_URL", default)]
    pub api_base_url: Option<String>,
    #[serde(rename = "VITE_API_BASE_URL", default)]
    pub vite_api_base_url: Option<String>,
    /// Preset name (`auto`, `m-series`, `legacy`)
    #[serde(rename = "SCHEMA_PROFILE", default)]
    pub schema_profile: Option<String>,
}

/// Resolved configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub endpoint: String,
    pub profile: SchemaProfile,
}

impl AppConfig {
    /// Read the page's runtime settings and merge them with build-time ones.
    pub fn load() -> Self {
        let config = Self::from_env(&read_runtime_env(), BUILD_API_BASE_URL, BUILD_SCHEMA_PROFILE);
        if config.endpoint.is_empty() {
            log::warn!("⚠️ No API_BASE_URL configured; submissions will fail");
        } else {
            log::info!("🔗 Extraction endpoint: {}", config.endpoint);
        }
        config
    }

    pub fn from_env(env: &RuntimeEnv, build_url: Option<&str>, build_profile: Option<&str>) -> Self {
        let endpoint = resolve_endpoint([
            env.api_base_url.as_deref(),
            env.vite_api_base_url.as_deref(),
            build_url,
        ]);

        let profile_name = env
            .schema_profile
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(build_profile);

        let profile = match profile_name {
            Some(name) => name.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring schema profile '{}': {}", name, e);
                SchemaProfile::auto()
            }),
            None => SchemaProfile::auto(),
        };

        Self { endpoint, profile }
    }
}

fn read_runtime_env() -> RuntimeEnv {
    let Some(window) = web_sys::window() else {
        return RuntimeEnv::default();
    };

    let value = match js_sys::Reflect::get(&window, &JsValue::from_str(RUNTIME_ENV_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return RuntimeEnv::default(),
    };

    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        log::warn!("Malformed window.{}: {}", RUNTIME_ENV_GLOBAL, e);
        RuntimeEnv::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_url_wins() {
        let env = RuntimeEnv {
            api_base_url: Some("https://runtime/api/v1/compare".into()),
            vite_api_base_url: Some("https://alias/api".into()),
            schema_profile: None,
        };
        let config = AppConfig::from_env(&env, Some("https://build/api"), None);
        assert_eq!(config.endpoint, "https://runtime/api/v1/compare");
        assert_eq!(config.profile, SchemaProfile::auto());
    }

    #[test]
    fn test_alias_then_build_time() {
        let env = RuntimeEnv {
            vite_api_base_url: Some("https://alias/api".into()),
            ..Default::default()
        };
        assert_eq!(AppConfig::from_env(&env, Some("https://build/api"), None).endpoint, "https://alias/api");
        assert_eq!(
            AppConfig::from_env(&RuntimeEnv::default(), Some("https://build/api"), None).endpoint,
            "https://build/api"
        );
        assert_eq!(AppConfig::from_env(&RuntimeEnv::default(), None, None).endpoint, "");
    }

    #[test]
    fn test_schema_profile_selection() {
        let env = RuntimeEnv {
            schema_profile: Some("legacy".into()),
            ..Default::default()
        };
        assert_eq!(AppConfig::from_env(&env, None, Some("m-series")).profile, SchemaProfile::legacy());
        assert_eq!(
            AppConfig::from_env(&RuntimeEnv::default(), None, Some("m-series")).profile,
            SchemaProfile::m_series()
        );

        let unknown = RuntimeEnv {
            schema_profile: Some("v9".into()),
            ..Default::default()
        };
        assert_eq!(AppConfig::from_env(&unknown, None, None).profile, SchemaProfile::auto());
    }

    #[test]
    fn test_runtime_env_keys() {
        let env: RuntimeEnv = serde_json::from_str(r#"{"VITE_API_BASE_URL": "http://x", "OTHER": 1}"#).unwrap();
        assert_eq!(env.vite_api_base_url.as_deref(), Some("http://x"));
        assert_eq!(env.api_base_url, None);
    }
}
