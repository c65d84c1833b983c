use dioxus::prelude::*;
use serde::Deserialize;

const DEFAULT_COUNTER_API_URL: &str =
    "https://api.counterapi.dev/v2/syndro-counter/syndro-visitors/up";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    #[serde(default = "default_counter_api_url")]
    pub counter_api_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            counter_api_url: default_counter_api_url(),
        }
    }
}

fn default_counter_api_url() -> String {
    DEFAULT_COUNTER_API_URL.to_string()
}

pub fn use_runtime_config() -> Resource<RuntimeConfig> {
    use_resource(|| async move {
        fetch_runtime_config().await.unwrap_or_else(|err| {
            tracing::debug!("config: {err}; using defaults");
            RuntimeConfig::default()
        })
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    let counter_api_url =
        std::env::var("COUNTER_API_URL").unwrap_or_else(|_| default_counter_api_url());
    Ok(RuntimeConfig { counter_api_url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn counter_url_can_be_overridden() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"counterApiUrl": "/api/visits/up"}"#).unwrap();
        assert_eq!(config.counter_api_url, "/api/visits/up");
    }
}
