//! Provider configuration and the model registry

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Registry key of the built-in local model
pub const LOCAL_MODEL_KEY: &str = "lm-studio-local-llm";
/// Registry key of the built-in cloud model
pub const CLOUD_MODEL_KEY: &str = "gemini-2.5-flash";

const DEFAULT_LOCAL_URL: &str = "http://host.docker.internal:1234/v1/chat/completions";
const DEFAULT_LOCAL_MODEL_ID: &str = "stabilityai_-_stablelm-zephyr-3b";
const DEFAULT_CLOUD_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";
const DEFAULT_CLOUD_MODEL_ID: &str = "gemini-2.5-flash";

/// Wire protocol family spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (LM Studio and friends)
    #[serde(alias = "lm-studio")]
    LocalChat,
    /// Google generative language `generateContent`
    #[serde(alias = "gemini")]
    CloudGenerative,
}

impl ProviderKind {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderKind::LocalChat => "local-chat",
            ProviderKind::CloudGenerative => "cloud-generative",
        }
    }

    /// Whether requests to this kind of provider must carry an API key
    pub fn requires_credential(&self) -> bool {
        match self {
            ProviderKind::LocalChat => false,
            ProviderKind::CloudGenerative => true,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local-chat" | "lm-studio" => Ok(ProviderKind::LocalChat),
            "cloud-generative" | "gemini" => Ok(ProviderKind::CloudGenerative),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// API key that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, treating blank strings as absent
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration for a single selectable model
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Registry key used by callers to select this model
    pub key: String,
    /// Provider endpoint, without credentials
    pub endpoint: Url,
    /// Model identifier sent to (or implied by) the provider
    pub model_id: String,
    /// Optional credential
    pub api_key: Option<ApiKey>,
    /// Wire protocol family
    pub provider: ProviderKind,
}

impl ProviderConfig {
    pub fn new(
        key: impl Into<String>,
        endpoint: &str,
        model_id: impl Into<String>,
        provider: ProviderKind,
    ) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
            name: "endpoint".to_string(),
            reason: format!("'{}': {}", endpoint, e),
        })?;

        Ok(Self {
            key: key.into(),
            endpoint,
            model_id: model_id.into(),
            api_key: None,
            provider,
        })
    }

    /// Set the API key (builder pattern); blank keys are ignored
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(api_key);
        self
    }

    /// Whether the credential precondition holds for this config
    pub fn has_required_credential(&self) -> bool {
        !self.provider.requires_credential() || self.api_key.is_some()
    }

    /// Selector label: dashes become spaces, words are capitalized
    pub fn display_label(&self) -> String {
        self.key
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One `[[models]]` entry of a models file
#[derive(Debug, Deserialize)]
struct ModelEntry {
    key: String,
    endpoint: String,
    model_id: String,
    provider: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsFile {
    #[serde(default)]
    default_model: Option<String>,
    models: Vec<ModelEntry>,
}

/// Immutable table of selectable models, built once at startup
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    models: BTreeMap<String, ProviderConfig>,
    default_key: String,
}

impl ProviderRegistry {
    /// Build a registry from configs; the default key must be one of them
    pub fn new(
        configs: impl IntoIterator<Item = ProviderConfig>,
        default_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let mut models = BTreeMap::new();
        for config in configs {
            if models.contains_key(&config.key) {
                return Err(ConfigError::DuplicateModel(config.key));
            }
            models.insert(config.key.clone(), config);
        }

        let default_key = default_key.into();
        if !models.contains_key(&default_key) {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_MODEL".to_string(),
                reason: format!("'{}' is not a configured model", default_key),
            });
        }

        Ok(Self {
            models,
            default_key,
        })
    }

    /// The two built-in models, with endpoint, model id and key overridable
    /// through the given variable lookup
    pub fn builtin<F>(lookup: F) -> Result<Vec<ProviderConfig>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let local_url =
            lookup("LM_STUDIO_LOCAL_API_URL").unwrap_or_else(|| DEFAULT_LOCAL_URL.to_string());
        let local_model =
            lookup("LM_STUDIO_MODEL_ID").unwrap_or_else(|| DEFAULT_LOCAL_MODEL_ID.to_string());
        let cloud_url = lookup("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_CLOUD_URL.to_string());

        let local = ProviderConfig::new(
            LOCAL_MODEL_KEY,
            &local_url,
            local_model,
            ProviderKind::LocalChat,
        )?;

        let mut cloud = ProviderConfig::new(
            CLOUD_MODEL_KEY,
            &cloud_url,
            DEFAULT_CLOUD_MODEL_ID,
            ProviderKind::CloudGenerative,
        )?;
        if let Some(key) = lookup("GEMINI_API_KEY") {
            cloud = cloud.with_api_key(key);
        }

        Ok(vec![local, cloud])
    }

    /// Parse a TOML models file. `api_key_env` entries are resolved through
    /// `lookup`; an inline `api_key` wins over `api_key_env`.
    pub fn from_toml_str<F>(
        content: &str,
        default_key: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ModelsFile =
            toml::from_str(content).map_err(|e| ConfigError::ModelsFile(e.to_string()))?;

        let mut configs = Vec::with_capacity(file.models.len());
        for entry in file.models {
            let provider: ProviderKind = entry.provider.parse()?;
            let mut config =
                ProviderConfig::new(entry.key, &entry.endpoint, entry.model_id, provider)?;
            let key = entry
                .api_key
                .or_else(|| entry.api_key_env.as_deref().and_then(|name| lookup(name)));
            if let Some(key) = key {
                config = config.with_api_key(key);
            }
            configs.push(config);
        }

        let default_key = default_key
            .or(file.default_model)
            .or_else(|| configs.first().map(|c| c.key.clone()))
            .ok_or_else(|| ConfigError::ModelsFile("no models defined".to_string()))?;

        Self::new(configs, default_key)
    }

    /// Look up a model by registry key
    pub fn get(&self, key: &str) -> Option<&ProviderConfig> {
        self.models.get(key)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// All models in key order
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
