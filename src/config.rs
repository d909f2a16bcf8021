use crate::error::{DeployError, DeployResult};

/// Environment variable holding the Vultr API token.
pub const ENV_API_KEY: &str = "VULTR_API_KEY";
pub const ENV_LINGO_API_KEY: &str = "LINGO_API_KEY";
pub const ENV_LINGO_PROJECT_ID: &str = "LINGO_PROJECT_ID";
pub const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Placeholder written to the boot script when `LINGO_API_KEY` is
/// unset.
pub const DEFAULT_LINGO_API_KEY: &str = "your_lingo_api_key";

/// Placeholder written to the boot script when
/// `LINGO_PROJECT_ID` is unset.
pub const DEFAULT_LINGO_PROJECT_ID: &str = "your_project_id";

/// Application secrets embedded in the instance's `/app/.env`.
///
/// # Example
///
/// ```
/// use vultr_deploy::config::Secrets;
///
/// let secrets = Secrets::from_lookup(|key| {
///     (key == "GROQ_API_KEY").then(|| "gsk-123".to_string())
/// });
///
/// assert_eq!(secrets.groq_api_key, "gsk-123");
/// assert_eq!(secrets.openai_api_key, "");
/// assert_eq!(secrets.lingo_api_key, "your_lingo_api_key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub lingo_api_key: String,
    pub lingo_project_id: String,
    pub groq_api_key: String,
    pub openai_api_key: String,
}

impl Secrets {
    /// Resolve the secrets from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Resolve the secrets through `lookup`, applying the
    /// placeholder defaults for anything unset or empty.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            non_empty(lookup(key)).unwrap_or_else(|| default.to_string())
        };

        Self {
            lingo_api_key: get(ENV_LINGO_API_KEY, DEFAULT_LINGO_API_KEY),
            lingo_project_id: get(ENV_LINGO_PROJECT_ID, DEFAULT_LINGO_PROJECT_ID),
            groq_api_key: get(ENV_GROQ_API_KEY, ""),
            openai_api_key: get(ENV_OPENAI_API_KEY, ""),
        }
    }
}

impl Default for Secrets {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Everything a deployment run reads from its environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub secrets: Secrets,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> DeployResult<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Resolve configuration through `lookup`.
    ///
    /// Fails with [`DeployError::EnvMissing`] when the API key is
    /// unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DeployResult<Self> {
        let api_key = non_empty(lookup(ENV_API_KEY))
            .ok_or_else(|| DeployError::EnvMissing(ENV_API_KEY.into()))?;

        Ok(Self {
            api_key,
            secrets: Secrets::from_lookup(lookup),
        })
    }
}

// Secrets stay out of debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
