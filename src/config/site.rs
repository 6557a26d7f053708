use crate::core::blueprint::RetryPolicy;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_generator_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_to_address")]
    pub to_address: String,
    #[serde(default = "default_fallback_address")]
    pub fallback_address: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_generator_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generator_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_mail_endpoint() -> String {
    "https://api.resend.com".to_string()
}

fn default_from_address() -> String {
    "Studio Site <noreply@studio-site.dev>".to_string()
}

fn default_to_address() -> String {
    "hello@studio-site.dev".to_string()
}

fn default_fallback_address() -> String {
    "hello@studio-site.dev".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_generator_endpoint(),
            model: default_generator_model(),
            api_key: None,
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: default_mail_endpoint(),
            api_key: None,
            from_address: default_from_address(),
            to_address: default_to_address(),
            fallback_address: default_fallback_address(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generator: GeneratorConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the value of the environment variable.
    /// Unset variables are left as the literal placeholder so that secret
    /// resolution can treat them as absent later.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Environment-only construction for containerized runs without a
    /// config file. Every knob falls back to its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("BIND_ADDRESS") {
            config.server.bind_address = addr;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse().unwrap_or(default_port());
        }

        if let Ok(endpoint) = env::var("GENERATOR_ENDPOINT") {
            config.generator.endpoint = endpoint;
        }
        if let Ok(model) = env::var("GENERATOR_MODEL") {
            config.generator.model = model;
        }
        config.generator.api_key = env::var("GEMINI_API_KEY").ok();

        if let Ok(endpoint) = env::var("MAIL_ENDPOINT") {
            config.mail.endpoint = endpoint;
        }
        config.mail.api_key = env::var("RESEND_API_KEY").ok();
        if let Ok(from) = env::var("MAIL_FROM") {
            config.mail.from_address = from;
        }
        if let Ok(to) = env::var("MAIL_TO") {
            config.mail.to_address = to;
        }
        if let Ok(fallback) = env::var("MAIL_FALLBACK") {
            config.mail.fallback_address = fallback;
        }

        config
    }

    /// Generative-API credential, or None when unset, blank, or an
    /// unresolved `${...}` placeholder survived substitution.
    pub fn generator_api_key(&self) -> Option<&str> {
        resolve_secret(&self.generator.api_key)
    }

    pub fn mail_api_key(&self) -> Option<&str> {
        resolve_secret(&self.mail.api_key)
    }
}

fn resolve_secret(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() && !v.starts_with("${") => Some(v),
        _ => None,
    }
}

impl GeneratorConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
        }
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("generator.endpoint", &self.generator.endpoint)?;
        validate_non_empty_string("generator.model", &self.generator.model)?;
        validate_positive_number(
            "generator.max_attempts",
            self.generator.max_attempts as usize,
            1,
        )?;
        validate_range("generator.max_attempts", self.generator.max_attempts, 1, 10)?;
        validate_positive_number(
            "generator.initial_delay_ms",
            self.generator.initial_delay_ms as usize,
            1,
        )?;
        validate_positive_number(
            "generator.timeout_seconds",
            self.generator.timeout_seconds as usize,
            1,
        )?;

        validate_url("mail.endpoint", &self.mail.endpoint)?;
        validate_non_empty_string("mail.from_address", &self.mail.from_address)?;
        validate_non_empty_string("mail.to_address", &self.mail.to_address)?;
        validate_non_empty_string("mail.fallback_address", &self.mail.fallback_address)?;

        Ok(())
    }
}
