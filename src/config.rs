//! Configuration for Telegram API credentials and chat aliases
//!
//! Loads configuration from an optional config.yml file.
//! Environment variables and CLI flags take precedence over config.yml values.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default constants (fallback if config.yml not found)
pub const SESSION_NAME: &str = "telegram_session";
pub const LOCK_FILE: &str = "telegram_session.lock";
pub const DEFAULT_LIMIT: usize = 10_000;
pub const DEFAULT_OUTPUT_FILE: &str = "history.json";
pub const DEFAULT_OFFSET_DATE: &str = "1970-01-01";

/// Chat entity types
#[derive(Debug, Clone)]
pub enum ChatEntity {
    /// Channel by ID
    Channel(i64),
    /// Group chat by ID
    Chat(i64),
    /// User by username (without @)
    Username(String),
    /// User by ID
    UserId(i64),
}

impl ChatEntity {
    pub fn channel(id: i64) -> Self {
        ChatEntity::Channel(id)
    }

    pub fn chat(id: i64) -> Self {
        ChatEntity::Chat(id)
    }

    pub fn username(name: &str) -> Self {
        let name = name.strip_prefix('@').unwrap_or(name);
        ChatEntity::Username(name.to_string())
    }

    pub fn user_id(id: i64) -> Self {
        ChatEntity::UserId(id)
    }
}

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    telegram: Option<TelegramConfig>,
    limits: Option<LimitsConfig>,
    chats: Option<HashMap<String, ChatConfig>>,
}

#[derive(Debug, Deserialize)]
struct TelegramConfig {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    api_id: Option<String>,
    api_hash: Option<String>,
    phone: Option<String>,
    session_name: Option<String>,
}

/// Deserialize a value that can be either a string or a number
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_yaml::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {:?}",
            other
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct LimitsConfig {
    default: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ChatConfig {
    #[serde(rename = "type")]
    chat_type: String,
    id: Option<i64>,
    username: Option<String>,
    title: Option<String>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub phone: String,
    pub api_id: i32,
    pub api_hash: String,
    pub session_name: String,
    pub lock_file: String,
    pub default_limit: usize,
    pub chats: HashMap<String, ChatEntity>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults
    /// Environment variables take precedence over config.yml values
    pub fn new() -> Self {
        Self::load_from_file("config.yml")
            .or_else(|_| Self::load_from_file("../config.yml"))
            .unwrap_or_else(|_| Self::defaults())
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            }
        }
        // Also check explicit env_key as fallback
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        value.unwrap_or_default()
    }

    /// Resolve an integer value from string config or env var
    fn resolve_env_i32(value: Option<String>, env_key: &str) -> i32 {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    if let Ok(parsed) = env_val.parse::<i32>() {
                        return parsed;
                    }
                }
            }
            if let Ok(parsed) = v.parse::<i32>() {
                return parsed;
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            if let Ok(parsed) = env_val.parse::<i32>() {
                return parsed;
            }
        }
        0
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        // Try to load from current directory first, then parent
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        // Load .env file first
        Self::load_dotenv();

        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        let telegram = yaml.telegram.unwrap_or(TelegramConfig {
            api_id: None,
            api_hash: None,
            phone: None,
            session_name: None,
        });

        let limits = yaml.limits.unwrap_or(LimitsConfig { default: None });

        // Parse chat aliases
        let mut chats = HashMap::new();
        if let Some(yaml_chats) = yaml.chats {
            for (name, chat_config) in yaml_chats {
                let entity = match chat_config.chat_type.as_str() {
                    "channel" => {
                        if let Some(id) = chat_config.id {
                            ChatEntity::Channel(id)
                        } else {
                            continue;
                        }
                    }
                    "group" => {
                        if let Some(id) = chat_config.id {
                            ChatEntity::Chat(id)
                        } else {
                            continue;
                        }
                    }
                    "user" => {
                        if let Some(id) = chat_config.id {
                            ChatEntity::UserId(id)
                        } else {
                            continue;
                        }
                    }
                    "username" => {
                        if let Some(username) = chat_config.username {
                            ChatEntity::Username(username)
                        } else {
                            continue;
                        }
                    }
                    _ => continue,
                };
                chats.insert(name, entity);
            }
        }

        // Resolve values with env var precedence
        let api_id = Self::resolve_env_i32(telegram.api_id, "TELEGRAM_API_ID");
        let api_hash = Self::resolve_env_string(telegram.api_hash, "TELEGRAM_API_HASH");
        let phone = Self::resolve_env_string(telegram.phone, "TELEGRAM_PHONE");

        Ok(Self {
            phone,
            api_id,
            api_hash,
            session_name: telegram
                .session_name
                .unwrap_or_else(|| SESSION_NAME.to_string()),
            lock_file: LOCK_FILE.to_string(),
            default_limit: limits.default.unwrap_or(DEFAULT_LIMIT),
            chats,
        })
    }

    /// Create config with empty defaults (fallback)
    /// Credentials must then come from CLI flags or environment variables
    fn defaults() -> Self {
        Self {
            phone: Self::resolve_env_string(None, "TELEGRAM_PHONE"),
            api_id: Self::resolve_env_i32(None, "TELEGRAM_API_ID"),
            api_hash: Self::resolve_env_string(None, "TELEGRAM_API_HASH"),
            session_name: SESSION_NAME.to_string(),
            lock_file: LOCK_FILE.to_string(),
            default_limit: DEFAULT_LIMIT,
            chats: HashMap::new(),
        }
    }

    /// Get chat entity by alias
    pub fn get_chat(&self, name: &str) -> Option<&ChatEntity> {
        self.chats.get(name)
    }

    /// Overlay CLI-provided credentials on top of config/env values.
    pub fn apply_credentials(&mut self, api_id: Option<i32>, api_hash: Option<&str>) {
        if let Some(id) = api_id {
            self.api_id = id;
        }
        if let Some(hash) = api_hash {
            self.api_hash = hash.to_string();
        }
    }

    /// Fail early when no usable credentials were supplied.
    pub fn require_credentials(&self) -> crate::error::Result<()> {
        if self.api_id == 0 {
            return Err(crate::error::Error::MissingCredentials(
                "api_id is not set; pass --api_id or set TELEGRAM_API_ID".to_string(),
            ));
        }
        if self.api_hash.is_empty() {
            return Err(crate::error::Error::MissingCredentials(
                "api_hash is not set; pass --api_hash or set TELEGRAM_API_HASH".to_string(),
            ));
        }
        Ok(())
    }
}
