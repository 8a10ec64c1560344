//! 规则配置加载：宿主配置分类（config category）解析与宿主程序环境变量。

mod category;

pub use category::{ConfigDelta, default_config, parse_enable};

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
    #[error("config category is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config category root is not an object")]
    NotAnObject,
}

/// 宿主演示程序运行配置。
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// 在默认配置之后叠加的配置分类文件。
    pub config_path: Option<String>,
    /// 读数文件（每行一个 JSON 文档），缺省读取 stdin。
    pub readings_path: Option<String>,
    /// 叠加 `enable=true`。
    pub force_enable: bool,
}

impl HostConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let config_path = read_optional("SYSTEMSPR_CONFIG_PATH");
        let readings_path = read_optional("SYSTEMSPR_READINGS_PATH");
        let force_enable = read_bool_with_default("SYSTEMSPR_FORCE_ENABLE", false)?;

        Ok(Self {
            config_path,
            readings_path,
            force_enable,
        })
    }
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> Result<bool, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => return Ok(default),
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
