//! 宿主配置分类解析。
//!
//! 宿主以如下形式下发配置（所有键均可选，允许部分更新）：
//!
//! ```json
//! {
//!   "enable": { "value": "true" },
//!   "asset": { "value": "CONNECTION-1" },
//!   "exchanged_data": { "value": { "exchanged_data": { "datapoints": [] } } }
//! }
//! ```

use crate::ConfigError;
use domain::RULE_NAME;
use serde_json::{Map, Value, json};

pub const KEY_ENABLE: &str = "enable";
pub const KEY_ASSET: &str = "asset";
pub const KEY_EXCHANGED_DATA: &str = "exchanged_data";

const DEFAULT_ASSET: &str = "CONNECTION-1";

/// 一次重配置携带的配置项；`None` 表示本次未涉及该项。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDelta {
    pub enable: Option<String>,
    pub asset: Option<String>,
    pub exchanged_data: Option<String>,
}

impl ConfigDelta {
    /// 解析配置分类 JSON。
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(json)?;
        let items = root.as_object().ok_or(ConfigError::NotAnObject)?;
        Ok(Self {
            enable: item_value(items, KEY_ENABLE),
            asset: item_value(items, KEY_ASSET),
            exchanged_data: item_value(items, KEY_EXCHANGED_DATA),
        })
    }

    /// 插件默认配置对应的配置项。
    pub fn defaults() -> Self {
        // default_config() 为内置常量，解析失败时退化为空配置。
        Self::from_json(&default_config()).unwrap_or_default()
    }

    pub fn with_enable(mut self, enabled: bool) -> Self {
        self.enable = Some(enabled.to_string());
        self
    }

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn with_exchanged_data(mut self, exchanged_data: impl Into<String>) -> Self {
        self.exchanged_data = Some(exchanged_data.into());
        self
    }
}

/// 取配置项的 `value`（缺省回退到 `default`），非字符串值重新序列化为 JSON 文本。
fn item_value(items: &Map<String, Value>, key: &str) -> Option<String> {
    let item = items.get(key)?;
    let value = match item {
        Value::Object(fields) => fields.get("value").or_else(|| fields.get("default"))?,
        other => other,
    };
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// 启用开关：仅 `"true"` / `"True"` 视为启用。
pub fn parse_enable(value: &str) -> bool {
    matches!(value, "true" | "True")
}

/// 插件默认配置分类。
pub fn default_config() -> String {
    json!({
        "plugin": {
            "description": "Notify on connection loss and restoration of a south service",
            "type": "string",
            "default": RULE_NAME,
            "readonly": "true"
        },
        "enable": {
            "description": "A switch that can be used to enable or disable execution of the rule",
            "type": "boolean",
            "displayName": "Enabled",
            "order": "1",
            "default": "false"
        },
        "asset": {
            "description": "Name of the asset carrying the south event of the monitored connection",
            "type": "string",
            "displayName": "Asset",
            "order": "2",
            "default": DEFAULT_ASSET
        },
        "exchanged_data": {
            "description": "Exchanged data list",
            "type": "JSON",
            "displayName": "Exchanged data list",
            "order": "3",
            "default": "{\"exchanged_data\":{\"datapoints\":[]}}"
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_value_prefers_value_over_default() {
        let items = json!({ "asset": { "value": "A", "default": "B" } });
        let items = items.as_object().unwrap();
        assert_eq!(item_value(items, "asset").as_deref(), Some("A"));
    }

    #[test]
    fn item_value_falls_back_to_default() {
        let items = json!({ "asset": { "default": "B" } });
        let items = items.as_object().unwrap();
        assert_eq!(item_value(items, "asset").as_deref(), Some("B"));
    }

    #[test]
    fn item_value_accepts_bare_string() {
        let items = json!({ "enable": "true" });
        let items = items.as_object().unwrap();
        assert_eq!(item_value(items, "enable").as_deref(), Some("true"));
    }

    #[test]
    fn item_value_without_value_is_absent() {
        let items = json!({ "asset": { "description": "x" }, "enable": null });
        let items = items.as_object().unwrap();
        assert_eq!(item_value(items, "asset"), None);
        assert_eq!(item_value(items, "enable"), None);
        assert_eq!(item_value(items, "missing"), None);
    }
}
