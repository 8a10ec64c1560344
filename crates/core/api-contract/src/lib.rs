//! 规则对宿主输出的稳定 JSON 契约。

use serde::Serialize;

/// 通知原因：`{"asset": ..., "reason": ...}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonPayload {
    pub asset: String,
    pub reason: String,
}

impl ReasonPayload {
    pub fn new(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            reason: reason.into(),
        }
    }

    pub fn to_json(&self) -> String {
        to_json_string(self)
    }
}

/// 单个触发资产。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerAsset {
    pub asset: String,
}

/// 触发器列表：宿主据此决定哪些资产的读数需要送入评估。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggersPayload {
    pub triggers: Vec<TriggerAsset>,
}

impl TriggersPayload {
    /// 空资产名表示不跟踪，输出空列表。
    pub fn for_asset(asset: &str) -> Self {
        if asset.is_empty() {
            return Self::default();
        }
        Self {
            triggers: vec![TriggerAsset {
                asset: asset.to_string(),
            }],
        }
    }

    pub fn to_json(&self) -> String {
        to_json_string(self)
    }
}

/// 仅含字符串字段的结构体序列化不会失败。
fn to_json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
