//! 读数解析：从宿主读数中取出跟踪资产的南向事件。

use domain::SouthEvent;
use domain::data::{KEY_CONNX_STATUS, KEY_GI_STATUS, KEY_SOUTH_EVENT};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// 读数被忽略的原因。
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("asset is not an object")]
    RootNotObject,

    #[error("asset is not the one being tracked")]
    ForeignAsset,

    #[error("reading is not an object")]
    ReadingNotObject,

    #[error("reading is not a south event")]
    NotSouthEvent,

    #[error("south event is not an object")]
    SouthEventNotObject,
}

impl Rejection {
    /// 预期内的无关读数（其他资产、非南向事件）只记 debug。
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ForeignAsset | Self::NotSouthEvent)
    }

    pub(crate) fn log(&self, asset_values: &str) {
        if self.is_expected() {
            debug!(reason = %self, payload = asset_values, "reading ignored");
        } else {
            error!(reason = %self, payload = asset_values, "reading ignored");
        }
    }
}

/// 解析读数并提取南向事件。
pub(crate) fn extract_south_event(
    asset_values: &str,
    tracked_asset: &str,
) -> Result<SouthEvent, Rejection> {
    let root: Value = serde_json::from_str(asset_values)?;
    let root = root.as_object().ok_or(Rejection::RootNotObject)?;
    let reading = root.get(tracked_asset).ok_or(Rejection::ForeignAsset)?;
    let reading = reading.as_object().ok_or(Rejection::ReadingNotObject)?;
    let south_event = reading
        .get(KEY_SOUTH_EVENT)
        .ok_or(Rejection::NotSouthEvent)?
        .as_object()
        .ok_or(Rejection::SouthEventNotObject)?;

    Ok(SouthEvent::new(
        string_field(south_event, KEY_CONNX_STATUS),
        string_field(south_event, KEY_GI_STATUS),
    ))
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
