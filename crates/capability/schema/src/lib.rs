//! # 点表导入能力模块
//!
//! 解析设备点表（exchanged_data），判断其中是否声明了连接状态点，
//! 并记录需要监视的资产名称。
//!
//! ## 点表格式
//!
//! ```json
//! { "exchanged_data": { "datapoints": [
//!     { "label": "TS-1", "pivot_id": "M_2367_3_15_4", "pivot_type": "SpsTyp",
//!       "pivot_subtypes": ["prt.inf"] }
//! ] } }
//! ```
//!
//! 只要存在一个 `SpsTyp` / `DpsTyp` 点位且其子类型包含 `prt.inf`，
//! 连接跟踪即开启。任何结构错误都会记录日志并使跟踪保持关闭。

mod error;

pub use error::SchemaError;

use domain::TrackingConfig;
use domain::pivot::{
    CONNECTION_STATUS_SUBTYPE, KEY_DATAPOINTS, KEY_EXCHANGED_DATA, KEY_LABEL, KEY_PIVOT_ID,
    KEY_PIVOT_SUBTYPES, KEY_PIVOT_TYPE, PivotType,
};
use serde_json::Value;
use tracing::{debug, error};

/// 点表导入器，持有导入得到的跟踪配置。
#[derive(Debug, Clone, Default)]
pub struct SchemaImporter {
    tracking: TrackingConfig,
}

impl SchemaImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 导入点表并刷新连接跟踪开关。
    pub fn import_exchanged_data(&mut self, document: &str) {
        self.tracking.connection_loss_tracking = false;

        let tracking = match scan_exchanged_data(document) {
            Ok(found) => found,
            Err(err) => {
                error!(error = %err, "import exchanged data failed");
                systemspr_telemetry::record_schema_import(false);
                return;
            }
        };
        debug!(
            "connection loss tracking is {}",
            if tracking { "active" } else { "inactive" }
        );
        systemspr_telemetry::record_schema_import(true);
        self.tracking.connection_loss_tracking = tracking;
    }

    /// 记录需要监视的资产名称（不做校验，空字符串表示不跟踪）。
    pub fn import_asset(&mut self, asset: &str) {
        self.tracking.tracked_asset = asset.to_string();
        debug!(asset = %self.tracking.tracked_asset, "connection loss asset tracked");
    }

    pub fn has_connection_loss_tracking(&self) -> bool {
        self.tracking.connection_loss_tracking
    }

    pub fn tracked_asset(&self) -> &str {
        &self.tracking.tracked_asset
    }

    pub fn tracking(&self) -> &TrackingConfig {
        &self.tracking
    }
}

/// 遍历点位，遇到第一个连接状态点即返回 true。
fn scan_exchanged_data(document: &str) -> Result<bool, SchemaError> {
    let root: Value = serde_json::from_str(document)?;
    let root = root.as_object().ok_or(SchemaError::RootNotObject)?;
    let exchanged_data = root
        .get(KEY_EXCHANGED_DATA)
        .and_then(Value::as_object)
        .ok_or(SchemaError::ExchangedData)?;
    let datapoints = exchanged_data
        .get(KEY_DATAPOINTS)
        .and_then(Value::as_array)
        .ok_or(SchemaError::Datapoints)?;

    let found = datapoints
        .iter()
        .any(|datapoint| match import_datapoint(datapoint) {
            Ok(found) => found,
            Err(err) => {
                error!(error = %err, "import datapoint failed");
                false
            }
        });
    Ok(found)
}

/// 单个点位判定。
///
/// 检查顺序固定：类型 → pivot_id → 子类型数组 → label → 子类型标记。
fn import_datapoint(datapoint: &Value) -> Result<bool, SchemaError> {
    let datapoint = datapoint
        .as_object()
        .ok_or(SchemaError::DatapointNotObject)?;

    let pivot_type = datapoint
        .get(KEY_PIVOT_TYPE)
        .and_then(Value::as_str)
        .ok_or(SchemaError::PivotType)?;
    if PivotType::from_tag(pivot_type).is_none() {
        // 非遥信点位
        return Ok(false);
    }

    let pivot_id = datapoint
        .get(KEY_PIVOT_ID)
        .and_then(Value::as_str)
        .ok_or(SchemaError::PivotId)?;

    let subtypes = match datapoint.get(KEY_PIVOT_SUBTYPES).and_then(Value::as_array) {
        Some(subtypes) => subtypes,
        None => return Ok(false),
    };

    let label = datapoint
        .get(KEY_LABEL)
        .and_then(Value::as_str)
        .ok_or(SchemaError::Label)?;

    let found = subtypes
        .iter()
        .filter_map(Value::as_str)
        .any(|subtype| subtype == CONNECTION_STATUS_SUBTYPE);
    if found {
        debug!(label, pivot_id, pivot_type, "connection status datapoint found");
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn datapoint_checks_pivot_id_before_subtypes() {
        let datapoint = json!({ "label": "TS-1", "pivot_type": "SpsTyp" });
        assert!(matches!(
            import_datapoint(&datapoint),
            Err(SchemaError::PivotId)
        ));
    }

    #[test]
    fn datapoint_without_subtypes_skips_label_check() {
        let datapoint = json!({ "pivot_id": "M_1", "pivot_type": "DpsTyp" });
        assert!(matches!(import_datapoint(&datapoint), Ok(false)));
    }

    #[test]
    fn datapoint_label_checked_after_subtypes() {
        let datapoint = json!({
            "pivot_id": "M_1",
            "pivot_type": "SpsTyp",
            "pivot_subtypes": ["prt.inf"],
            "label": 42
        });
        assert!(matches!(import_datapoint(&datapoint), Err(SchemaError::Label)));
    }

    #[test]
    fn datapoint_non_status_type_ignored_before_pivot_id() {
        let datapoint = json!({ "pivot_type": "MvTyp" });
        assert!(matches!(import_datapoint(&datapoint), Ok(false)));
    }

    #[test]
    fn datapoint_ignores_non_string_subtypes() {
        let datapoint = json!({
            "label": "TS-1",
            "pivot_id": "M_1",
            "pivot_type": "SpsTyp",
            "pivot_subtypes": [42, null, {"x": 1}, "prt.inf"]
        });
        assert!(matches!(import_datapoint(&datapoint), Ok(true)));
    }

    #[test]
    fn scan_reports_structural_errors() {
        assert!(matches!(scan_exchanged_data("{42}"), Err(SchemaError::Parse(_))));
        assert!(matches!(scan_exchanged_data("42"), Err(SchemaError::RootNotObject)));
        assert!(matches!(scan_exchanged_data("{}"), Err(SchemaError::ExchangedData)));
        assert!(matches!(
            scan_exchanged_data(r#"{"exchanged_data": {"datapoints": 42}}"#),
            Err(SchemaError::Datapoints)
        ));
    }
}
