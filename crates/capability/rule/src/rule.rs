//! 连接丢失 / 恢复通知规则。

use crate::NotificationRule;
use crate::evaluate::{Rejection, extract_south_event};
use api_contract::{ReasonPayload, TriggersPayload};
use domain::{CONNECTION_STATUS_SUBTYPE, ConnectionEvent};
use std::sync::{Mutex, MutexGuard, PoisonError};
use systemspr_config::{ConfigDelta, ConfigError, parse_enable};
use systemspr_schema::SchemaImporter;
use systemspr_telemetry as telemetry;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct RuleState {
    enabled: bool,
    schema: SchemaImporter,
    /// 匹配键（`not connected` / `finished`），每次评估开始时清空。
    last_reason: String,
    /// 触发匹配的字段名，每次评估开始时清空。
    last_asset_cause: String,
}

/// 连接状态通知规则。
///
/// 启用开关、点表跟踪配置和最近一次评估结果放在同一把锁里。
#[derive(Debug, Default)]
pub struct ConnectionRule {
    state: Mutex<RuleState>,
}

impl ConnectionRule {
    /// 未启用、未跟踪任何资产的规则。
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定配置初始化规则（插件初始化时使用默认配置）。
    pub fn from_delta(delta: &ConfigDelta) -> Self {
        let rule = Self::new();
        rule.reconfigure(delta);
        rule
    }

    /// 应用配置更新；未出现的配置项保持不变。
    pub fn reconfigure(&self, delta: &ConfigDelta) {
        let mut state = self.lock();
        if let Some(enable) = delta.enable.as_deref() {
            state.enabled = parse_enable(enable);
            info!(enabled = state.enabled, "rule enable switch updated");
        }
        if let Some(exchanged_data) = delta.exchanged_data.as_deref() {
            state.schema.import_exchanged_data(exchanged_data);
        }
        if let Some(asset) = delta.asset.as_deref() {
            state.schema.import_asset(asset);
        }
    }

    /// 解析宿主配置分类后应用；解析失败时状态不变。
    pub fn reconfigure_json(&self, config: &str) -> Result<(), ConfigError> {
        let delta = ConfigDelta::from_json(config)?;
        self.reconfigure(&delta);
        Ok(())
    }

    /// 评估一条读数。
    pub fn evaluate(&self, asset_values: &str) -> bool {
        let mut state = self.lock();
        state.last_reason.clear();
        state.last_asset_cause.clear();
        telemetry::record_evaluation();

        if !state.enabled {
            telemetry::record_skipped_disabled();
            return false;
        }
        // 点表未声明连接状态点，或未配置跟踪资产
        if !state.schema.tracking().is_active() {
            telemetry::record_skipped_untracked();
            return false;
        }

        let south_event = match extract_south_event(asset_values, state.schema.tracked_asset()) {
            Ok(south_event) => south_event,
            Err(rejection) => {
                rejection.log(asset_values);
                record_rejection(&rejection);
                return false;
            }
        };

        let event = match south_event.classify() {
            Some(event) => event,
            None => {
                telemetry::record_no_status_change();
                return false;
            }
        };
        match event {
            ConnectionEvent::Lost => {
                debug!("sending connection lost notification");
                telemetry::record_connection_lost();
            }
            ConnectionEvent::Restored => {
                debug!("sending connected notification");
                telemetry::record_connection_restored();
            }
        }
        state.last_asset_cause = event.cause().to_string();
        state.last_reason = event.match_key().to_string();
        true
    }

    /// 最近一次评估的通知原因 JSON，未匹配时为空字符串。
    pub fn get_reason(&self) -> String {
        let state = self.lock();
        if state.last_reason.is_empty() {
            return String::new();
        }
        let asset = if state.last_asset_cause.is_empty() {
            CONNECTION_STATUS_SUBTYPE
        } else {
            state.last_asset_cause.as_str()
        };
        let reason = ConnectionEvent::from_match_key(&state.last_reason)
            .map(ConnectionEvent::reason_text)
            .unwrap_or(state.last_reason.as_str());
        ReasonPayload::new(asset, reason).to_json()
    }

    /// 触发器 JSON。
    pub fn get_triggers(&self) -> String {
        let state = self.lock();
        TriggersPayload::for_asset(state.schema.tracked_asset()).to_json()
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    pub fn has_connection_loss_tracking(&self) -> bool {
        self.lock().schema.has_connection_loss_tracking()
    }

    pub fn tracked_asset(&self) -> String {
        self.lock().schema.tracked_asset().to_string()
    }

    /// 临界区内不会 panic 后留下半更新状态，中毒时直接取回内部数据。
    fn lock(&self) -> MutexGuard<'_, RuleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn record_rejection(rejection: &Rejection) {
    if rejection.is_expected() {
        telemetry::record_ignored_irrelevant();
    } else {
        telemetry::record_rejected_invalid();
    }
}

impl NotificationRule for ConnectionRule {
    fn reconfigure(&self, delta: &ConfigDelta) {
        ConnectionRule::reconfigure(self, delta);
    }

    fn eval(&self, asset_values: &str) -> bool {
        self.evaluate(asset_values)
    }

    fn reason(&self) -> String {
        self.get_reason()
    }

    fn triggers(&self) -> String {
        self.get_triggers()
    }
}
