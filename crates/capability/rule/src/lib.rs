//! # 通知规则能力模块
//!
//! 根据资产读数中的南向事件判断是否需要发出“连接丢失 / 已恢复”通知。
//!
//! ## 调用关系
//!
//! ```text
//! 宿主 ── reconfigure(ConfigDelta) ──▶ ConnectionRule ──▶ SchemaImporter
//!   │                                        │
//!   └──── eval(reading) ─────────────────────┤
//!                                            ▼
//!                              SouthEvent::classify()
//!                                            │
//!                                            ▼
//!                           reason() / triggers() (api-contract)
//! ```
//!
//! 所有公开操作都在同一把互斥锁内完成，重配置与评估可以来自不同线程。

mod evaluate;
mod rule;

pub use evaluate::Rejection;
pub use rule::ConnectionRule;

use systemspr_config::{ConfigDelta, default_config};

/// 宿主驱动的通知规则接口。
pub trait NotificationRule: Send + Sync {
    /// 应用一次（可能是部分的）配置更新。
    fn reconfigure(&self, delta: &ConfigDelta);

    /// 评估一条资产读数，返回是否需要发出通知。
    fn eval(&self, asset_values: &str) -> bool;

    /// 最近一次评估的通知原因，未匹配时为空字符串。
    fn reason(&self) -> String;

    /// 需要送入评估的资产列表。
    fn triggers(&self) -> String;
}

/// 插件描述信息。
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub options: u32,
    pub plugin_type: &'static str,
    pub interface: &'static str,
    /// 默认配置分类（JSON）。
    pub config: String,
}

pub const PLUGIN_TYPE_NOTIFICATION_RULE: &str = "notificationRule";
pub const PLUGIN_INTERFACE_VERSION: &str = "1.0.0";

pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name: domain::RULE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        options: 0,
        plugin_type: PLUGIN_TYPE_NOTIFICATION_RULE,
        interface: PLUGIN_INTERFACE_VERSION,
        config: default_config(),
    }
}
