pub mod data;
pub mod pivot;

pub use data::{ConnectionEvent, SouthEvent};
pub use pivot::{CONNECTION_STATUS_SUBTYPE, PivotType};

/// 规则名称（宿主侧插件名）。
pub const RULE_NAME: &str = "systemspr";

/// 连接状态跟踪配置：每次重配置整体替换。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingConfig {
    /// 最近一次导入的点表中是否存在连接状态点。
    pub connection_loss_tracking: bool,
    /// 需要监视的资产名称，空字符串表示不跟踪。
    pub tracked_asset: String,
}

impl TrackingConfig {
    /// 两个条件同时满足时才进入评估。
    pub fn is_active(&self) -> bool {
        self.connection_loss_tracking && !self.tracked_asset.is_empty()
    }
}
