/// 读数中的 `south_event` 键。
pub const KEY_SOUTH_EVENT: &str = "south_event";
pub const KEY_CONNX_STATUS: &str = "connx_status";
pub const KEY_GI_STATUS: &str = "gi_status";

/// 南向事件：设备连接与总召状态。
///
/// 缺失或非字符串的字段视为空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SouthEvent {
    pub connx_status: String,
    pub gi_status: String,
}

impl SouthEvent {
    pub fn new(connx_status: impl Into<String>, gi_status: impl Into<String>) -> Self {
        Self {
            connx_status: connx_status.into(),
            gi_status: gi_status.into(),
        }
    }

    /// 按固定优先级分类：连接丢失优先于恢复。
    pub fn classify(&self) -> Option<ConnectionEvent> {
        if self.connx_status == ConnectionEvent::Lost.match_key() {
            Some(ConnectionEvent::Lost)
        } else if self.gi_status == ConnectionEvent::Restored.match_key() {
            Some(ConnectionEvent::Restored)
        } else {
            None
        }
    }
}

/// 连接状态变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// `connx_status == "not connected"`
    Lost,
    /// `gi_status == "finished"`（总召完成即视为已恢复）
    Restored,
}

impl ConnectionEvent {
    /// 触发匹配的字段名。
    pub fn cause(self) -> &'static str {
        match self {
            Self::Lost => KEY_CONNX_STATUS,
            Self::Restored => KEY_GI_STATUS,
        }
    }

    /// 字段中需要匹配的取值。
    pub fn match_key(self) -> &'static str {
        match self {
            Self::Lost => "not connected",
            Self::Restored => "finished",
        }
    }

    /// 对外输出的原因文本。
    pub fn reason_text(self) -> &'static str {
        match self {
            Self::Lost => "connection lost",
            Self::Restored => "connected",
        }
    }

    pub fn from_match_key(key: &str) -> Option<Self> {
        match key {
            "not connected" => Some(Self::Lost),
            "finished" => Some(Self::Restored),
            _ => None,
        }
    }
}
