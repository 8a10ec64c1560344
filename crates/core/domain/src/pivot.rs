//! 点表（exchanged_data）中的键名与类型标签。

/// 根对象中的点表节点。
pub const KEY_EXCHANGED_DATA: &str = "exchanged_data";
/// 点表节点中的点位数组。
pub const KEY_DATAPOINTS: &str = "datapoints";
pub const KEY_LABEL: &str = "label";
pub const KEY_PIVOT_ID: &str = "pivot_id";
pub const KEY_PIVOT_TYPE: &str = "pivot_type";
pub const KEY_PIVOT_SUBTYPES: &str = "pivot_subtypes";

/// 连接状态子类型标记。
pub const CONNECTION_STATUS_SUBTYPE: &str = "prt.inf";

/// 状态类点位类型（单点 / 双点遥信）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotType {
    /// 单点遥信 `SpsTyp`
    SinglePointStatus,
    /// 双点遥信 `DpsTyp`
    DoublePointStatus,
}

impl PivotType {
    /// 识别状态类标签；遥测等其他类型返回 None。
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SpsTyp" => Some(Self::SinglePointStatus),
            "DpsTyp" => Some(Self::DoublePointStatus),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::SinglePointStatus => "SpsTyp",
            Self::DoublePointStatus => "DpsTyp",
        }
    }
}
