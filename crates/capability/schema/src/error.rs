//! 点表导入错误类型定义

/// 点表结构错误
///
/// 导入过程只记录日志，不向调用方传播，导入失败时连接跟踪保持关闭。
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// JSON 解析错误
    #[error("parsing error in data exchange configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("root element is not an object")]
    RootNotObject,

    #[error("exchanged_data not found in root object or is not an object")]
    ExchangedData,

    #[error("datapoints not found in exchanged_data or is not an array")]
    Datapoints,

    #[error("datapoint is not an object")]
    DatapointNotObject,

    #[error("pivot_type not found in datapoint or is not a string")]
    PivotType,

    #[error("pivot_id not found in datapoint or is not a string")]
    PivotId,

    #[error("label not found in datapoint or is not a string")]
    Label,
}
