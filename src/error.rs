use thiserror::Error;

/// 摄取/写入边界的错误集合
///
/// 核心派生管线自身没有失败路径; 这里只覆盖上游 HTTP 交互。
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// 上游传输层错误 (连接失败、超时、非法响应体)
    #[error("upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// 上游明确拒绝写入 (4xx)
    #[error("upstream rejected the record: {0}")]
    Rejected(String),

    /// JSON 编解码错误
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
