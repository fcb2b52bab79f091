use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatecraftError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("数据库操作错误: {0}")]
    DatabaseOperation(String),
    #[error("国家未找到: {id}")]
    StateNotFound { id: i64 },
    #[error("无效的CRON表达式: {expr} - {message}")]
    InvalidCron { expr: String, message: String },
    #[error("经济更新任务已在运行中")]
    JobAlreadyRunning,
    #[error("经济更新任务尚未启动")]
    JobNotStarted,
    #[error("本轮经济更新超时")]
    PassTimeout,
    #[error("经济重算失败: {0}")]
    Recompute(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type StatecraftResult<T> = Result<T, StatecraftError>;

impl StatecraftError {
    pub fn database_error<S: Into<String>>(msg: S) -> Self {
        Self::DatabaseOperation(msg.into())
    }
    pub fn state_not_found(id: i64) -> Self {
        Self::StateNotFound { id }
    }
    pub fn recompute_error<S: Into<String>>(msg: S) -> Self {
        Self::Recompute(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    /// 面向API调用方的友好消息，不暴露内部细节
    pub fn user_message(&self) -> &str {
        match self {
            StatecraftError::StateNotFound { .. } => "请求的国家不存在",
            StatecraftError::JobAlreadyRunning => "经济更新任务正在运行，请稍后重试",
            StatecraftError::JobNotStarted => "经济更新任务尚未初始化",
            StatecraftError::InvalidCron { .. } => "调度表达式配置有误",
            StatecraftError::PassTimeout => "经济更新超时，请查看任务状态",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<serde_json::Error> for StatecraftError {
    fn from(err: serde_json::Error) -> Self {
        StatecraftError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for StatecraftError {
    fn from(err: anyhow::Error) -> Self {
        StatecraftError::Internal(err.to_string())
    }
}
