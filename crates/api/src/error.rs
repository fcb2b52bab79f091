use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use statecraft_core::StatecraftError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("核心错误: {0}")]
    Statecraft(#[from] StatecraftError),

    #[error("经济更新任务未初始化")]
    JobNotInitialized,

    #[error("手动触发在当前部署环境不可用")]
    ManualTriggerDisabled,

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::JobNotInitialized => (
                StatusCode::SERVICE_UNAVAILABLE,
                "JOB_NOT_INITIALIZED",
                "经济更新任务未初始化".to_string(),
            ),
            ApiError::ManualTriggerDisabled => (
                StatusCode::FORBIDDEN,
                "MANUAL_TRIGGER_DISABLED",
                "手动触发在当前部署环境不可用".to_string(),
            ),
            ApiError::Statecraft(StatecraftError::StateNotFound { id }) => (
                StatusCode::NOT_FOUND,
                "STATE_NOT_FOUND",
                format!("国家 {id} 不存在"),
            ),
            // 准入拒绝对调用方而言是执行失败，带明确的错误消息
            ApiError::Statecraft(err @ StatecraftError::JobAlreadyRunning)
            | ApiError::Statecraft(err @ StatecraftError::JobNotStarted) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "JOB_EXECUTION_REJECTED",
                err.to_string(),
            ),
            // 其余核心错误不把内部细节透给调用方
            ApiError::Statecraft(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.user_message().to_string(),
            ),
            ApiError::Serialization(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
            },
            "timestamp": chrono::Utc::now(),
        }));

        (status, body).into_response()
    }
}
