use axum::extract::State;
use tracing::info;

use statecraft_job::{JobStatus, RunResult};

use crate::error::{ApiError, ApiResult};
use crate::response::{success, ApiResponse};
use crate::routes::AppState;

/// 查询经济更新任务状态
pub async fn get_economic_job_status(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<JobStatus>> {
    let job = state.job.as_ref().ok_or(ApiError::JobNotInitialized)?;
    Ok(success(job.get_status()))
}

/// 手动触发一轮经济更新
///
/// 仅在非生产部署开放；正在运行或已停止时以执行失败返回，
/// 不影响现有的一轮。
pub async fn execute_economic_job(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<RunResult>> {
    let job = state.job.as_ref().ok_or(ApiError::JobNotInitialized)?;
    if !state.allow_manual_trigger {
        return Err(ApiError::ManualTriggerDisabled);
    }

    info!("收到手动触发经济更新的请求");
    let result = job.execute_manual().await?;
    Ok(success(result))
}
