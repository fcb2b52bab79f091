use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use statecraft_job::EconomicJobController;

use crate::handlers::{
    economic_job::{execute_economic_job, get_economic_job_status},
    health::health_check,
};

/// API应用状态
///
/// 控制器以显式注入的可选句柄传入：测试配置下任务不会被构造，
/// 此时运维端点返回未初始化语义。
#[derive(Clone)]
pub struct AppState {
    pub job: Option<Arc<EconomicJobController>>,
    pub allow_manual_trigger: bool,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 经济更新任务运维API
        .route(
            "/api/admin/economic-job/status",
            get(get_economic_job_status),
        )
        .route(
            "/api/admin/economic-job/execute",
            post(execute_economic_job),
        )
        .with_state(state)
}
