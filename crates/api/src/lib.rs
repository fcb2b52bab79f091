pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use statecraft_core::ApiConfig;
use statecraft_job::EconomicJobController;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use routes::AppState;

/// 创建API应用
///
/// `job`为None时（测试配置下任务未构造）运维端点返回503，
/// 健康检查返回字面量 "not_initialized"。
pub fn create_app(
    job: Option<Arc<EconomicJobController>>,
    api_config: &ApiConfig,
    allow_manual_trigger: bool,
) -> Router {
    let state = AppState {
        job,
        allow_manual_trigger,
    };

    let mut router = routes::create_routes(state).layer(TraceLayer::new_for_http());
    if api_config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    use statecraft_core::{EconomicJobConfig, StatecraftResult};
    use statecraft_domain::{SimulatedState, StateRepository};

    struct InMemoryStateRepository {
        states: Mutex<Vec<SimulatedState>>,
    }

    impl InMemoryStateRepository {
        fn with_states(count: i64) -> Self {
            let states = (1..=count)
                .map(|id| SimulatedState {
                    id,
                    name: format!("State-{id}"),
                    population: 1_000_000,
                    gdp: 5000.0,
                    treasury: 200.0,
                    tax_rate: 0.2,
                    stability: 0.8,
                    is_active: true,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .collect();
            Self {
                states: Mutex::new(states),
            }
        }
    }

    #[async_trait]
    impl StateRepository for InMemoryStateRepository {
        async fn list_eligible(&self) -> StatecraftResult<Vec<SimulatedState>> {
            Ok(self.states.lock().unwrap().clone())
        }

        async fn persist(&self, state: &SimulatedState) -> StatecraftResult<()> {
            let mut states = self.states.lock().unwrap();
            if let Some(stored) = states.iter_mut().find(|s| s.id == state.id) {
                *stored = state.clone();
            }
            Ok(())
        }
    }

    fn test_controller(count: i64) -> Arc<EconomicJobController> {
        let repo = Arc::new(InMemoryStateRepository::with_states(count));
        let config = EconomicJobConfig {
            enabled: true,
            schedule: "0 0 * * * *".to_string(),
            pass_timeout_seconds: 30,
            allow_manual_trigger: true,
        };
        Arc::new(EconomicJobController::new(repo, &config).unwrap())
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_not_initialized_without_controller() {
        let app = create_app(None, &ApiConfig::default(), false);
        let (status, body) = send(app, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["economic_job_status"], "not_initialized");
    }

    #[tokio::test]
    async fn test_health_embeds_job_status() {
        let controller = test_controller(2);
        controller.start();
        let app = create_app(Some(Arc::clone(&controller)), &ApiConfig::default(), false);

        let (status, body) = send(app, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["economic_job_status"]["state"], "IDLE");

        controller.stop();
    }

    #[tokio::test]
    async fn test_job_status_endpoint_503_without_controller() {
        let app = create_app(None, &ApiConfig::default(), false);
        let (status, body) = send(app, "GET", "/api/admin/economic-job/status").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_job_status_endpoint_returns_snapshot() {
        let controller = test_controller(2);
        controller.start();
        let app = create_app(Some(Arc::clone(&controller)), &ApiConfig::default(), false);

        let (status, body) = send(app, "GET", "/api/admin/economic-job/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["state"], "IDLE");
        assert!(!body["data"]["next_scheduled_at"].is_null());

        controller.stop();
    }

    #[tokio::test]
    async fn test_execute_forbidden_when_manual_trigger_disabled() {
        let controller = test_controller(2);
        controller.start();
        let app = create_app(Some(Arc::clone(&controller)), &ApiConfig::default(), false);

        let (status, body) = send(app, "POST", "/api/admin/economic-job/execute").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);

        controller.stop();
    }

    #[tokio::test]
    async fn test_execute_runs_pass_and_returns_result() {
        let controller = test_controller(3);
        controller.start();
        let app = create_app(Some(Arc::clone(&controller)), &ApiConfig::default(), true);

        let (status, body) = send(app, "POST", "/api/admin/economic-job/execute").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["processed_count"], 3);
        assert_eq!(body["data"]["failed_count"], 0);

        controller.stop();
    }

    #[tokio::test]
    async fn test_execute_on_stopped_job_is_500_with_message() {
        let controller = test_controller(2);
        let app = create_app(Some(controller), &ApiConfig::default(), true);

        let (status, body) = send(app, "POST", "/api/admin/economic-job/execute").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "JOB_EXECUTION_REJECTED");
    }
}
