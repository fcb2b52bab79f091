use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 任务生命周期状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JobState {
    #[serde(rename = "STOPPED")]
    Stopped,
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "RUNNING")]
    Running,
}

/// 单轮更新的整体结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunOutcome {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "PARTIAL_FAILURE")]
    PartialFailure,
    #[serde(rename = "FAILURE")]
    Failure,
}

/// 单个国家的失败记录，按处理顺序保存
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureDetail {
    pub state_id: i64,
    pub reason: String,
}

/// 一轮经济更新的执行记录
///
/// 由批处理执行器在本轮结束时生成，控制器将其折叠进下一份状态快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub processed_count: usize,
    pub failed_count: usize,
    pub failures: Vec<FailureDetail>,
}

impl RunResult {
    pub fn total_fetched(&self) -> usize {
        self.processed_count + self.failed_count
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.failed_count == 0 {
            RunOutcome::Success
        } else if self.processed_count == 0 {
            RunOutcome::Failure
        } else {
            RunOutcome::PartialFailure
        }
    }
}

/// 任务状态快照
///
/// 每次查询都返回一份独立的不可变快照，构造后不再修改，
/// 控制器在临界区内整体替换内部引用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub state: JobState,
    pub last_run_started_at: Option<DateTime<Utc>>,
    pub last_run_finished_at: Option<DateTime<Utc>>,
    pub last_run_outcome: Option<RunOutcome>,
    pub last_run_processed_count: usize,
    pub last_run_failed_count: usize,
    pub next_scheduled_at: Option<DateTime<Utc>>,
    pub schedule_expression: String,
}

impl JobStatus {
    pub fn stopped(schedule_expression: &str) -> Self {
        Self {
            state: JobState::Stopped,
            last_run_started_at: None,
            last_run_finished_at: None,
            last_run_outcome: None,
            last_run_processed_count: 0,
            last_run_failed_count: 0,
            next_scheduled_at: None,
            schedule_expression: schedule_expression.to_string(),
        }
    }
}
