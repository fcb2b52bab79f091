//! 经济更新任务
//!
//! 自调度的后台任务：按CRON表达式周期性地对所有参与模拟的国家
//! 重算经济属性，对外暴露实时状态，支持受控的手动触发，并保证
//! 任意时刻至多只有一轮更新在执行。

pub mod controller;
pub mod cron_utils;
pub mod executor;
pub mod status;

#[cfg(test)]
pub mod test_utils;

pub use controller::EconomicJobController;
pub use cron_utils::CronScheduler;
pub use executor::EconomicBatchExecutor;
pub use status::{FailureDetail, JobState, JobStatus, RunOutcome, RunResult};
