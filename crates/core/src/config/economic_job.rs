use serde::{Deserialize, Serialize};

use super::validation::{ConfigValidator, ValidationUtils};
use crate::errors::{StatecraftError, StatecraftResult};

/// 经济更新任务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicJobConfig {
    /// 是否在进程启动时启动任务（测试环境下设为false）
    pub enabled: bool,
    /// CRON调度表达式（秒 分 时 日 月 星期）
    pub schedule: String,
    /// 单轮更新的整体超时时间
    pub pass_timeout_seconds: u64,
    /// 是否允许通过管理接口手动触发（生产环境应设为false）
    pub allow_manual_trigger: bool,
}

impl Default for EconomicJobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 每小时整点执行
            schedule: "0 0 * * * *".to_string(),
            pass_timeout_seconds: 300,
            allow_manual_trigger: false,
        }
    }
}

impl ConfigValidator for EconomicJobConfig {
    fn validate(&self) -> StatecraftResult<()> {
        ValidationUtils::validate_not_empty(&self.schedule, "economic_job.schedule")?;
        ValidationUtils::validate_timeout_seconds(
            self.pass_timeout_seconds,
            "economic_job.pass_timeout_seconds",
        )?;

        // CRON表达式的完整解析由job crate负责，这里只做字段数量的粗检查
        let fields = self.schedule.split_whitespace().count();
        if !(6..=7).contains(&fields) {
            return Err(StatecraftError::Configuration(format!(
                "economic_job.schedule 必须是6或7段的CRON表达式，当前为{fields}段"
            )));
        }

        Ok(())
    }
}
