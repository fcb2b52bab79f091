use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;

use statecraft_core::{StatecraftError, StatecraftResult};

/// CRON表达式解析和触发时间计算工具
pub struct CronScheduler {
    schedule: Schedule,
    expression: String,
}

impl CronScheduler {
    /// 创建新的CRON调度器
    pub fn new(cron_expr: &str) -> StatecraftResult<Self> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| StatecraftError::InvalidCron {
            expr: cron_expr.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            schedule,
            expression: cron_expr.to_string(),
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// 获取下一次触发时间
    pub fn next_fire_time(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next()
    }

    /// 获取从指定时间开始的多个触发时间
    pub fn upcoming_times(&self, from: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        self.schedule.after(&from).take(count).collect()
    }

    /// 获取触发频率描述
    pub fn frequency_description(&self) -> String {
        let upcoming = self.upcoming_times(Utc::now(), 2);
        if upcoming.len() >= 2 {
            let interval = upcoming[1] - upcoming[0];
            let seconds = interval.num_seconds();

            match seconds {
                s if s < 60 => format!("每{s}秒"),
                s if s < 3600 => format!("每{}分钟", s / 60),
                s if s < 86400 => format!("每{}小时", s / 3600),
                s if s < 604800 => format!("每{}天", s / 86400),
                s => format!("每{}周", s / 604800),
            }
        } else {
            "无法确定频率".to_string()
        }
    }
}
