use crate::errors::{StatecraftError, StatecraftResult};

/// 配置段校验接口
pub trait ConfigValidator {
    fn validate(&self) -> StatecraftResult<()>;
}

pub struct ValidationUtils;

impl ValidationUtils {
    pub fn validate_not_empty(value: &str, field: &str) -> StatecraftResult<()> {
        if value.trim().is_empty() {
            return Err(StatecraftError::config_error(format!("{field} 不能为空")));
        }
        Ok(())
    }

    pub fn validate_count(value: usize, field: &str) -> StatecraftResult<()> {
        if value == 0 {
            return Err(StatecraftError::config_error(format!("{field} 必须大于0")));
        }
        Ok(())
    }

    pub fn validate_timeout_seconds(value: u64, field: &str) -> StatecraftResult<()> {
        if value == 0 || value > 86_400 {
            return Err(StatecraftError::config_error(format!(
                "{field} 必须在1到86400秒之间"
            )));
        }
        Ok(())
    }
}
