use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 模拟国家实体
///
/// 经济属性由经济更新任务周期性重算，实体生命周期归仓储层管理。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedState {
    pub id: i64,
    pub name: String,
    pub population: i64,
    /// 国内生产总值（单位：百万）
    pub gdp: f64,
    /// 国库余额（单位：百万）
    pub treasury: f64,
    /// 税率（0.0到1.0）
    pub tax_rate: f64,
    /// 社会稳定度（0.0到1.0）
    pub stability: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulatedState {
    pub fn is_eligible(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_follows_active_flag() {
        let mut state = SimulatedState {
            id: 1,
            name: "Aragon".to_string(),
            population: 1_000_000,
            gdp: 5000.0,
            treasury: 200.0,
            tax_rate: 0.2,
            stability: 0.8,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(state.is_eligible());
        state.is_active = false;
        assert!(!state.is_eligible());
    }
}
