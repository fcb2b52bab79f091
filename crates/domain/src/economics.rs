use chrono::Utc;

use crate::entities::SimulatedState;
use statecraft_core::{StatecraftError, StatecraftResult};

/// 基础年化增长率（按每轮更新折算前的基准值）
const BASE_GROWTH_RATE: f64 = 0.03;
/// 税率对增长的抑制系数
const TAX_DRAG: f64 = 0.05;
/// 稳定度漂移步长
const STABILITY_DRIFT: f64 = 0.01;
/// 经济繁荣线：人均GDP高于该值时稳定度上升
const PROSPERITY_THRESHOLD: f64 = 0.004;

/// 经济重算模型
///
/// 对单个国家做一次确定性的经济属性更新。公式本身不是规范性的，
/// 但必须保持确定性并拒绝产生非有限数值的结果。
pub struct EconomicModel;

impl EconomicModel {
    /// 就地重算一个国家的经济属性
    pub fn recompute(state: &mut SimulatedState) -> StatecraftResult<()> {
        if !state.gdp.is_finite() || !state.treasury.is_finite() {
            return Err(StatecraftError::recompute_error(format!(
                "国家 {} 的经济属性已损坏: gdp={}, treasury={}",
                state.id, state.gdp, state.treasury
            )));
        }
        if !(0.0..=1.0).contains(&state.tax_rate) {
            return Err(StatecraftError::recompute_error(format!(
                "国家 {} 的税率越界: {}",
                state.id, state.tax_rate
            )));
        }

        // 增长受税负和稳定度共同调制
        let growth = BASE_GROWTH_RATE * state.stability - TAX_DRAG * state.tax_rate;
        let new_gdp = state.gdp * (1.0 + growth);

        // 税收入库
        let tax_income = new_gdp * state.tax_rate;
        let new_treasury = state.treasury + tax_income;

        // 人均GDP决定稳定度漂移方向
        let per_capita = if state.population > 0 {
            new_gdp / state.population as f64
        } else {
            0.0
        };
        let drift = if per_capita >= PROSPERITY_THRESHOLD {
            STABILITY_DRIFT
        } else {
            -STABILITY_DRIFT
        };
        let new_stability = (state.stability + drift).clamp(0.0, 1.0);

        if !new_gdp.is_finite() || !new_treasury.is_finite() {
            return Err(StatecraftError::recompute_error(format!(
                "国家 {} 的重算结果非有限数值",
                state.id
            )));
        }

        state.gdp = new_gdp;
        state.treasury = new_treasury;
        state.stability = new_stability;
        state.updated_at = Utc::now();

        Ok(())
    }
}
