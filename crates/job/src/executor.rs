use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, warn};

use statecraft_core::{StatecraftError, StatecraftResult};
use statecraft_domain::{EconomicModel, SimulatedState, StateRepository};

use crate::status::{FailureDetail, RunResult};

/// 经济更新批处理执行器
///
/// 负责执行一轮完整的经济更新：拉取所有参与模拟的国家，逐个重算
/// 并持久化。单个国家的失败被隔离记录，不会中断整轮处理；只有
/// 拉取阶段的仓储故障才会让整轮失败。
pub struct EconomicBatchExecutor {
    state_repo: Arc<dyn StateRepository>,
    pass_timeout: Duration,
}

impl EconomicBatchExecutor {
    pub fn new(state_repo: Arc<dyn StateRepository>, pass_timeout: Duration) -> Self {
        Self {
            state_repo,
            pass_timeout,
        }
    }

    /// 执行一轮经济更新
    ///
    /// 按仓储返回顺序依次处理，不重排、不并行，保证可测试的确定性。
    /// 整轮超时后放弃剩余国家，已提交的写入不回滚。
    pub async fn run_pass(&self) -> StatecraftResult<RunResult> {
        let started_at = Utc::now();
        info!("开始执行经济更新");

        // 拉取失败时整轮失败，此时尚未处理任何国家
        let mut states = self.state_repo.list_eligible().await.map_err(|e| {
            error!("拉取国家列表失败，本轮经济更新中止: {e}");
            e
        })?;

        let total = states.len();
        debug!("本轮共 {total} 个国家待更新");

        let deadline = Instant::now() + self.pass_timeout;
        let mut processed_count = 0usize;
        let mut failures: Vec<FailureDetail> = Vec::new();

        let mut index = 0;
        while index < states.len() {
            let state = &mut states[index];
            let state_id = state.id;

            match timeout_at(deadline, self.update_one(state)).await {
                Ok(Ok(())) => {
                    processed_count += 1;
                }
                Ok(Err(e)) => {
                    // 条目级失败只记录，继续处理下一个国家
                    warn!("国家 {state_id} 经济更新失败: {e}");
                    failures.push(FailureDetail {
                        state_id,
                        reason: e.to_string(),
                    });
                }
                Err(_) => {
                    warn!(
                        "本轮经济更新超时（{}秒），放弃剩余 {} 个国家",
                        self.pass_timeout.as_secs(),
                        states.len() - index
                    );
                    let reason = StatecraftError::PassTimeout.to_string();
                    for remaining in &states[index..] {
                        failures.push(FailureDetail {
                            state_id: remaining.id,
                            reason: reason.clone(),
                        });
                    }
                    break;
                }
            }

            index += 1;
        }

        let result = RunResult {
            started_at,
            finished_at: Utc::now(),
            processed_count,
            failed_count: failures.len(),
            failures,
        };

        info!(
            "经济更新完成: 总数={}, 成功={}, 失败={}",
            total, result.processed_count, result.failed_count
        );

        Ok(result)
    }

    /// 重算并持久化单个国家，每次写入独立提交
    async fn update_one(&self, state: &mut SimulatedState) -> StatecraftResult<()> {
        EconomicModel::recompute(state)?;
        self.state_repo.persist(state).await?;
        debug!("国家 {} 经济更新已提交", state.id);
        Ok(())
    }
}
