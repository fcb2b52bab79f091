use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use statecraft_core::{EconomicJobConfig, StatecraftError, StatecraftResult};
use statecraft_domain::StateRepository;

use crate::cron_utils::CronScheduler;
use crate::executor::EconomicBatchExecutor;
use crate::status::{JobState, JobStatus, RunResult};

/// 经济更新任务控制器
///
/// 持有任务的生命周期和并发准入：任意时刻至多一轮更新在执行，
/// 无论触发来源是定时器还是手动调用。状态以不可变快照对外暴露，
/// 快照在临界区内整体替换，外部观察到的状态迁移是线性化的。
pub struct EconomicJobController {
    executor: EconomicBatchExecutor,
    cron: CronScheduler,
    inner: Mutex<Inner>,
    /// 定时器任务的停止信号发送端，start()布防，stop()撤防
    timer_shutdown: Mutex<Option<broadcast::Sender<()>>>,
}

struct Inner {
    /// start()后打开，stop()后关闭；关闭后不再准入任何新的一轮
    admission_open: bool,
    /// 当前是否有一轮在执行
    running: bool,
    /// 最近一次生成的状态快照，state字段与上面两个标志保持一致
    status: JobStatus,
}

impl EconomicJobController {
    pub fn new(
        state_repo: Arc<dyn StateRepository>,
        config: &EconomicJobConfig,
    ) -> StatecraftResult<Self> {
        let cron = CronScheduler::new(&config.schedule)?;
        let executor = EconomicBatchExecutor::new(
            state_repo,
            Duration::from_secs(config.pass_timeout_seconds),
        );

        Ok(Self {
            executor,
            cron,
            inner: Mutex::new(Inner {
                admission_open: false,
                running: false,
                status: JobStatus::stopped(&config.schedule),
            }),
            timer_shutdown: Mutex::new(None),
        })
    }

    /// 启动任务：打开准入并布防定时器
    ///
    /// 幂等：已启动时记录警告并返回当前状态，不产生副作用。
    pub fn start(self: &Arc<Self>) -> JobStatus {
        let status = {
            let mut inner = self.inner.lock().unwrap();
            if inner.admission_open {
                warn!("经济更新任务已启动，忽略重复的start调用");
                return inner.status.clone();
            }

            inner.admission_open = true;
            inner.status.state = if inner.running {
                JobState::Running
            } else {
                JobState::Idle
            };
            inner.status.next_scheduled_at = self.cron.next_fire_time(Utc::now());
            inner.status.clone()
        };

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        tokio::spawn(Self::timer_loop(Arc::clone(self), shutdown_rx));
        *self.timer_shutdown.lock().unwrap() = Some(shutdown_tx);

        info!(
            "经济更新任务已启动, 调度: {} ({}), 下次执行: {:?}",
            self.cron.expression(),
            self.cron.frequency_description(),
            status.next_scheduled_at
        );
        status
    }

    /// 停止任务：撤防定时器并关闭准入
    ///
    /// 非阻塞，可在关闭信号处理路径上调用。不中断进行中的一轮，
    /// 该轮照常跑完，但之后不再准入新的一轮（定时或手动）。
    pub fn stop(&self) {
        // 只发停止信号，不abort定时器任务：定时触发的一轮跑在该任务上，
        // 中途取消会让RUNNING标志永远无法复位
        if let Some(shutdown_tx) = self.timer_shutdown.lock().unwrap().take() {
            let _ = shutdown_tx.send(());
        }

        let mut inner = self.inner.lock().unwrap();
        if !inner.admission_open && !inner.running {
            debug!("经济更新任务已处于停止状态");
            return;
        }

        inner.admission_open = false;
        inner.status.next_scheduled_at = None;
        if inner.running {
            // 快照保持RUNNING，本轮结束时落到STOPPED
            info!("经济更新任务停止中，等待进行中的一轮跑完");
        } else {
            inner.status.state = JobState::Stopped;
            info!("经济更新任务已停止");
        }
    }

    /// 返回当前状态快照，不阻塞、不失败
    pub fn get_status(&self) -> JobStatus {
        self.inner.lock().unwrap().status.clone()
    }

    /// 手动触发一轮经济更新，调用方同步等待结果
    ///
    /// 正在运行时返回 `JobAlreadyRunning`，未启动时返回 `JobNotStarted`，
    /// 两种情况下都不影响现有状态。
    pub async fn execute_manual(&self) -> StatecraftResult<RunResult> {
        self.admit()?;
        info!("手动触发经济更新");

        let result = self.executor.run_pass().await;
        self.complete(&result);
        result
    }

    /// 定时触发入口：与手动触发走同一条准入路径
    ///
    /// 上一轮未结束时本次触发直接丢弃，不排队不重试，避免积压。
    pub(crate) async fn handle_tick(&self) {
        match self.admit() {
            Ok(()) => {
                debug!("定时触发经济更新");
                let result = self.executor.run_pass().await;
                if let Err(e) = &result {
                    error!("本轮经济更新失败: {e}");
                }
                self.complete(&result);
            }
            Err(StatecraftError::JobAlreadyRunning) => {
                warn!("上一轮经济更新尚未结束，丢弃本次定时触发");
            }
            Err(_) => {
                debug!("经济更新任务已停止，忽略定时触发");
            }
        }
    }

    /// 准入临界区：检查并完成 IDLE→RUNNING 迁移
    ///
    /// 开始时间戳与状态迁移在同一临界区内写入，外部不可能观察到
    /// 没有开始时间的RUNNING状态。
    fn admit(&self) -> StatecraftResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.running {
            return Err(StatecraftError::JobAlreadyRunning);
        }
        if !inner.admission_open {
            return Err(StatecraftError::JobNotStarted);
        }

        inner.running = true;
        inner.status.state = JobState::Running;
        inner.status.last_run_started_at = Some(Utc::now());
        inner.status.last_run_finished_at = None;
        Ok(())
    }

    /// 收尾临界区：折叠本轮结果并退出RUNNING
    fn complete(&self, result: &StatecraftResult<RunResult>) {
        let mut inner = self.inner.lock().unwrap();
        inner.running = false;

        match result {
            Ok(run) => {
                inner.status.last_run_started_at = Some(run.started_at);
                inner.status.last_run_finished_at = Some(run.finished_at);
                inner.status.last_run_outcome = Some(run.outcome());
                inner.status.last_run_processed_count = run.processed_count;
                inner.status.last_run_failed_count = run.failed_count;
            }
            Err(_) => {
                // 拉取阶段失败：没有任何国家被处理
                inner.status.last_run_finished_at = Some(Utc::now());
                inner.status.last_run_outcome = Some(crate::status::RunOutcome::Failure);
                inner.status.last_run_processed_count = 0;
                inner.status.last_run_failed_count = 0;
            }
        }

        if inner.admission_open {
            inner.status.state = JobState::Idle;
        } else {
            // 本轮执行期间收到了stop()
            inner.status.state = JobState::Stopped;
            inner.status.next_scheduled_at = None;
        }
    }

    /// 定时器任务：睡到下一个CRON触发点，醒来后走准入路径
    ///
    /// 停止信号只打断等待，不打断正在执行的一轮；一轮执行期间收到
    /// 停止信号时，该轮收尾后在下一次循环检查准入标志退出。
    async fn timer_loop(controller: Arc<Self>, mut shutdown_rx: broadcast::Receiver<()>) {
        loop {
            let next = match controller.cron.next_fire_time(Utc::now()) {
                Some(next) => next,
                None => {
                    warn!("CRON表达式没有后续触发时间，定时器退出");
                    break;
                }
            };

            {
                let mut inner = controller.inner.lock().unwrap();
                if !inner.admission_open {
                    break;
                }
                inner.status.next_scheduled_at = Some(next);
            }

            let wait = (next - Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO);

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    controller.handle_tick().await;
                }
                _ = shutdown_rx.recv() => {
                    debug!("定时器收到停止信号，退出");
                    break;
                }
            }
        }
    }
}
