#[cfg(test)]
pub mod mocks {
    //! In-memory mock of the state repository with scriptable faults.

    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::watch;

    use statecraft_core::{StatecraftError, StatecraftResult};
    use statecraft_domain::{SimulatedState, StateRepository};

    pub fn sample_state(id: i64) -> SimulatedState {
        SimulatedState {
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
        }
    }

    #[derive(Clone)]
    pub struct MockStateRepository {
        inner: Arc<Inner>,
    }

    struct Inner {
        states: Mutex<Vec<SimulatedState>>,
        fail_list: AtomicBool,
        fail_persist: Mutex<HashSet<i64>>,
        hang_persist: Mutex<HashSet<i64>>,
        persist_count: AtomicUsize,
        persist_started: AtomicUsize,
        gate: Mutex<Option<watch::Receiver<bool>>>,
    }

    impl MockStateRepository {
        pub fn with_states(count: i64) -> Self {
            let states = (1..=count).map(sample_state).collect();
            Self {
                inner: Arc::new(Inner {
                    states: Mutex::new(states),
                    fail_list: AtomicBool::new(false),
                    fail_persist: Mutex::new(HashSet::new()),
                    hang_persist: Mutex::new(HashSet::new()),
                    persist_count: AtomicUsize::new(0),
                    persist_started: AtomicUsize::new(0),
                    gate: Mutex::new(None),
                }),
            }
        }

        /// 让 list_eligible 返回仓储错误
        pub fn fail_list(&self) {
            self.inner.fail_list.store(true, Ordering::SeqCst);
        }

        /// 让指定国家的持久化失败
        pub fn fail_persist_for(&self, state_id: i64) {
            self.inner.fail_persist.lock().unwrap().insert(state_id);
        }

        /// 让指定国家的持久化永久挂起（用于超时测试）
        pub fn hang_persist_for(&self, state_id: i64) {
            self.inner.hang_persist.lock().unwrap().insert(state_id);
        }

        /// 把指定国家的经济属性破坏成非法值
        pub fn corrupt_state(&self, state_id: i64) {
            let mut states = self.inner.states.lock().unwrap();
            if let Some(state) = states.iter_mut().find(|s| s.id == state_id) {
                state.gdp = f64::NAN;
            }
        }

        /// 阻塞所有持久化直到返回的sender发送false（用于并发准入测试）
        pub fn gate_persist(&self) -> watch::Sender<bool> {
            let (tx, rx) = watch::channel(true);
            *self.inner.gate.lock().unwrap() = Some(rx);
            tx
        }

        pub fn persist_count(&self) -> usize {
            self.inner.persist_count.load(Ordering::SeqCst)
        }

        /// 已进入persist调用的次数（含被阻塞的）
        pub fn persist_started(&self) -> usize {
            self.inner.persist_started.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StateRepository for MockStateRepository {
        async fn list_eligible(&self) -> StatecraftResult<Vec<SimulatedState>> {
            if self.inner.fail_list.load(Ordering::SeqCst) {
                return Err(StatecraftError::database_error("模拟的仓储连接失败"));
            }
            Ok(self.inner.states.lock().unwrap().clone())
        }

        async fn persist(&self, state: &SimulatedState) -> StatecraftResult<()> {
            self.inner.persist_started.fetch_add(1, Ordering::SeqCst);

            if self.inner.hang_persist.lock().unwrap().contains(&state.id) {
                std::future::pending::<()>().await;
            }

            let gate = self.inner.gate.lock().unwrap().clone();
            if let Some(mut rx) = gate {
                while *rx.borrow() {
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            }

            if self.inner.fail_persist.lock().unwrap().contains(&state.id) {
                return Err(StatecraftError::database_error(format!(
                    "模拟的写入失败: 国家 {}",
                    state.id
                )));
            }

            let mut states = self.inner.states.lock().unwrap();
            match states.iter_mut().find(|s| s.id == state.id) {
                Some(stored) => {
                    *stored = state.clone();
                    self.inner.persist_count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
                None => Err(StatecraftError::state_not_found(state.id)),
            }
        }
    }
}
