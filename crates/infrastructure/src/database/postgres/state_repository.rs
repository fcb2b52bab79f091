use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use statecraft_core::StatecraftResult;
use statecraft_domain::{SimulatedState, StateRepository};

/// 基于PostgreSQL的国家仓储实现
///
/// 连接池由应用层创建并在整个进程内共享，这里不假设独占访问。
pub struct PostgresStateRepository {
    pool: PgPool,
}

impl PostgresStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_state(row: &sqlx::postgres::PgRow) -> StatecraftResult<SimulatedState> {
        Ok(SimulatedState {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            population: row.try_get("population")?,
            gdp: row.try_get("gdp")?,
            treasury: row.try_get("treasury")?,
            tax_rate: row.try_get("tax_rate")?,
            stability: row.try_get("stability")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl StateRepository for PostgresStateRepository {
    #[instrument(skip(self))]
    async fn list_eligible(&self) -> StatecraftResult<Vec<SimulatedState>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, population, gdp, treasury, tax_rate, stability,
                   is_active, created_at, updated_at
            FROM simulated_states
            WHERE is_active = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let states = rows
            .iter()
            .map(Self::row_to_state)
            .collect::<StatecraftResult<Vec<_>>>()?;

        debug!("拉取到 {} 个参与经济更新的国家", states.len());
        Ok(states)
    }

    #[instrument(skip(self, state), fields(state_id = %state.id))]
    async fn persist(&self, state: &SimulatedState) -> StatecraftResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE simulated_states
            SET gdp = $2, treasury = $3, stability = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(state.id)
        .bind(state.gdp)
        .bind(state.treasury)
        .bind(state.stability)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(statecraft_core::StatecraftError::state_not_found(state.id));
        }

        debug!("国家 {} 经济属性已写入", state.id);
        Ok(())
    }
}
