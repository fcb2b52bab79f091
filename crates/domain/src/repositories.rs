//! 领域仓储抽象
//!
//! 定义数据访问的抽象接口，遵循依赖倒置原则

use async_trait::async_trait;

use crate::entities::SimulatedState;
use statecraft_core::StatecraftResult;

/// 国家仓储抽象
///
/// 经济更新任务只通过这两个方法访问数据，连接管理由实现方负责。
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// 按插入顺序返回所有参与经济更新的国家
    async fn list_eligible(&self) -> StatecraftResult<Vec<SimulatedState>>;
    /// 持久化单个国家的经济属性，每次写入独立提交
    async fn persist(&self, state: &SimulatedState) -> StatecraftResult<()>;
}
