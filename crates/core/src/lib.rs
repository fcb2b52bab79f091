pub mod config;
pub mod errors;

pub use config::{ApiConfig, AppConfig, DatabaseConfig, EconomicJobConfig};
pub use errors::{StatecraftError, StatecraftResult};
