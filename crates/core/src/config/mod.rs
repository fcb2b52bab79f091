pub mod api;
pub mod app_config;
pub mod database;
pub mod economic_job;
pub mod validation;

pub use api::ApiConfig;
pub use app_config::AppConfig;
pub use database::DatabaseConfig;
pub use economic_job::EconomicJobConfig;
pub use validation::ConfigValidator;
