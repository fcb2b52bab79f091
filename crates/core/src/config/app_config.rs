use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    api::ApiConfig, database::DatabaseConfig, economic_job::EconomicJobConfig,
    validation::ConfigValidator,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub economic_job: EconomicJobConfig,
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/statecraft".to_string(),
                max_connections: 10,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            economic_job: EconomicJobConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置：指定路径 > 默认路径 > 内置默认值，环境变量STATECRAFT_*可覆盖
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = [
                "config/statecraft.toml",
                "statecraft.toml",
                "/etc/statecraft/config.toml",
            ];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("database.url", "postgresql://localhost/statecraft")?
                    .set_default("database.max_connections", 10)?
                    .set_default("database.min_connections", 1)?
                    .set_default("database.connection_timeout_seconds", 30)?
                    .set_default("database.idle_timeout_seconds", 600)?
                    .set_default("economic_job.enabled", true)?
                    .set_default("economic_job.schedule", "0 0 * * * *")?
                    .set_default("economic_job.pass_timeout_seconds", 300)?
                    .set_default("economic_job.allow_manual_trigger", false)?
                    .set_default("api.enabled", true)?
                    .set_default("api.bind_address", "0.0.0.0:8080")?
                    .set_default("api.cors_enabled", true)?
                    .set_default("api.request_timeout_seconds", 30)?;
            }
        }

        // 环境变量覆盖，例如 STATECRAFT_DATABASE_URL
        builder = builder.add_source(
            Environment::with_prefix("STATECRAFT")
                .separator("_")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("解析配置失败")?;

        config.validate_all().context("配置校验失败")?;

        Ok(config)
    }

    fn validate_all(&self) -> Result<()> {
        self.database.validate()?;
        self.economic_job.validate()?;
        self.api.validate()?;
        Ok(())
    }
}
