pub mod economic_job;
pub mod health;
