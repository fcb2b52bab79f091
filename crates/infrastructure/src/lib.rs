pub mod database;

pub use database::postgres::PostgresStateRepository;
