// Configuration loaded once at startup

pub mod app;
pub mod database;
pub mod seeding;

pub use app::AppConfig;
pub use database::DatabaseConfig;
pub use seeding::DatabaseSeeder;
