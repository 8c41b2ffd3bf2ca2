pub mod connection;
pub mod meal_repo;

pub use connection::DatabaseConnection;
pub use meal_repo::SqliteMealRepository;
