//! Ports (traits) decoupling services from infrastructure.

pub mod errors;
pub mod meal_repository;
pub mod random_source;

pub use errors::StoreError;
pub use meal_repository::MealRepository;
pub use random_source::RandomSource;
