pub mod connection;
pub mod expense_repository;
pub mod income_repository;
pub mod target_repository;
