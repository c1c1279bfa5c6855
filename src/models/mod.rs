pub mod expense;
pub mod income;
pub mod month;
pub mod target;
