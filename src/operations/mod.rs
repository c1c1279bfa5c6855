pub mod add;
pub mod dashboard;
pub mod export;
pub mod format;
pub mod history;
pub mod remove;
pub mod settings;
pub mod simulate;
pub mod summary;
pub mod targets;
