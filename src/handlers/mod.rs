pub mod analytics;
pub mod completions;
pub mod habits;
pub mod health;
