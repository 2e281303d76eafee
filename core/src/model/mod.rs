pub mod day_state;
pub mod metrics;
pub mod month;
pub mod settings;
