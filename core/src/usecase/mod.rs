pub mod advisor;
pub mod history;
