pub mod audit;
pub mod calls;
pub mod dashboard;
pub mod pulse;
