pub mod chart;
pub mod log;
pub mod pagination;
pub mod tracker;
