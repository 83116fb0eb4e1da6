pub mod chart;
pub mod record;
pub mod record_field;
