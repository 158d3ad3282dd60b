pub mod types;

pub mod bbox;
pub mod math;
