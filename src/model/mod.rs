pub mod series;
pub mod trace;
