pub mod demand;
pub mod form;
pub mod history;
pub mod reporting;
