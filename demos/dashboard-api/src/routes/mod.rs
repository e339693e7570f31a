pub mod dashboard;
pub mod filters;
pub mod meta;
