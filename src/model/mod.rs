pub mod listing;
pub mod rules;
