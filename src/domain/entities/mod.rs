pub mod chart;
pub mod edit;
pub mod score_table;
pub mod selection;
pub mod source;
