pub mod chart_renderer;
pub mod table_reader;
