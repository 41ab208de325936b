pub mod analysis_service;
pub mod edit_service;
pub mod export_service;
pub mod load_service;
