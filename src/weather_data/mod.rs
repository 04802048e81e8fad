pub mod data_loader;
pub mod error;
pub mod observation_table;
pub mod station_fallback;
