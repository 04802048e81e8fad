pub mod config;
pub mod date_range;
pub mod interval;
pub mod lat_lon;
pub mod request;
pub mod station;
