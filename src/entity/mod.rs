pub mod measure_types;
pub mod sensors;
pub mod user_sensors;
pub mod users;
