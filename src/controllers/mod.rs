pub mod upload_controller;
pub mod vehicle_controller;
