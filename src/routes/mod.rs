pub mod upload_routes;
pub mod vehicle_routes;
