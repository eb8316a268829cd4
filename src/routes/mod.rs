pub mod estimation_routes;
