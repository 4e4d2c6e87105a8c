/// API error types and handling
pub mod errors;
/// HTTP handlers for the user endpoints
pub mod handlers;
/// Request logging and response header middleware
pub mod middleware;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
