pub mod auth;
pub mod bookings;
pub mod cookie;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod router;
pub mod state;
pub mod tutorials;

// Re-export the router builder and state to make them easily accessible
// to the binary and the integration tests.
pub use middleware::require_auth;
pub use router::build_router;
pub use state::AppState;
