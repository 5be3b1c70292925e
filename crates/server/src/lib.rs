pub mod errors;
pub mod extract;
pub mod headers;
pub mod openapi;
pub mod reply;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
pub use state::ServerState;
