pub mod thing_service;
pub mod venture_service;

pub use thing_service::ThingService;
pub use venture_service::VentureService;
