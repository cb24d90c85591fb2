pub mod config;
pub mod errors;
pub mod handlers;
pub mod probe;
pub mod relay;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use errors::app_error::{AppError, AppResult};
pub use relay::{DeliveryClient, InboundEnvelope, OutboundEnvelope, SkillRelay, WorkflowEndpoint};
pub use state::AppState;
