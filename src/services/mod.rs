pub mod id_token_service;
pub mod rule_pipeline;

pub use id_token_service::*;
pub use rule_pipeline::*;
