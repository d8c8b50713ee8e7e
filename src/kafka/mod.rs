mod admin;
mod client;
mod groups;
mod meta;
pub mod security;
mod service;
pub mod types;

pub use service::KafkaModule;
pub use types::KafkaConfig;
