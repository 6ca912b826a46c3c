//! `Sensormesh` Server — request validation pipeline, behavior dispatch,
//! and the HTTP surface around them.

pub mod config;
pub mod domain;
pub mod network;
pub mod pipeline;
pub mod worker;

pub use config::{ConfigError, HeartbeatConfig, ServiceConfig};
pub use network::NetworkModule;
pub use pipeline::{Delegate, DispatchTable};
pub use worker::Heartbeat;
