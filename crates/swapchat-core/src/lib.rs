//! In-memory messaging core for the swap marketplace chat: conversation
//! store, notification hub, and the simulated inbound generator that stands
//! in for a real transport.

pub mod config;
pub mod error;
mod fixtures;
pub mod hub;
pub mod models;
pub mod service;
pub mod simulator;
pub mod store;
pub mod tracing_setup;

pub use config::{ServiceConfig, SimulatorConfig};
pub use error::StoreError;
pub use service::MessagingService;
pub use simulator::InboundSimulator;
