//! Deployment record and runtime configuration for the ArcCredit contracts.
//!
//! Off-chain consumers (operational scripts, the UI backend) bind contract
//! addresses once at startup through [`AppConfig`]. Each address comes from
//! its environment variable first and from the deployment record second.

pub mod config;
pub mod error;
pub mod record;

pub use config::{AppConfig, NetworkConfig};
pub use error::ConfigError;
pub use record::{ContractAddresses, DeploymentRecord};
