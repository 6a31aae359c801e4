use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::record::{is_contract_id, validate_contract_id, ContractAddresses, DeploymentRecord};

pub const RPC_URL_VAR: &str = "ARCCREDIT_RPC_URL";
pub const NETWORK_PASSPHRASE_VAR: &str = "ARCCREDIT_NETWORK_PASSPHRASE";
pub const USDC_ADDRESS_VAR: &str = "ARCCREDIT_USDC_ADDRESS";
pub const EURC_ADDRESS_VAR: &str = "ARCCREDIT_EURC_ADDRESS";
pub const RATE_MODEL_ADDRESS_VAR: &str = "ARCCREDIT_RATE_MODEL_ADDRESS";
pub const LENDING_ADDRESS_VAR: &str = "ARCCREDIT_LENDING_ADDRESS";
pub const DEPLOYMENT_FILE_VAR: &str = "ARCCREDIT_DEPLOYMENT_FILE";

pub const DEFAULT_RPC_URL: &str = "http://localhost:8000/soroban/rpc";
pub const DEFAULT_NETWORK_PASSPHRASE: &str = "Standalone Network ; February 2017";
pub const DEFAULT_DEPLOYMENT_FILE: &str = "deployment.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub passphrase: String,
}

/// Addresses and network settings, resolved once and passed to whatever
/// talks to the contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub addresses: ContractAddresses,
    /// Deployer and block of the record that filled any gaps, if one was used.
    pub deployment: Option<(String, u32)>,
}

impl AppConfig {
    /// Load from the process environment (plus a `.env` file, if present),
    /// falling back to the deployment record named by
    /// `ARCCREDIT_DEPLOYMENT_FILE` (default `deployment.json`).
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_process_env()
    }

    /// Same as [`AppConfig::from_env`] with an explicit env file, which must exist.
    /// Variables already set in the process win over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_process_env()
    }

    fn from_process_env() -> Result<Self, ConfigError> {
        let path = std::env::var(DEPLOYMENT_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DEPLOYMENT_FILE));
        let record = load_optional_record(&path)?;
        Self::resolve(|key| std::env::var(key).ok(), record.as_ref())
    }

    /// Resolve every field from `lookup` first and `record` second. All
    /// missing and malformed fields are reported together.
    pub fn resolve<F>(lookup: F, record: Option<&DeploymentRecord>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network = NetworkConfig {
            rpc_url: read(RPC_URL_VAR).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            passphrase: read(NETWORK_PASSPHRASE_VAR)
                .unwrap_or_else(|| DEFAULT_NETWORK_PASSPHRASE.to_string()),
        };

        let from_record = record.map(|r| &r.addresses);
        let mut missing = Vec::new();
        let mut malformed = Vec::new();
        let mut used_record = false;
        let mut pick = |field: &'static str, var: &'static str, fallback: Option<&String>| {
            let (value, source) = match (read(var), fallback) {
                (Some(value), _) => (value, "env"),
                (None, Some(value)) => {
                    used_record = true;
                    (value.clone(), "deployment record")
                }
                (None, None) => {
                    missing.push(var);
                    return String::new();
                }
            };
            if !is_contract_id(&value) {
                malformed.push((field, value.clone()));
            }
            debug!(field, source, "contract address resolved");
            value
        };

        let addresses = ContractAddresses {
            usdc: pick("usdc", USDC_ADDRESS_VAR, from_record.map(|a| &a.usdc)),
            eurc: pick("eurc", EURC_ADDRESS_VAR, from_record.map(|a| &a.eurc)),
            rate_model: pick(
                "rateModel",
                RATE_MODEL_ADDRESS_VAR,
                from_record.map(|a| &a.rate_model),
            ),
            lending: pick("lending", LENDING_ADDRESS_VAR, from_record.map(|a| &a.lending)),
        };

        if !missing.is_empty() || !malformed.is_empty() {
            warn!(?missing, ?malformed, "contract addresses not usable");
            return Err(ConfigError::Invalid { missing, malformed });
        }

        let deployment = record
            .filter(|_| used_record)
            .map(|r| (r.deployer.clone(), r.deployment_block));
        info!(
            rpc_url = %network.rpc_url,
            lending = %addresses.lending,
            from_record = used_record,
            "configuration loaded"
        );
        Ok(Self {
            network,
            addresses,
            deployment,
        })
    }

    pub fn lending_address(&self) -> &str {
        &self.addresses.lending
    }
}

/// A missing record is not an error: the environment may carry everything.
fn load_optional_record(path: &Path) -> Result<Option<DeploymentRecord>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no deployment record");
        return Ok(None);
    }
    DeploymentRecord::load(path).map(Some)
}

/// Validate a single address supplied out of band, e.g. on a command line.
pub fn parse_contract_address(field: &'static str, value: &str) -> Result<String, ConfigError> {
    validate_contract_id(field, value)?;
    Ok(value.to_string())
}
