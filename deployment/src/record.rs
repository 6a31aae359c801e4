use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

const STRKEY_LEN: usize = 56;

/// Addresses of the four deployed contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddresses {
    pub usdc: String,
    pub eurc: String,
    pub rate_model: String,
    pub lending: String,
}

impl ContractAddresses {
    /// Checks all four addresses and reports every malformed one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let malformed: Vec<(&'static str, String)> = [
            ("usdc", &self.usdc),
            ("eurc", &self.eurc),
            ("rateModel", &self.rate_model),
            ("lending", &self.lending),
        ]
        .into_iter()
        .filter(|(_, value)| !is_contract_id(value))
        .map(|(field, value)| (field, value.clone()))
        .collect();
        if malformed.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                missing: Vec::new(),
                malformed,
            })
        }
    }
}

/// What a deployment run leaves behind: `deployment.json`, read by the UI and
/// by the operational scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    #[serde(flatten)]
    pub addresses: ContractAddresses,
    pub deployer: String,
    pub deployment_block: u32,
    pub timestamp: DateTime<Utc>,
}

impl DeploymentRecord {
    pub fn new(
        addresses: ContractAddresses,
        deployer: String,
        deployment_block: u32,
    ) -> Result<Self, ConfigError> {
        addresses.validate()?;
        validate_account_id("deployer", &deployer)?;
        Ok(Self {
            addresses,
            deployer,
            deployment_block,
            timestamp: Utc::now(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let record: Self = serde_json::from_str(json)?;
        record.addresses.validate()?;
        validate_account_id("deployer", &record.deployer)?;
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), block = self.deployment_block, "deployment record saved");
        Ok(())
    }

    /// `KEY=value` lines that pin these addresses through the environment.
    pub fn env_exports(&self) -> Vec<String> {
        let a = &self.addresses;
        vec![
            format!("{}={}", crate::config::USDC_ADDRESS_VAR, a.usdc),
            format!("{}={}", crate::config::EURC_ADDRESS_VAR, a.eurc),
            format!("{}={}", crate::config::RATE_MODEL_ADDRESS_VAR, a.rate_model),
            format!("{}={}", crate::config::LENDING_ADDRESS_VAR, a.lending),
        ]
    }
}

pub(crate) fn is_contract_id(value: &str) -> bool {
    is_strkey(value, 'C')
}

pub(crate) fn validate_contract_id(field: &'static str, value: &str) -> Result<(), ConfigError> {
    check(field, value, is_contract_id(value))
}

pub(crate) fn validate_account_id(field: &'static str, value: &str) -> Result<(), ConfigError> {
    check(field, value, is_strkey(value, 'G'))
}

fn check(field: &'static str, value: &str, well_formed: bool) -> Result<(), ConfigError> {
    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::InvalidAddress {
            field,
            value: value.to_string(),
        })
    }
}

/// Shape check only: length, version prefix and base32 alphabet.
fn is_strkey(value: &str, prefix: char) -> bool {
    value.len() == STRKEY_LEN
        && value.starts_with(prefix)
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
}
