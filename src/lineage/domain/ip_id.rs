use crate::shared::error::GraphError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Number of hex digits in an EVM address
const ADDRESS_HEX_LEN: usize = 40;

/// NewType wrapper for an IP asset id (an EVM address) with validation
///
/// Ids are normalized to lowercase so that checksummed and plain forms of the
/// same address compare equal inside visited sets and edge lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpId(String);

impl IpId {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();

        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| GraphError::InvalidIpId {
                value: value.to_string(),
                reason: "missing 0x prefix".to_string(),
            })?;

        if hex.len() != ADDRESS_HEX_LEN {
            return Err(GraphError::InvalidIpId {
                value: value.to_string(),
                reason: format!(
                    "expected {} hex digits, found {}",
                    ADDRESS_HEX_LEN,
                    hex.len()
                ),
            }
            .into());
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphError::InvalidIpId {
                value: value.to_string(),
                reason: "contains non-hex characters".to_string(),
            }
            .into());
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for labels: `0x1234...abcd`
    pub fn short(&self) -> String {
        let len = self.0.len();
        format!("{}...{}", &self.0[..6], &self.0[len - 4..])
    }
}

impl std::fmt::Display for IpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IpId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for IpId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<IpId> for String {
    fn from(id: IpId) -> Self {
        id.0
    }
}
