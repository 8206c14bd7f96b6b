//! Bridge configuration.

use serde::{Deserialize, Serialize};

use crate::ledger_bridge::BridgeError;
use crate::proto_types::MAX_WIRE_CODE_LEN;

/// Limits applied when translating values to ledger wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BridgeConfig {
    /// Longest asset code accepted. Codes of 1 to 4 characters use the
    /// short wire form; 5 up to this limit use the long form. At most 12.
    pub max_code_len: usize,
    /// Reject zero and negative payment amounts.
    pub require_positive_amounts: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_code_len: MAX_WIRE_CODE_LEN,
            require_positive_amounts: true,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON config. Missing fields take their defaults; unknown
    /// fields are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        let config: BridgeConfig =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        if !(1..=MAX_WIRE_CODE_LEN).contains(&config.max_code_len) {
            return Err(BridgeError::Config(format!(
                "max_code_len must be between 1 and {}, got {}",
                MAX_WIRE_CODE_LEN, config.max_code_len
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(BridgeConfig::from_json_str("{}").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = BridgeConfig::from_json_str(r#"{"require_positive_amounts":false}"#).unwrap();
        assert!(!config.require_positive_amounts);
        assert_eq!(config.max_code_len, 12);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = BridgeConfig::from_json_str(r#"{"max_code_length":4}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("unknown field")));
    }

    #[test]
    fn code_len_bounded() {
        assert!(BridgeConfig::from_json_str(r#"{"max_code_len":13}"#).is_err());
        assert!(BridgeConfig::from_json_str(r#"{"max_code_len":0}"#).is_err());
        assert!(BridgeConfig::from_json_str(r#"{"max_code_len":4}"#).is_ok());
    }
}
