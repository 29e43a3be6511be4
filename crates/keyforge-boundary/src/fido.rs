//! FIDO2 capability record reported by the authenticator's GetInfo path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read-only capability snapshot of the FIDO2 interface.
///
/// `versions` are ordered with the preferred protocol first. `options` maps
/// capability names (e.g. `clientPin`, `rk`) to their reported state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FidoInfo {
    pub versions: Vec<String>,
    pub extensions: Vec<String>,
    /// 128-bit authenticator identifier, 32 lowercase hex digits.
    pub aaguid: String,
    pub options: HashMap<String, bool>,
    pub max_msg_size: u32,
    pub pin_protocols: Vec<u32>,
    pub min_pin_length: u8,
    pub firmware_version: String,
}

impl FidoInfo {
    /// Whether a client PIN is currently set on the device.
    pub fn pin_set(&self) -> bool {
        self.options.get("clientPin").copied().unwrap_or(false)
    }

    /// Decode the AAGUID into its raw 16 bytes, when well-formed.
    pub fn aaguid_bytes(&self) -> Option<[u8; 16]> {
        let bytes = hex::decode(&self.aaguid).ok()?;
        bytes.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_info(aaguid: &str) -> FidoInfo {
        FidoInfo {
            versions: vec!["FIDO_2_1".into()],
            extensions: Vec::new(),
            aaguid: aaguid.into(),
            options: HashMap::new(),
            max_msg_size: 1024,
            pin_protocols: vec![1],
            min_pin_length: 4,
            firmware_version: "1.0.0".into(),
        }
    }

    #[test]
    fn aaguid_decodes_to_sixteen_bytes() {
        let info = minimal_info("4b4638a5c36011ee9f2bb7a2d3f10001");
        assert_eq!(info.aaguid_bytes().unwrap().len(), 16);
    }

    #[test]
    fn malformed_aaguid_is_rejected() {
        assert!(minimal_info("not-hex").aaguid_bytes().is_none());
        assert!(minimal_info("4b46").aaguid_bytes().is_none());
    }

    #[test]
    fn pin_set_defaults_to_false() {
        assert!(!minimal_info("4b4638a5c36011ee9f2bb7a2d3f10001").pin_set());
    }
}
