//! Network device models

use serde::{Deserialize, Serialize};

/// One entry of the network-device lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub id: String,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub management_ip_address: Option<String>,
}
