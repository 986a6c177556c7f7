//! Company Profile Model

use serde::{Deserialize, Serialize};

/// Company profile printed in the receipt header (singleton per tenant)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub legal_name: String,
    /// Tax identification number (RIF)
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}
