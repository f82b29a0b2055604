//! Company details from TOML (`[company]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompanyConfig {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub currency: String,
    pub country: String,
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl Default for FileCompanyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            currency: "RON".to_string(),
            country: String::new(),
            street: String::new(),
            city: String::new(),
            zip: String::new(),
        }
    }
}
