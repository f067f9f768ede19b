use serde::{Deserialize, Serialize};

/// Saved shipping address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub address_line3: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub phone: String,
}

impl ShippingInfo {
    /// Form field names and values, keyed the way the shipping forms post them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fullName", self.full_name.clone()),
            ("addressLine1", self.address_line1.clone()),
            ("addressLine2", self.address_line2.clone()),
            ("addressLine3", self.address_line3.clone().unwrap_or_default()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("zipCode", self.zip_code.clone()),
            ("phone", self.phone.clone()),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfoPayload {
    #[serde(default)]
    pub shipping_info: Option<ShippingInfo>,
}

/// User profile as returned by `GET /api/get_user_profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub shipping_info: Option<ShippingInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfilePayload {
    #[serde(default)]
    pub profile: Option<UserProfile>,
}
