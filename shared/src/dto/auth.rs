use serde::{Deserialize, Serialize};

/// Answer of `GET /api/check_login_status`.
///
/// This is the one endpoint that does not use the envelope shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStatus {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Payload of `POST /api/place_order`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedOrder {
    #[serde(default)]
    pub order_id: Option<u64>,
}
