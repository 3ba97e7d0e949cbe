//! Geofence / point-of-interest objects

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub object_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Geometry in well-known-text form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
    pub user_id: i64,
    pub group_id: i64,
    pub is_private: bool,
    /// Hex color without the leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
}
