//! Driver models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A driver registered in the fleet account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Identification key value (Dallas iButton / RFID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibutton_value: Option<String>,
    /// Tachograph driver card number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tachograph_id: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Driver {
    /// "Name Surname", skipping whichever part is missing
    pub fn full_name(&self) -> String {
        [self.name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
