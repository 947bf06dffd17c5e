//! Sales Slot Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sales slot entity
///
/// A scheduled time window during which a fixed inventory allotment of
/// products is offered for sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SalesSlot {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SalesSlot {
    /// Display label for the slot, e.g. "08/07 11:00 - 08/07 12:30"
    pub fn label(&self) -> String {
        let fmt = "%m/%d %H:%M";
        format!(
            "{} - {}",
            self.start_time.format(fmt),
            self.end_time.format(fmt)
        )
    }
}
