use serde::{Deserialize, Serialize};

/// A predefined reason a seller or provider can give when rejecting an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineReason {
    pub id: i32,
    pub code: String,
    pub label: String,
    pub is_active: bool,
}
