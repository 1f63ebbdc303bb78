use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an item listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    /// Hidden from the market without being sold or withdrawn.
    Pending,
    Completed,
    Cancelled,
}

impl ListingStatus {
    /// Whether the listing reached an end state and must not be re-listed.
    pub fn is_final(&self) -> bool {
        matches!(self, ListingStatus::Completed | ListingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Paused,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

/// Status shared by trades and service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    Active,
    Completed,
    Cancelled,
}

/// The `type` tag of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    Item,
    Service,
}

macro_rules! impl_display {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_display!(ListingStatus {
    Active => "active",
    Pending => "pending",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl_display!(ServiceStatus {
    Active => "active",
    Paused => "paused",
    Cancelled => "cancelled",
});

impl_display!(OfferStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Cancelled => "cancelled",
    Completed => "completed",
});

impl_display!(EngagementStatus {
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl_display!(OfferKind {
    Item => "item",
    Service => "service",
});
