//! Stat payload parsing and wishlist criteria evaluation.

mod aliases;
mod matcher;
mod value;

pub use aliases::{GameStatAliases, IdentityAliases, StatAliases};
pub use matcher::{StatCriterion, StatMap, build_stat_map, matches};
pub use value::{ListingStat, StatValue, extract_numeric_value, parse_stats};
