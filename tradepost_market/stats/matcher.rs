use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    aliases::StatAliases,
    value::{ListingStat, extract_numeric_value},
};

/// Numeric value per stat code of a single listing.
pub type StatMap = HashMap<String, i64>;

/// Inclusive numeric range filter on one stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCriterion {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

impl StatCriterion {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            min_value: None,
            max_value: None,
        }
    }

    pub fn with_min(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max(mut self, max_value: i64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn accepts(&self, value: i64) -> bool {
        self.min_value.is_none_or(|min| value >= min)
            && self.max_value.is_none_or(|max| value <= max)
    }

    /// A criterion whose minimum exceeds its maximum can never match.
    pub fn has_valid_range(&self) -> bool {
        match (self.min_value, self.max_value) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Builds the numeric stat map of a listing, dropping stats without a numeric value.
/// When a code appears more than once the last entry wins.
pub fn build_stat_map(stats: &[ListingStat]) -> StatMap {
    stats
        .iter()
        .filter_map(|stat| {
            extract_numeric_value(stat.value.as_ref()).map(|value| (stat.code.clone(), value))
        })
        .collect()
}

/// Whether a listing's stats satisfy every criterion.
///
/// No criteria is a vacuous match. A criterion whose code (under any alias)
/// is absent from the map fails the whole match.
pub fn matches(criteria: &[StatCriterion], stat_map: &StatMap, aliases: &dyn StatAliases) -> bool {
    criteria.iter().all(|criterion| {
        aliases
            .expand(&criterion.code)
            .iter()
            .find_map(|alias| stat_map.get(alias))
            .is_some_and(|value| criterion.accepts(*value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{GameStatAliases, IdentityAliases, StatValue};

    fn stat_map(entries: &[(&str, i64)]) -> StatMap {
        entries
            .iter()
            .map(|(code, value)| (code.to_string(), *value))
            .collect()
    }

    fn ed_range() -> Vec<StatCriterion> {
        vec![StatCriterion::new("ed%").with_min(150).with_max(200)]
    }

    #[test]
    fn test_empty_criteria_always_match() {
        assert!(matches(&[], &StatMap::new(), &IdentityAliases));
        assert!(matches(&[], &stat_map(&[("ed%", 1)]), &IdentityAliases));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let criteria = ed_range();
        assert!(matches(&criteria, &stat_map(&[("ed%", 150)]), &IdentityAliases));
        assert!(matches(&criteria, &stat_map(&[("ed%", 200)]), &IdentityAliases));
        assert!(matches(&criteria, &stat_map(&[("ed%", 163)]), &IdentityAliases));
        assert!(!matches(&criteria, &stat_map(&[("ed%", 149)]), &IdentityAliases));
        assert!(!matches(&criteria, &stat_map(&[("ed%", 201)]), &IdentityAliases));
    }

    #[test]
    fn test_open_ended_ranges() {
        let min_only = vec![StatCriterion::new("mf").with_min(20)];
        let max_only = vec![StatCriterion::new("mf").with_max(20)];
        let any_value = vec![StatCriterion::new("mf")];
        let map = stat_map(&[("mf", -5)]);

        assert!(!matches(&min_only, &map, &IdentityAliases));
        assert!(matches(&max_only, &map, &IdentityAliases));
        assert!(matches(&any_value, &map, &IdentityAliases));
    }

    #[test]
    fn test_missing_stat_fails() {
        let criteria = vec![StatCriterion::new("fcr")];
        assert!(!matches(&criteria, &stat_map(&[("ed%", 163)]), &IdentityAliases));
    }

    #[test]
    fn test_every_criterion_must_pass() {
        let criteria = vec![
            StatCriterion::new("ed%").with_min(150),
            StatCriterion::new("allres").with_min(20),
        ];
        assert!(matches(
            &criteria,
            &stat_map(&[("ed%", 160), ("allres", 25)]),
            &IdentityAliases
        ));
        assert!(!matches(
            &criteria,
            &stat_map(&[("ed%", 160), ("allres", 10)]),
            &IdentityAliases
        ));
        assert!(!matches(&criteria, &stat_map(&[("ed%", 160)]), &IdentityAliases));
    }

    #[test]
    fn test_aliases_resolve_first_hit_in_order() {
        let criteria = ed_range();
        let map = stat_map(&[("item_armor_percent", 180)]);
        assert!(!matches(&criteria, &map, &IdentityAliases));
        assert!(matches(&criteria, &map, &GameStatAliases));

        // the requested spelling wins over later aliases
        let map = stat_map(&[("ed%", 100), ("enhanced_defense", 180)]);
        assert!(!matches(&criteria, &map, &GameStatAliases));
    }

    #[test]
    fn test_mixed_case_criterion_finds_canonical_code() {
        let criteria = vec![StatCriterion::new("ED%").with_min(150)];
        let map = stat_map(&[("ed%", 163)]);
        assert!(matches(&criteria, &map, &GameStatAliases));
    }

    #[test]
    fn test_build_stat_map_skips_non_numeric() {
        let stats = vec![
            ListingStat {
                code: "ed%".to_string(),
                value: Some(StatValue::Text("+163% Enhanced Defense".to_string())),
                display_text: None,
                is_variable: true,
            },
            ListingStat {
                code: "skills".to_string(),
                value: Some(StatValue::Text("All Skills".to_string())),
                display_text: None,
                is_variable: false,
            },
            ListingStat {
                code: "eth".to_string(),
                value: None,
                display_text: None,
                is_variable: false,
            },
        ];

        let map = build_stat_map(&stats);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("ed%"), Some(&163));
    }

    #[test]
    fn test_build_stat_map_last_duplicate_wins() {
        let stats = vec![
            ListingStat {
                code: "life".to_string(),
                value: Some(StatValue::Integer(10)),
                display_text: None,
                is_variable: false,
            },
            ListingStat {
                code: "life".to_string(),
                value: Some(StatValue::Integer(40)),
                display_text: None,
                is_variable: false,
            },
        ];
        assert_eq!(build_stat_map(&stats).get("life"), Some(&40));
    }

    #[test]
    fn test_criterion_range_validation() {
        assert!(StatCriterion::new("ed%").with_min(10).with_max(10).has_valid_range());
        assert!(!StatCriterion::new("ed%").with_min(11).with_max(10).has_valid_range());
        assert!(StatCriterion::new("ed%").has_valid_range());
    }

    #[test]
    fn test_criterion_json_shape() {
        let criterion: StatCriterion =
            serde_json::from_str(r#"{"code": "ed%", "minValue": 150}"#).unwrap();
        assert_eq!(criterion, StatCriterion::new("ed%").with_min(150));
    }
}
