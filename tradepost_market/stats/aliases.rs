/// Resolves a stat code to every spelling it may have in listing data.
///
/// The first element is always the code as given; lookups try the aliases in order.
pub trait StatAliases: Send + Sync {
    fn expand(&self, code: &str) -> Vec<String>;
}

impl<F> StatAliases for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn expand(&self, code: &str) -> Vec<String> {
        self(code)
    }
}

/// Every code is only itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityAliases;

impl StatAliases for IdentityAliases {
    fn expand(&self, code: &str) -> Vec<String> {
        vec![code.to_string()]
    }
}

/// Groups of equivalent codes: the canonical short code used by wishlist
/// criteria first, followed by the spellings used by item data imports.
const ALIAS_GROUPS: &[&[&str]] = &[
    &["ed%", "enhanced_defense", "item_armor_percent"],
    &["edmg%", "enhanced_damage", "item_maxdamage_percent"],
    &["def", "defense", "armorclass"],
    &["allres", "all_resistances", "res-all"],
    &["fireres", "fire_resist", "res-fire"],
    &["coldres", "cold_resist", "res-cold"],
    &["ltngres", "lightning_resist", "res-ltng"],
    &["poisres", "poison_resist", "res-pois"],
    &["allskills", "all_skills", "item_allskills"],
    &["fcr", "faster_cast_rate", "item_fastercastrate"],
    &["fhr", "faster_hit_recovery", "item_fastergethitrate"],
    &["frw", "faster_run_walk", "item_fastermovevelocity"],
    &["ias", "increased_attack_speed", "item_fasterattackrate"],
    &["mf", "magic_find", "item_magicbonus"],
    &["ll", "life_leech", "lifedrainmindam"],
    &["ml", "mana_leech", "manadrainmindam"],
    &["life", "max_life", "maxhp"],
    &["mana", "max_mana", "maxmana"],
    &["str", "strength"],
    &["dex", "dexterity"],
    &["vit", "vitality"],
    &["enr", "energy"],
    &["sockets", "sock", "item_numsockets"],
];

/// Static alias table for the supported games' stat codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameStatAliases;

impl StatAliases for GameStatAliases {
    fn expand(&self, code: &str) -> Vec<String> {
        let group = ALIAS_GROUPS
            .iter()
            .find(|group| group.iter().any(|alias| alias.eq_ignore_ascii_case(code)));

        let mut codes = vec![code.to_string()];
        if let Some(group) = group {
            codes.extend(
                group
                    .iter()
                    .filter(|alias| **alias != code)
                    .map(|alias| alias.to_string()),
            );
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_aliases() {
        assert_eq!(IdentityAliases.expand("ed%"), vec!["ed%".to_string()]);
    }

    #[test]
    fn test_game_aliases_keep_requested_code_first() {
        let codes = GameStatAliases.expand("enhanced_defense");
        assert_eq!(codes[0], "enhanced_defense");
        assert!(codes.contains(&"ed%".to_string()));
        assert!(codes.contains(&"item_armor_percent".to_string()));
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn test_mixed_case_code_keeps_canonical_spelling() {
        let codes = GameStatAliases.expand("ED%");
        assert_eq!(codes[0], "ED%");
        assert!(codes.contains(&"ed%".to_string()));
        assert!(codes.contains(&"item_armor_percent".to_string()));
    }

    #[test]
    fn test_unknown_code_expands_to_itself() {
        assert_eq!(GameStatAliases.expand("weird"), vec!["weird".to_string()]);
    }

    #[test]
    fn test_closure_aliases() {
        let aliases = |code: &str| vec![code.to_string(), code.to_uppercase()];
        assert_eq!(aliases.expand("mf"), vec!["mf".to_string(), "MF".to_string()]);
    }
}
