use crate::types::{ArmorKind, ConditionKind, Item, PotionKind, Species, WeaponKind};

pub const INITIAL_MAX_HP: i32 = 20;
pub const PLAYER_BASE_ATTACK: i32 = 2;
pub const PLAYER_BASE_DEFENSE: i32 = 0;
pub const DEFAULT_CHARACTER_NAME: &str = "Kerhebos";
pub const LARGE_GOLD_THRESHOLD: u32 = 20;

/// Large piles play the heavier loot cue.
pub fn is_large_gold(amount: u32) -> bool {
    amount >= LARGE_GOLD_THRESHOLD
}

pub struct SpeciesTemplate {
    pub name: &'static str,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// Condition applied to the player when this species lands a hit.
    pub on_hit: Option<OnHitCondition>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OnHitCondition {
    pub kind: ConditionKind,
    pub turns: u32,
    pub intensity: i32,
}

pub fn species_template(species: Species) -> SpeciesTemplate {
    match species {
        Species::Rat => SpeciesTemplate {
            name: "rat",
            hp: 3,
            attack: 1,
            defense: 0,
            on_hit: Some(OnHitCondition { kind: ConditionKind::Poisoned, turns: 3, intensity: 1 }),
        },
        Species::Goblin => {
            SpeciesTemplate { name: "goblin", hp: 6, attack: 2, defense: 1, on_hit: None }
        }
        Species::Ghost => SpeciesTemplate {
            name: "ghost",
            hp: 8,
            attack: 3,
            defense: 2,
            on_hit: Some(OnHitCondition { kind: ConditionKind::Chilled, turns: 2, intensity: 1 }),
        },
    }
}

/// Species weights per dungeon depth; later depths lean toward tougher creatures.
pub fn species_weights(depth: u32) -> [(Species, usize); 3] {
    match depth {
        0 | 1 => [(Species::Rat, 70), (Species::Goblin, 30), (Species::Ghost, 0)],
        2 => [(Species::Rat, 40), (Species::Goblin, 45), (Species::Ghost, 15)],
        _ => [(Species::Rat, 20), (Species::Goblin, 45), (Species::Ghost, 35)],
    }
}

pub fn item_name(item: Item) -> String {
    match item {
        Item::Gold { amount } => format!("{amount} gold coins"),
        Item::Potion(PotionKind::Healing) => "a healing potion".to_string(),
        Item::Potion(PotionKind::Regeneration) => "a regeneration potion".to_string(),
        Item::Weapon(WeaponKind::Dagger) => "a dagger".to_string(),
        Item::Weapon(WeaponKind::ShortSword) => "a short sword".to_string(),
        Item::Armor(ArmorKind::Leather) => "a leather armor".to_string(),
    }
}

pub fn attack_bonus(item: Item) -> i32 {
    match item {
        Item::Weapon(WeaponKind::Dagger) => 1,
        Item::Weapon(WeaponKind::ShortSword) => 3,
        _ => 0,
    }
}

pub fn defense_bonus(item: Item) -> i32 {
    match item {
        Item::Armor(ArmorKind::Leather) => 1,
        _ => 0,
    }
}

pub const HEALING_POTION_AMOUNT: i32 = 8;
pub const REGENERATION_TURNS: u32 = 5;
pub const REGENERATION_INTENSITY: i32 = 1;

/// Applied to a creature by a critical strike from the player.
pub const CRITICAL_BLEED: OnHitCondition =
    OnHitCondition { kind: ConditionKind::Bleeding, turns: 2, intensity: 1 };
