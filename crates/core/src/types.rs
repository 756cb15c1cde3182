use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Floor,
    Wall,
    Stairs,
    /// Unexcavated rock with no carved neighbor.
    Empty,
}

impl Terrain {
    pub fn is_passable(self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Stairs)
    }

    pub fn is_opaque(self) -> bool {
        !self.is_passable()
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Visibility {
    #[default]
    Unseen,
    Remembered,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Rat,
    Goblin,
    Ghost,
}

impl Species {
    pub fn key(self) -> &'static str {
        match self {
            Species::Rat => "rat",
            Species::Goblin => "goblin",
            Species::Ghost => "ghost",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub String);

impl CreatureId {
    pub fn new(species: Species, index: usize) -> Self {
        Self(format!("{}-{index}", species.key()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotionKind {
    Healing,
    Regeneration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Dagger,
    ShortSword,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArmorKind {
    Leather,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Item {
    Gold { amount: u32 },
    Potion(PotionKind),
    Weapon(WeaponKind),
    Armor(ArmorKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    MainHand,
    Body,
}

impl Item {
    pub fn equip_slot(self) -> Option<EquipSlot> {
        match self {
            Item::Weapon(_) => Some(EquipSlot::MainHand),
            Item::Armor(_) => Some(EquipSlot::Body),
            Item::Gold { .. } | Item::Potion(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Poisoned,
    Regenerating,
    Chilled,
    Bleeding,
}

impl ConditionKind {
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::Poisoned => "poisoned",
            ConditionKind::Regenerating => "regenerating",
            ConditionKind::Chilled => "chilled",
            ConditionKind::Bleeding => "bleeding",
        }
    }

    /// Hit points gained (positive) or lost (negative) per turn at `intensity`.
    pub fn hp_delta(self, intensity: i32) -> i32 {
        match self {
            ConditionKind::Poisoned | ConditionKind::Bleeding => -intensity,
            ConditionKind::Regenerating => intensity,
            ConditionKind::Chilled => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveCondition {
    pub remaining_turns: u32,
    pub intensity: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    AttackHit,
    AttackCritical,
    AttackMiss,
    CreatureAttack(Species),
    CreaturePain(Species),
    CreatureDeath(Species),
    LootSmall,
    LootLarge,
    ItemPickup,
    StairsUsed,
}

impl SoundCue {
    pub fn tag(self) -> &'static str {
        match self {
            SoundCue::AttackHit => "attack-hit",
            SoundCue::AttackCritical => "attack-critical",
            SoundCue::AttackMiss => "attack-miss",
            SoundCue::CreatureAttack(_) => "creature-attack",
            SoundCue::CreaturePain(_) => "creature-pain",
            SoundCue::CreatureDeath(_) => "creature-death",
            SoundCue::LootSmall => "loot-small",
            SoundCue::LootLarge => "loot-large",
            SoundCue::ItemPickup => "item-pickup",
            SoundCue::StairsUsed => "stairs-used",
        }
    }

    pub fn species(self) -> Option<Species> {
        match self {
            SoundCue::CreatureAttack(species)
            | SoundCue::CreaturePain(species)
            | SoundCue::CreatureDeath(species) => Some(species),
            _ => None,
        }
    }
}
