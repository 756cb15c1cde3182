//! Turns the spawn markers of a generated map into live creatures.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::CreatureConfig;
use crate::content::species_template;
use crate::mapgen::seed_value;
use crate::state::{Creature, Map};
use crate::types::{CreatureId, Species};

const HP_VARIANCE_STREAM: u64 = 0x5EED_C4EA_7;

/// One creature per spawn marker in row-major order. Ids count up per species (`rat-0`, `rat-1`).
pub fn init_creatures(map: &Map, config: &CreatureConfig) -> BTreeMap<CreatureId, Creature> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_value(map.seed()) ^ HP_VARIANCE_STREAM);
    let variance = config.hp_variance.max(0) as u64;
    let mut per_species: BTreeMap<Species, usize> = BTreeMap::new();
    let mut creatures = BTreeMap::new();

    for pos in map.positions() {
        let Some(species) = map.cell(pos).and_then(|cell| cell.spawn_marker) else {
            continue;
        };
        let index = per_species.entry(species).or_insert(0);
        let id = CreatureId::new(species, *index);
        *index += 1;

        let template = species_template(species);
        let bonus = (rng.next_u64() % (variance + 1)) as i32;
        let hp = template.hp.saturating_add(bonus);
        creatures.insert(
            id.clone(),
            Creature {
                id,
                species,
                hp,
                max_hp: hp,
                attack: template.attack,
                defense: template.defense,
                position: pos,
                conditions: BTreeMap::new(),
            },
        );
    }
    creatures
}
