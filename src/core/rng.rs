//! Random number source for spawn shuffling and random loadouts.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::DeathmatchConfig;

/// RNG resource (seeded from config when a seed is given).
#[derive(Resource)]
pub struct DeathmatchRng(pub StdRng);

impl DeathmatchRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Create the RNG resource unless one is already present.
pub fn init_rng(
    mut commands: Commands,
    config: Res<DeathmatchConfig>,
    existing: Option<Res<DeathmatchRng>>,
) {
    if existing.is_some() {
        return;
    }

    let rng = match config.rng_seed {
        Some(seed) => {
            debug!("Seeding deathmatch RNG with {}", seed);
            DeathmatchRng::seeded(seed)
        }
        None => DeathmatchRng::from_entropy(),
    };
    commands.insert_resource(rng);
}

/// Run `f` with the world's RNG, or a fresh one when none was inserted.
pub fn with_rng<T>(world: &mut World, f: impl FnOnce(&mut StdRng) -> T) -> T {
    match world.get_resource_mut::<DeathmatchRng>() {
        Some(mut rng) => f(&mut rng.0),
        None => f(&mut StdRng::from_entropy()),
    }
}
