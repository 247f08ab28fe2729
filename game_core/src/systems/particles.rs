use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Spawn every particle of `burst` as its own entity
pub fn spawn_particles(world: &mut World, burst: &ParticleBurst, rng: &mut GameRng) {
    for particle in burst.spawn(rng) {
        world.spawn((particle,));
    }
}

/// Age particles and despawn the ones that faded out
pub fn update_particles(world: &mut World) {
    let mut to_remove = Vec::new();

    for (entity, particle) in world.query_mut::<&mut Particle>() {
        if !particle.tick() {
            to_remove.push(entity);
        }
    }

    for entity in to_remove {
        let _ = world.despawn(entity);
    }
}
