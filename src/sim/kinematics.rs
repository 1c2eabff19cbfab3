use crate::error::Error;
use crate::sim::avalanche;
use crate::sim::carriers::{CarrierKind, Generation, Simulation};

/// Advance all carriers by one frame.
///
/// Frames below the lead-in count leave carriers untouched (they are hidden
/// by the snapshot instead). Electrons drift up, accelerated inside the gain
/// band; holes drift down. A carrier crossing its collection threshold is
/// removed for good. A primary electron entering the gain band spawns its
/// one-time avalanche after the position pass, so new secondaries first move
/// on the following frame.
pub fn step(sim: &mut Simulation, frame: i64) -> Result<(), Error> {
    if frame < 0 {
        return Err(Error::InvalidFrame { frame });
    }
    if frame < sim.params.lead_in_frames as i64 {
        return Ok(());
    }

    let mut triggers: Vec<(f64, f64)> = Vec::new();

    for i in 0..sim.carriers.len() {
        let mut carrier = sim.carriers[i];
        if !carrier.alive {
            continue;
        }
        match carrier.kind {
            CarrierKind::Electron => {
                // Boost decided by the pre-update depth, trigger by the
                // post-update one.
                let mut velocity = sim.params.electron_velocity;
                if sim.in_gain_band(carrier.y) {
                    velocity *= sim.params.gain_boost;
                }
                carrier.y += velocity;
                if carrier.y > sim.electron_removal_y {
                    carrier.alive = false;
                } else if sim.params.avalanche.is_some()
                    && !carrier.avalanched
                    && carrier.generation == Generation::Primary
                    && sim.in_gain_band(carrier.y)
                {
                    carrier.avalanched = true;
                    triggers.push((carrier.x, carrier.y));
                }
            }
            CarrierKind::Hole => {
                carrier.y -= sim.params.hole_velocity;
                if carrier.y < sim.hole_removal_y {
                    carrier.alive = false;
                }
            }
        }
        sim.carriers[i] = carrier;
    }

    if let Some(av) = sim.params.avalanche {
        for center in triggers {
            let spawned =
                avalanche::spawn_pairs(&mut sim.rng, &av, center, sim.params.pair_offset);
            sim.carriers.extend(spawned);
        }
    }

    Ok(())
}
