use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

use crate::params::AvalancheParams;
use crate::sim::carriers::{Carrier, CarrierKind, Generation};

/// Spawn the secondary pairs for one avalanche, jittered around the
/// triggering electron's position. Each pair shares a jittered point and is
/// split horizontally by `pair_offset`, like the primaries. Secondaries are
/// created with their avalanche flag set so they can never trigger again.
pub fn spawn_pairs(
    rng: &mut Pcg64,
    params: &AvalancheParams,
    center: (f64, f64),
    pair_offset: f64,
) -> Vec<Carrier> {
    let jitter = Normal::new(0.0, params.jitter_sigma)
        .unwrap_or_else(|_| Normal::new(0.0, 1.0).unwrap());

    let mut spawned = Vec::with_capacity(params.secondary_pairs * 2);
    for _ in 0..params.secondary_pairs {
        let x = center.0 + jitter.sample(rng);
        let y = center.1 + jitter.sample(rng);
        spawned.push(Carrier {
            kind: CarrierKind::Electron,
            generation: Generation::Secondary,
            x: x - pair_offset,
            y,
            alive: true,
            avalanched: true,
        });
        spawned.push(Carrier {
            kind: CarrierKind::Hole,
            generation: Generation::Secondary,
            x: x + pair_offset,
            y,
            alive: true,
            avalanched: true,
        });
    }
    spawned
}
