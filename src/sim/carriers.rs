use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::geometry::LayerStack;
use crate::params::KinematicsParams;
use crate::sim::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Electron,
    Hole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Liberated by the traversing particle at animation start.
    Primary,
    /// Spawned by an avalanche in the gain band.
    Secondary,
}

/// One tracked charge carrier. Removal flips `alive` and is permanent; dead
/// carriers keep their slot so per-carrier identity is stable across frames.
#[derive(Debug, Clone, Copy)]
pub struct Carrier {
    pub kind: CarrierKind,
    pub generation: Generation,
    pub x: f64,
    pub y: f64,
    pub alive: bool,
    /// Set once the carrier has triggered (or can never trigger) an
    /// avalanche; only primary electrons start with it unset.
    pub avalanched: bool,
}

/// A live carrier's position as handed to the rendering surface.
#[derive(Debug, Clone, Copy)]
pub struct CarrierDot {
    pub kind: CarrierKind,
    pub generation: Generation,
    pub x: f64,
    pub y: f64,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: i64,
    pub track_position: (f64, f64),
    pub trail: Vec<(f64, f64)>,
    pub dots: Vec<CarrierDot>,
}

/// Complete simulation state. The per-frame update is a function of this
/// state and the frame index alone; the seeded RNG lives here so runs with
/// the same seed reproduce bit for bit.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub carriers: Vec<Carrier>,
    pub track: Track,
    pub params: KinematicsParams,
    pub gain_band: Option<(f64, f64)>,
    pub electron_removal_y: f64,
    pub hole_removal_y: f64,
    pub rng: Pcg64,
}

impl Simulation {
    /// Seed `carrier_pairs` electron/hole pairs at uniformly sampled depths
    /// along the track, each pair sharing a depth and split horizontally by
    /// the pair offset.
    pub fn new(params: &KinematicsParams, stack: &LayerStack, track: Track) -> Self {
        let mut rng = Pcg64::seed_from_u64(params.seed);
        let mut carriers = Vec::with_capacity(params.carrier_pairs * 2);

        let low = params.spawn_margin;
        let high = stack.thickness - params.spawn_margin;
        for _ in 0..params.carrier_pairs {
            let y = rng.random_range(low..high);
            let x = track.x_at_depth(y);
            carriers.push(Carrier {
                kind: CarrierKind::Electron,
                generation: Generation::Primary,
                x: x - params.pair_offset,
                y,
                alive: true,
                avalanched: false,
            });
            carriers.push(Carrier {
                kind: CarrierKind::Hole,
                generation: Generation::Primary,
                x: x + params.pair_offset,
                y,
                alive: true,
                avalanched: true,
            });
        }

        Self {
            carriers,
            track,
            params: params.clone(),
            gain_band: stack.gain_band(),
            electron_removal_y: stack.electron_removal_y(),
            hole_removal_y: stack.hole_removal_y(),
            rng,
        }
    }

    pub fn in_gain_band(&self, y: f64) -> bool {
        match self.gain_band {
            Some((bottom, top)) => y >= bottom && y <= top,
            None => false,
        }
    }

    /// Snapshot the state after `frame` has been stepped. Carriers stay
    /// hidden during the lead-in; afterwards only live ones are reported.
    pub fn snapshot(&self, frame: i64) -> FrameSnapshot {
        let dots = if frame < self.params.lead_in_frames as i64 {
            Vec::new()
        } else {
            self.carriers
                .iter()
                .filter(|c| c.alive)
                .map(|c| CarrierDot {
                    kind: c.kind,
                    generation: c.generation,
                    x: c.x,
                    y: c.y,
                })
                .collect()
        };

        FrameSnapshot {
            frame,
            track_position: self.track.position(frame),
            trail: self.track.trail(frame),
            dots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DetectorParams;

    fn simulation(seed: u64) -> Simulation {
        let detector = DetectorParams::default();
        let stack = LayerStack::new(&detector).unwrap();
        let params = KinematicsParams {
            seed,
            ..Default::default()
        };
        Simulation::new(&params, &stack, Track::new(detector.thickness))
    }

    #[test]
    fn pairs_share_a_depth_and_straddle_the_track() {
        let sim = simulation(7);
        assert_eq!(sim.carriers.len(), 30);
        for pair in sim.carriers.chunks(2) {
            let (e, h) = (&pair[0], &pair[1]);
            assert_eq!(e.kind, CarrierKind::Electron);
            assert_eq!(h.kind, CarrierKind::Hole);
            assert_eq!(e.y, h.y);
            assert!((h.x - e.x - 0.4).abs() < 1e-12);
            assert!(e.y >= 10.0 && e.y <= 90.0);
            // Pair midpoint sits exactly on the track.
            let mid = (e.x + h.x) / 2.0;
            assert!((mid - sim.track.x_at_depth(e.y)).abs() < 1e-12);
        }
    }

    #[test]
    fn same_seed_seeds_identical_carriers() {
        let a = simulation(42);
        let b = simulation(42);
        for (ca, cb) in a.carriers.iter().zip(&b.carriers) {
            assert_eq!(ca.x, cb.x);
            assert_eq!(ca.y, cb.y);
        }
    }

    #[test]
    fn snapshot_hides_carriers_during_lead_in() {
        let sim = simulation(1);
        assert!(sim.snapshot(0).dots.is_empty());
        assert!(sim.snapshot(4).dots.is_empty());
        assert_eq!(sim.snapshot(5).dots.len(), 30);
    }
}
