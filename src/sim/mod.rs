//! Carrier kinematics simulation.
//!
//! Deterministic by construction: a fixed timestep (one frame), a seeded RNG
//! living inside the state, and an update that is a function of the explicit
//! state and frame index only. No rendering dependencies.

pub mod avalanche;
pub mod carriers;
pub mod kinematics;
pub mod track;

pub use carriers::{Carrier, CarrierDot, CarrierKind, FrameSnapshot, Generation, Simulation};
pub use kinematics::step;
pub use track::Track;
