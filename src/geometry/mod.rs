pub mod layers;
pub mod pixels;
pub mod scene;
pub mod trenches;

pub use layers::LayerStack;
pub use scene::{build_layout, ColorTag, LabelAnchor, Scene, Shape};
pub use trenches::TrenchMode;
