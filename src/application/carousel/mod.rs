//! Circular 3D carousel: geometry, input arbitration and timer lifecycle.

mod constants;
pub mod driver;
pub mod engine;
pub mod geometry;
pub mod style;
pub mod wheel;

pub use constants::{
    AUTOPLAY_INTERVAL, CarouselSettings, INTERACTION_COOLDOWN, SWIPE_THRESHOLD, WHEEL_IDLE_RESET,
    WHEEL_THRESHOLD,
};
pub use driver::CarouselDriver;
pub use engine::{Activation, CarouselEngine, IndexChange, InputSource, ResizeOutcome};
pub use geometry::ItemPlacement;
pub use style::{EasedMotion, ItemStyle};
pub use wheel::{Step, WheelAccumulator};
