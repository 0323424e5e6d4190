mod capability_port;
mod catalog_port;
mod clock_port;
mod key_value_store_port;
mod selection_port;

pub use capability_port::{
    Easing, MotionCapability, NoopMotion, NoopVisibilityProbe, Transition, ViewportRegion,
    VisibilityProbe,
};
pub use catalog_port::CatalogPort;
pub use clock_port::ClockPort;
pub use key_value_store_port::KeyValueStorePort;
pub use selection_port::SelectionPort;
