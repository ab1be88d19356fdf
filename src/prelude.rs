//! Convenient re-exports for common types

pub use crate::EdgeTrackerPlugin;
pub use crate::components::TargetAppearance;
pub use crate::components::TrackedCategory;
pub use crate::components::TrackedPoint;
pub use crate::config::TrackerConfig;
pub use crate::draw::HostContext;
pub use crate::events::DayStarted;
pub use crate::events::ResetTrackerConfig;
pub use crate::events::SaveTrackerConfig;
pub use crate::placement::TargetPosition;
pub use crate::placement::TrackerViewport;
