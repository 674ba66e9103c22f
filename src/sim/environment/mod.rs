//! Environment models (C11): magnetic field, Sun ephemeris, eclipse
//! classification, and ground-station visibility.

pub mod eclipse;
pub mod ground_station;
pub mod magnetic;
pub mod sun;

pub use eclipse::{classify as classify_eclipse, EclipseResult, EclipseState};
pub use ground_station::{find_passes, GroundStation, PassWindow};
pub use magnetic::IgrfDipoleModel;
pub use sun::{sun_direction_body, sun_position_eci_km};
