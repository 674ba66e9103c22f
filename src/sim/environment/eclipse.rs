//! Conical umbra/penumbra eclipse classifier (C11).

use crate::math::Vec3;
use crate::sim::orbital::R_EARTH_KM;

const R_SUN_KM: f64 = 696_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseState {
    Sunlit,
    Penumbra,
    Umbra,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseResult {
    pub state: EclipseState,
    /// 1.0 = full sunlight, 0.0 = full umbra; linear within the penumbra.
    pub illumination_fraction: f64,
}

/// Classifies eclipse state using the cylindrical/conical shadow model:
/// the spacecraft is candidate-shadowed only when it is on the
/// night-side hemisphere (`position . sun_direction < 0`), then the
/// umbra/penumbra half-angles determine how far into shadow it lies.
pub fn classify(position_eci_km: Vec3, sun_position_eci_km: Vec3) -> EclipseResult {
    let sun_direction = sun_position_eci_km.normalized();
    let sun_distance_km = sun_position_eci_km.norm();

    let along_sun_axis = position_eci_km.dot(&sun_direction);
    if along_sun_axis > 0.0 {
        return EclipseResult { state: EclipseState::Sunlit, illumination_fraction: 1.0 };
    }

    let perpendicular = position_eci_km - sun_direction * along_sun_axis;
    let perpendicular_distance_km = perpendicular.norm();

    let umbra_half_angle = ((R_SUN_KM - R_EARTH_KM) / sun_distance_km).asin();
    let penumbra_half_angle = ((R_SUN_KM + R_EARTH_KM) / sun_distance_km).asin();

    let axial_distance_km = -along_sun_axis;
    let umbra_radius_km = R_EARTH_KM - axial_distance_km * umbra_half_angle.tan();
    let penumbra_radius_km = R_EARTH_KM + axial_distance_km * penumbra_half_angle.tan();

    if umbra_radius_km > 0.0 && perpendicular_distance_km < umbra_radius_km {
        EclipseResult { state: EclipseState::Umbra, illumination_fraction: 0.0 }
    } else if perpendicular_distance_km < penumbra_radius_km {
        let fraction = ((perpendicular_distance_km - umbra_radius_km.max(0.0))
            / (penumbra_radius_km - umbra_radius_km.max(0.0)))
            .clamp(0.0, 1.0);
        EclipseResult { state: EclipseState::Penumbra, illumination_fraction: fraction }
    } else {
        EclipseResult { state: EclipseState::Sunlit, illumination_fraction: 1.0 }
    }
}

/// Closed-form expected umbra duration per orbit for a circular orbit of
/// radius `r_km`, used as the reference value for the eclipse testable
/// property: `T * arccos(R_E/r) / pi`.
pub fn expected_umbra_duration_s(orbit_period_s: f64, orbit_radius_km: f64) -> f64 {
    orbit_period_s * (R_EARTH_KM / orbit_radius_km).acos() / core::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_solar_point_is_sunlit() {
        let sun = Vec3::new(1.496e8, 0.0, 0.0);
        let position = Vec3::new(6878.0, 0.0, 0.0);
        let result = classify(position, sun);
        assert_eq!(result.state, EclipseState::Sunlit);
    }

    #[test]
    fn antisolar_point_at_leo_altitude_is_in_umbra() {
        let sun = Vec3::new(1.496e8, 0.0, 0.0);
        let position = Vec3::new(-6878.0, 0.0, 0.0);
        let result = classify(position, sun);
        assert_eq!(result.state, EclipseState::Umbra);
    }

    #[test]
    fn far_off_axis_antisolar_point_is_sunlit() {
        let sun = Vec3::new(1.496e8, 0.0, 0.0);
        let position = Vec3::new(-6878.0, 50_000.0, 0.0);
        let result = classify(position, sun);
        assert_eq!(result.state, EclipseState::Sunlit);
    }
}
