//! Low-precision solar ephemeris (C11): ECI Sun position from Julian
//! date, accurate to about 0.01 degrees, sufficient for eclipse geometry
//! and sun-sensor simulation (not for high-precision pointing).

use crate::math::{Mat3, Vec3};

const AU_KM: f64 = 149_597_870.7;

/// Sun position in ECI (km), from the low-precision algorithm in the
/// Astronomical Almanac (mean longitude + mean anomaly + obliquity).
pub fn sun_position_eci_km(julian_date: f64) -> Vec3 {
    let n = julian_date - 2_451_545.0;
    let mean_longitude_deg = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let mean_anomaly_deg = (357.528 + 0.985_600_3 * n).rem_euclid(360.0);
    let mean_anomaly_rad = mean_anomaly_deg.to_radians();

    let ecliptic_longitude_deg = mean_longitude_deg
        + 1.915 * mean_anomaly_rad.sin()
        + 0.020 * (2.0 * mean_anomaly_rad).sin();
    let ecliptic_longitude_rad = ecliptic_longitude_deg.to_radians();

    let obliquity_deg = 23.439 - 0.000_000_4 * n;
    let obliquity_rad = obliquity_deg.to_radians();

    let distance_au = 1.000_14 - 0.016_71 * mean_anomaly_rad.cos() - 0.000_14 * (2.0 * mean_anomaly_rad).cos();
    let distance_km = distance_au * AU_KM;

    let x = ecliptic_longitude_rad.cos();
    let y = ecliptic_longitude_rad.sin() * obliquity_rad.cos();
    let z = ecliptic_longitude_rad.sin() * obliquity_rad.sin();

    Vec3::new(x, y, z).normalized() * distance_km
}

pub fn sun_direction_body(julian_date: f64, spacecraft_position_eci_km: Vec3, body_from_inertial: Mat3) -> Vec3 {
    let sun_eci = sun_position_eci_km(julian_date);
    let relative = sun_eci - spacecraft_position_eci_km;
    body_from_inertial.mul_vec(&relative.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_distance_is_roughly_one_au() {
        let position = sun_position_eci_km(2_451_545.0);
        let distance_au = position.norm() / AU_KM;
        assert!((distance_au - 1.0).abs() < 0.02);
    }

    #[test]
    fn sun_position_changes_over_a_quarter_year() {
        let a = sun_position_eci_km(2_451_545.0);
        let b = sun_position_eci_km(2_451_545.0 + 91.0);
        let cos_angle = a.dot(&b) / (a.norm() * b.norm());
        assert!(cos_angle < 0.1);
    }
}
