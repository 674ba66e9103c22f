//! Ground-station visibility (C11): geodetic-to-ECEF, ECEF-to-ECI via
//! GMST rotation, and the ENU transform used to compute elevation/azimuth
//! and pass windows over a trajectory.

use crate::math::{Mat3, Vec3};
use crate::sim::orbital::R_EARTH_KM;

const DEFAULT_ELEVATION_THRESHOLD_DEG: f64 = 10.0;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct GroundStation {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_km: f64,
    pub elevation_threshold_deg: f64,
}

impl GroundStation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        GroundStation {
            latitude_rad: latitude_deg.to_radians(),
            longitude_rad: longitude_deg.to_radians(),
            altitude_km,
            elevation_threshold_deg: DEFAULT_ELEVATION_THRESHOLD_DEG,
        }
    }

    /// Spherical-Earth geodetic-to-ECEF (adequate for LOS geometry at the
    /// precision this crate otherwise targets; no WGS-84 flattening term).
    fn position_ecef_km(&self) -> Vec3 {
        let r = R_EARTH_KM + self.altitude_km;
        Vec3::new(
            r * self.latitude_rad.cos() * self.longitude_rad.cos(),
            r * self.latitude_rad.cos() * self.longitude_rad.sin(),
            r * self.latitude_rad.sin(),
        )
    }

    fn position_eci_km(&self, gmst_rad: f64) -> Vec3 {
        Mat3::rotation_z(gmst_rad).mul_vec(&self.position_ecef_km())
    }

    /// East/North/Up unit vectors at the station, in ECI at the given GMST.
    fn enu_basis(&self, gmst_rad: f64) -> (Vec3, Vec3, Vec3) {
        let lon_eci = self.longitude_rad + gmst_rad;
        let east = Vec3::new(-lon_eci.sin(), lon_eci.cos(), 0.0);
        let up = Vec3::new(
            self.latitude_rad.cos() * lon_eci.cos(),
            self.latitude_rad.cos() * lon_eci.sin(),
            self.latitude_rad.sin(),
        );
        let north = up.cross(&east);
        (east, north, up)
    }

    /// Elevation and azimuth (radians) of the spacecraft as seen from the
    /// station, plus slant range (km).
    pub fn look_angles(&self, spacecraft_position_eci_km: Vec3, gmst_rad: f64) -> (f64, f64, f64) {
        let station_eci = self.position_eci_km(gmst_rad);
        let (east, north, up) = self.enu_basis(gmst_rad);

        let line_of_sight = spacecraft_position_eci_km - station_eci;
        let range_km = line_of_sight.norm();
        let los_hat = line_of_sight.normalized();

        let up_component = los_hat.dot(&up);
        let east_component = los_hat.dot(&east);
        let north_component = los_hat.dot(&north);

        let elevation_rad = up_component.clamp(-1.0, 1.0).asin();
        let azimuth_rad = east_component.atan2(north_component).rem_euclid(core::f64::consts::TAU);

        (elevation_rad, azimuth_rad, range_km)
    }

    pub fn is_visible(&self, spacecraft_position_eci_km: Vec3, gmst_rad: f64) -> bool {
        let (elevation_rad, _, _) = self.look_angles(spacecraft_position_eci_km, gmst_rad);
        elevation_rad.to_degrees() >= self.elevation_threshold_deg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassWindow {
    pub start_time_s: f64,
    pub end_time_s: f64,
    pub max_elevation_deg: f64,
}

/// Aggregates a trajectory of `(time_s, position_eci_km, gmst_rad)` samples
/// into discrete visibility pass windows.
pub fn find_passes(station: &GroundStation, samples: &[(f64, Vec3, f64)]) -> heapless::Vec<PassWindow, 64> {
    let mut passes: heapless::Vec<PassWindow, 64> = heapless::Vec::new();
    let mut current: Option<PassWindow> = None;

    for &(time_s, position, gmst_rad) in samples {
        let visible = station.is_visible(position, gmst_rad);
        let (elevation_rad, _, _) = station.look_angles(position, gmst_rad);
        let elevation_deg = elevation_rad.to_degrees();

        match (&mut current, visible) {
            (None, true) => {
                current = Some(PassWindow { start_time_s: time_s, end_time_s: time_s, max_elevation_deg: elevation_deg });
            }
            (Some(window), true) => {
                window.end_time_s = time_s;
                if elevation_deg > window.max_elevation_deg {
                    window.max_elevation_deg = elevation_deg;
                }
            }
            (Some(window), false) => {
                let _ = passes.push(*window);
                current = None;
            }
            (None, false) => {}
        }
    }
    if let Some(window) = current {
        let _ = passes.push(window);
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_is_visible_directly_overhead() {
        let station = GroundStation::new(0.0, 0.0, 0.0);
        let overhead = Vec3::new(R_EARTH_KM + 500.0, 0.0, 0.0);
        assert!(station.is_visible(overhead, 0.0));
    }

    #[test]
    fn station_is_not_visible_on_the_opposite_side_of_earth() {
        let station = GroundStation::new(0.0, 0.0, 0.0);
        let far_side = Vec3::new(-(R_EARTH_KM + 500.0), 0.0, 0.0);
        assert!(!station.is_visible(far_side, 0.0));
    }

    #[test]
    fn find_passes_groups_contiguous_visible_samples() {
        let station = GroundStation::new(0.0, 0.0, 0.0);
        let visible = Vec3::new(R_EARTH_KM + 500.0, 0.0, 0.0);
        let hidden = Vec3::new(-(R_EARTH_KM + 500.0), 0.0, 0.0);
        let samples = [
            (0.0, hidden, 0.0),
            (1.0, visible, 0.0),
            (2.0, visible, 0.0),
            (3.0, hidden, 0.0),
        ];
        let passes = find_passes(&station, &samples);
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].start_time_s, 1.0);
        assert_eq!(passes[0].end_time_s, 2.0);
    }
}
