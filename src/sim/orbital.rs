//! Two-body + J2 + exponential-atmosphere drag orbital dynamics (C9),
//! propagated with fixed-step RK4 by default, plus classical orbital
//! element extraction for telemetry/diagnostics.

use crate::math::Vec3;
use crate::sim::integrators::rk4_step;

pub const MU_EARTH_KM3_S2: f64 = 398_600.441_8;
pub const R_EARTH_KM: f64 = 6378.137;
/// J2 zonal harmonic coefficient. The original Python source carries the
/// more precise `1.08263e-3`; this crate keeps the value the distilled
/// catalogue states (`1.0826e-3`) for its closed-form term, a difference
/// of about 3e-7 in relative orbital acceleration that is negligible
/// against the drag/J2 perturbation magnitudes this crate models.
pub const J2: f64 = 1.0826e-3;
pub const EARTH_ROTATION_RATE_RAD_S: f64 = 7.292_115_9e-5;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitalState {
    pub position_km: Vec3,
    pub velocity_km_s: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbations {
    TwoBodyOnly,
    J2Only,
    J2AndDrag,
}

#[derive(Debug, Clone, Copy)]
pub struct DragParams {
    pub cross_section_m2: f64,
    pub drag_coefficient: f64,
    pub mass_kg: f64,
}

fn exponential_atmosphere_density_kg_m3(altitude_km: f64) -> f64 {
    if altitude_km >= 1000.0 || altitude_km < 0.0 {
        return 0.0;
    }
    // Coarse exponential model: reference density/scale height at 500 km.
    let h0_km = 500.0;
    let rho0 = 6.967e-13;
    let scale_height_km = 60.828;
    rho0 * (-(altitude_km - h0_km) / scale_height_km).exp()
}

fn j2_acceleration(r: Vec3) -> Vec3 {
    let r_norm = r.norm();
    let factor = 1.5 * J2 * MU_EARTH_KM3_S2 * R_EARTH_KM * R_EARTH_KM / r_norm.powi(5);
    let z2_over_r2 = (r.z * r.z) / (r_norm * r_norm);
    let common = 5.0 * z2_over_r2;
    Vec3::new(
        factor * r.x * (common - 1.0),
        factor * r.y * (common - 1.0),
        factor * r.z * (common - 3.0),
    )
}

fn drag_acceleration(r: Vec3, v: Vec3, params: DragParams) -> Vec3 {
    let altitude_km = r.norm() - R_EARTH_KM;
    let rho = exponential_atmosphere_density_kg_m3(altitude_km);
    if rho == 0.0 {
        return Vec3::ZERO;
    }
    let earth_rotation = Vec3::new(0.0, 0.0, EARTH_ROTATION_RATE_RAD_S);
    let v_rel_km_s = v - earth_rotation.cross(&r);
    let v_rel_m_s = v_rel_km_s * 1000.0;
    let speed_m_s = v_rel_m_s.norm();
    if speed_m_s < 1e-9 {
        return Vec3::ZERO;
    }
    let drag_force_mag = 0.5 * rho * speed_m_s * speed_m_s * params.drag_coefficient * params.cross_section_m2;
    let accel_m_s2 = v_rel_m_s.normalized() * (-drag_force_mag / params.mass_kg);
    accel_m_s2 * 0.001
}

pub fn acceleration(state: OrbitalState, perturbations: Perturbations, drag: Option<DragParams>) -> Vec3 {
    let r = state.position_km;
    let r_norm = r.norm();
    let mut a = r * (-MU_EARTH_KM3_S2 / r_norm.powi(3));

    match perturbations {
        Perturbations::TwoBodyOnly => {}
        Perturbations::J2Only => a = a + j2_acceleration(r),
        Perturbations::J2AndDrag => {
            a = a + j2_acceleration(r);
            if let Some(params) = drag {
                a = a + drag_acceleration(r, state.velocity_km_s, params);
            }
        }
    }
    a
}

fn derivative(state: OrbitalState, perturbations: Perturbations, drag: Option<DragParams>) -> [f64; 6] {
    let a = acceleration(state, perturbations, drag);
    [
        state.velocity_km_s.x,
        state.velocity_km_s.y,
        state.velocity_km_s.z,
        a.x,
        a.y,
        a.z,
    ]
}

/// Propagates one fixed RK4 step of `dt` seconds.
pub fn propagate_rk4(
    state: OrbitalState,
    dt: f64,
    perturbations: Perturbations,
    drag: Option<DragParams>,
) -> OrbitalState {
    let y0 = [
        state.position_km.x,
        state.position_km.y,
        state.position_km.z,
        state.velocity_km_s.x,
        state.velocity_km_s.y,
        state.velocity_km_s.z,
    ];
    let f = move |_t: f64, y: &[f64; 6]| {
        let s = OrbitalState {
            position_km: Vec3::new(y[0], y[1], y[2]),
            velocity_km_s: Vec3::new(y[3], y[4], y[5]),
        };
        derivative(s, perturbations, drag)
    };
    let y1 = rk4_step(f, 0.0, &y0, dt);
    OrbitalState {
        position_km: Vec3::new(y1[0], y1[1], y1[2]),
        velocity_km_s: Vec3::new(y1[3], y1[4], y1[5]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_rad: f64,
    pub raan_rad: f64,
    pub arg_perigee_rad: f64,
    pub true_anomaly_rad: f64,
    pub period_s: f64,
}

/// Classical orbital elements from a Cartesian state, for telemetry and
/// the Kepler-period testable property.
pub fn elements_from_state(state: OrbitalState) -> OrbitalElements {
    let r = state.position_km;
    let v = state.velocity_km_s;
    let r_norm = r.norm();
    let v_norm = v.norm();

    let h = r.cross(&v);
    let h_norm = h.norm();

    let n = Vec3::new(0.0, 0.0, 1.0).cross(&h);
    let n_norm = n.norm();

    let mu = MU_EARTH_KM3_S2;
    let e_vec = (v.cross(&h)) * (1.0 / mu) - r * (1.0 / r_norm);
    let eccentricity = e_vec.norm();

    let energy = v_norm * v_norm / 2.0 - mu / r_norm;
    let semi_major_axis_km = if eccentricity.abs() < 1.0 - 1e-12 { -mu / (2.0 * energy) } else { f64::INFINITY };

    let inclination_rad = (h.z / h_norm).acos();

    let raan_rad = if n_norm > 1e-12 {
        let mut raan = (n.x / n_norm).acos();
        if n.y < 0.0 {
            raan = core::f64::consts::TAU - raan;
        }
        raan
    } else {
        0.0
    };

    let arg_perigee_rad = if n_norm > 1e-12 && eccentricity > 1e-12 {
        let mut arg = (n.dot(&e_vec) / (n_norm * eccentricity)).clamp(-1.0, 1.0).acos();
        if e_vec.z < 0.0 {
            arg = core::f64::consts::TAU - arg;
        }
        arg
    } else {
        0.0
    };

    let true_anomaly_rad = if eccentricity > 1e-12 {
        let mut nu = (e_vec.dot(&r) / (eccentricity * r_norm)).clamp(-1.0, 1.0).acos();
        if r.dot(&v) < 0.0 {
            nu = core::f64::consts::TAU - nu;
        }
        nu
    } else {
        0.0
    };

    let period_s = core::f64::consts::TAU * (semi_major_axis_km.powi(3) / mu).sqrt();

    OrbitalElements {
        semi_major_axis_km,
        eccentricity,
        inclination_rad,
        raan_rad,
        arg_perigee_rad,
        true_anomaly_rad,
        period_s,
    }
}
