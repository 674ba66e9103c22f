//! Tilted-dipole approximation of the IGRF magnetic field (C11). Full
//! spherical-harmonic IGRF is out of scope; the leading dipole term
//! (g10, g11, h11) with linear secular variation from epoch 2020.0 is
//! accurate to a few percent at LEO altitudes, sufficient for B-dot
//! detumble and magnetometer simulation.

use crate::math::{Mat3, Vec3};

/// Vacuum permeability / 4*pi, in the units this model works in
/// (tesla * km^3 / (A*m^2)), folded into the dipole moment magnitude below.
const MU0_OVER_4PI: f64 = 1e-7;
const EPOCH_YEAR: f64 = 2020.0;

/// IGRF-13 epoch-2020.0 Gauss coefficients (nT) and their secular
/// variation (nT/year), used to build the dipole moment vector.
#[derive(Debug, Clone, Copy)]
pub struct IgrfDipoleModel {
    pub g10_nt: f64,
    pub g11_nt: f64,
    pub h11_nt: f64,
    pub g10_dot_nt_per_year: f64,
    pub g11_dot_nt_per_year: f64,
    pub h11_dot_nt_per_year: f64,
}

impl Default for IgrfDipoleModel {
    fn default() -> Self {
        IgrfDipoleModel {
            g10_nt: -29404.8,
            g11_nt: -1450.9,
            h11_nt: 4652.5,
            g10_dot_nt_per_year: 5.7,
            g11_dot_nt_per_year: 7.4,
            h11_dot_nt_per_year: -25.9,
        }
    }
}

impl IgrfDipoleModel {
    fn coefficients_at(&self, decimal_year: f64) -> (f64, f64, f64) {
        let dt = decimal_year - EPOCH_YEAR;
        (
            self.g10_nt + self.g10_dot_nt_per_year * dt,
            self.g11_nt + self.g11_dot_nt_per_year * dt,
            self.h11_nt + self.h11_dot_nt_per_year * dt,
        )
    }

    /// Dipole moment direction (unit vector) and magnitude in the ECEF
    /// frame, derived from the tilted-dipole Gauss coefficients.
    fn dipole_moment_ecef(&self, decimal_year: f64) -> Vec3 {
        let (g10, g11, h11) = self.coefficients_at(decimal_year);
        // Earth's magnetic dipole points from north magnetic pole to south;
        // standard convention below matches g10<0 giving m roughly -z.
        Vec3::new(g11, h11, g10) * 1e-9 // nT -> T for the coefficient components
    }

    /// Magnetic field (tesla) at ECEF position `r_ecef_km`, using the
    /// point-dipole closed form `(mu0/4pi)(m/r^3)[3(m_hat.r_hat)r_hat - m_hat]`.
    pub fn field_ecef_tesla(&self, r_ecef_km: Vec3, decimal_year: f64) -> Vec3 {
        let m = self.dipole_moment_ecef(decimal_year);
        let m_norm = m.norm();
        if m_norm < 1e-30 {
            return Vec3::ZERO;
        }
        let m_hat = m.normalized();
        let r_norm = r_ecef_km.norm();
        let r_hat = r_ecef_km.normalized();

        // Earth's magnetic moment magnitude is on the order of 8e22 A*m^2;
        // the Gauss-coefficient vector above already carries the relative
        // orientation, so scale to the standard terrestrial dipole moment.
        let earth_dipole_moment_a_m2 = 8.0e22;
        let r_m = r_norm * 1000.0;
        let scalar = MU0_OVER_4PI * earth_dipole_moment_a_m2 / r_m.powi(3);
        let bracket = r_hat * (3.0 * m_hat.dot(&r_hat)) - m_hat;
        bracket * scalar
    }

    /// Rotates the ECEF field into ECI using the supplied GMST angle, then
    /// into the body frame using the attitude rotation matrix's transpose.
    pub fn field_body_tesla(
        &self,
        r_ecef_km: Vec3,
        decimal_year: f64,
        gmst_rad: f64,
        body_from_inertial: Mat3,
    ) -> Vec3 {
        let field_ecef = self.field_ecef_tesla(r_ecef_km, decimal_year);
        let field_eci = Mat3::rotation_z(gmst_rad).mul_vec(&field_ecef);
        body_from_inertial.mul_vec(&field_eci)
    }
}
