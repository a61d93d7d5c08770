//! Physical constants (PDG 2020) and the running strong coupling.

use once_cell::sync::Lazy;

use crate::data::loader::parse_pairs;
use crate::interp::Interp1d;

/// Quark pole masses in GeV: u, d, s, c, b, t.
pub const QUARK_MASSES: [f64; 6] = [0.00216, 0.00467, 0.093, 1.27, 4.18, 172.76];

pub const TOP_MASS: f64 = QUARK_MASSES[5];

/// Charged lepton masses in GeV: e, μ, τ.
pub const LEPTON_MASSES: [f64; 3] = [0.000511, 0.105658, 1.77682];

/// Higgs vacuum expectation value in GeV.
pub const VEV: f64 = 246.0;

/// Neutron mass in GeV, as used by the recoil cross-section models.
pub const NEUTRON_MASS: f64 = 0.939;

/// Fermion Yukawa coupling `sqrt(2) m_f / v`.
pub fn yukawa(mass: f64) -> f64 {
    std::f64::consts::SQRT_2 * mass / VEV
}

/// `scale (GeV), alpha_s` pairs, one-loop running from alpha_s(M_Z) = 0.118
/// with flavour thresholds at m_c, m_b and m_t.
const ALPHA_S_TABLE: &str = include_str!("../../data/alpha_s.csv");

static ALPHA_S: Lazy<Interp1d> = Lazy::new(|| {
    let pairs = parse_pairs(ALPHA_S_TABLE.as_bytes(), b',', "alpha_s.csv")
        .expect("bundled alpha_s table parses");
    Interp1d::new(&pairs).expect("bundled alpha_s table has knots")
});

/// Strong coupling at `scale` GeV, interpolated from the bundled table and
/// extrapolated linearly past its ends.
pub fn alpha_s(scale: f64) -> f64 {
    ALPHA_S.eval(scale)
}
