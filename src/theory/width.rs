//! Partial and total decay widths of simplified-model mediators.
//!
//! Conventions used by every channel:
//!
//! * `z = (m_f / M)²` and the velocity factor is `β = sqrt(1 - 4z)`,
//!   evaluated as a complex square root so that flavours below threshold
//!   stay finite inside the flavour sum. Each flavour is masked to zero
//!   when `M < 2 m_f`, and the magnitude of the complex sum is returned.
//! * Scalar and pseudo-scalar couplings to fermions carry the Yukawa factor
//!   `y_f = sqrt(2) m_f / v` with the fixed [`VEV`].
//! * The gluon channel (scalar, pseudo-scalar) proceeds through a top loop:
//!   `Γ = α_s(M)² y_t² g² M³ |F(τ)|² / (32 π³ v²)` with `τ = 4 m_t² / M²`,
//!   `F_S(τ) = τ [1 + (1 - τ) f(τ)]`, `F_P(τ) = τ f(τ)` and
//!   `f(τ) = atan²(1 / sqrt(τ - 1))`. The channel only opens once the
//!   top pair does, at `M ≥ 2 m_t`, like every other threshold here.
//!
//! A non-positive mediator mass yields zero width in every channel.

use std::f64::consts::PI;
use std::fmt;

use super::complex::Complex64;
use super::constants::{alpha_s, yukawa, LEPTON_MASSES, QUARK_MASSES, TOP_MASS, VEV};
use crate::error::TheoryError;

// ---------------------------------------------------------------------------
// Couplings
// ---------------------------------------------------------------------------

/// Mediator couplings to dark matter, quarks and leptons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Couplings {
    pub g_chi: f64,
    pub g_quark: f64,
    pub g_lepton: f64,
}

impl Default for Couplings {
    fn default() -> Self {
        Self {
            g_chi: 1.0,
            g_quark: 0.25,
            g_lepton: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase-space helpers
// ---------------------------------------------------------------------------

/// 1 when the two-body decay into a pair of mass `mass` is open.
#[inline]
fn open(med_mass: f64, mass: f64) -> f64 {
    if med_mass > 0.0 && med_mass >= 2.0 * mass {
        1.0
    } else {
        0.0
    }
}

/// Masked sum over final-state masses of `weight(m) * shape(β, z)`,
/// returned as a magnitude.
fn pair_sum(
    med_mass: f64,
    masses: &[f64],
    weight: impl Fn(f64) -> f64,
    shape: impl Fn(Complex64, f64) -> Complex64,
) -> f64 {
    if med_mass <= 0.0 {
        return 0.0;
    }
    let mut total = Complex64::ZERO;
    for &mass in masses {
        let z = (mass / med_mass).powi(2);
        let beta = Complex64::real(1.0 - 4.0 * z).sqrt();
        total += shape(beta, z).scale(open(med_mass, mass) * weight(mass));
    }
    total.abs()
}

fn unit(_: f64) -> f64 {
    1.0
}

fn yukawa_sq(mass: f64) -> f64 {
    yukawa(mass).powi(2)
}

/// Spin-1 vector current: `β (1 + 2z)`.
fn vector_shape(beta: Complex64, z: f64) -> Complex64 {
    beta.scale(1.0 + 2.0 * z)
}

/// Axial current and CP-even scalar: `β³`.
fn p_wave_shape(beta: Complex64, _z: f64) -> Complex64 {
    beta.powi(3)
}

/// CP-odd scalar: `β`.
fn s_wave_shape(beta: Complex64, _z: f64) -> Complex64 {
    beta
}

// ---------------------------------------------------------------------------
// Top-loop form factors
// ---------------------------------------------------------------------------

/// `f(τ) = atan²(1 / sqrt(τ - 1))`, continued below τ = 1 through the
/// complex square root.
pub fn loop_function(tau: f64) -> Complex64 {
    if tau == 1.0 {
        return Complex64::real(PI * PI / 4.0);
    }
    let root = (Complex64::real(tau) - Complex64::ONE).sqrt();
    let a = root.inv().atan();
    a * a
}

/// `F_S(τ) = τ [1 + (1 - τ) f(τ)]`.
pub fn form_factor_scalar(tau: f64) -> Complex64 {
    (Complex64::ONE + loop_function(tau).scale(1.0 - tau)).scale(tau)
}

/// `F_P(τ) = τ f(τ)`.
pub fn form_factor_pseudo(tau: f64) -> Complex64 {
    loop_function(tau).scale(tau)
}

fn gluon_width(med_mass: f64, g: f64, form_factor: fn(f64) -> Complex64) -> f64 {
    if med_mass < 2.0 * TOP_MASS {
        return 0.0;
    }
    let tau = 4.0 * (TOP_MASS / med_mass).powi(2);
    let a_s = alpha_s(med_mass);
    a_s * a_s * yukawa_sq(TOP_MASS) * g * g * med_mass.powi(3) * form_factor(tau).abs_sq()
        / (32.0 * PI.powi(3) * VEV * VEV)
}

// ---------------------------------------------------------------------------
// Vector mediator
// ---------------------------------------------------------------------------

/// Vector mediator → q q̄, summed over six flavours (colour factor included).
pub fn vector_qq(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (4.0 * PI) * pair_sum(med_mass, &QUARK_MASSES, unit, vector_shape)
}

/// Vector mediator → ℓ⁺ℓ⁻, summed over e, μ, τ.
pub fn vector_ll(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (12.0 * PI) * pair_sum(med_mass, &LEPTON_MASSES, unit, vector_shape)
}

/// Vector mediator → ν ν̄.
pub fn vector_nn(med_mass: f64, g: f64) -> f64 {
    if med_mass <= 0.0 {
        return 0.0;
    }
    g * g * med_mass / (24.0 * PI)
}

/// Vector mediator → χ χ̄.
pub fn vector_dm(med_mass: f64, chi_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (12.0 * PI) * pair_sum(med_mass, &[chi_mass], unit, vector_shape)
}

pub fn vector_total(med_mass: f64, chi_mass: f64, c: &Couplings) -> f64 {
    vector_qq(med_mass, c.g_quark)
        + vector_ll(med_mass, c.g_lepton)
        + vector_nn(med_mass, c.g_lepton)
        + vector_dm(med_mass, chi_mass, c.g_chi)
}

// ---------------------------------------------------------------------------
// Axial-vector mediator
// ---------------------------------------------------------------------------

pub fn axial_qq(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (4.0 * PI) * pair_sum(med_mass, &QUARK_MASSES, unit, p_wave_shape)
}

pub fn axial_ll(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (12.0 * PI) * pair_sum(med_mass, &LEPTON_MASSES, unit, p_wave_shape)
}

pub fn axial_nn(med_mass: f64, g: f64) -> f64 {
    vector_nn(med_mass, g)
}

pub fn axial_dm(med_mass: f64, chi_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (12.0 * PI) * pair_sum(med_mass, &[chi_mass], unit, p_wave_shape)
}

pub fn axial_total(med_mass: f64, chi_mass: f64, c: &Couplings) -> f64 {
    axial_qq(med_mass, c.g_quark)
        + axial_ll(med_mass, c.g_lepton)
        + axial_nn(med_mass, c.g_lepton)
        + axial_dm(med_mass, chi_mass, c.g_chi)
}

// ---------------------------------------------------------------------------
// Scalar mediator
// ---------------------------------------------------------------------------

pub fn scalar_qq(med_mass: f64, g: f64) -> f64 {
    3.0 * g * g * med_mass / (16.0 * PI)
        * pair_sum(med_mass, &QUARK_MASSES, yukawa_sq, p_wave_shape)
}

pub fn scalar_ll(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (16.0 * PI) * pair_sum(med_mass, &LEPTON_MASSES, yukawa_sq, p_wave_shape)
}

/// Scalar mediator → g g through the top loop.
pub fn scalar_gg(med_mass: f64, g: f64) -> f64 {
    gluon_width(med_mass, g, form_factor_scalar)
}

pub fn scalar_dm(med_mass: f64, chi_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (8.0 * PI) * pair_sum(med_mass, &[chi_mass], unit, p_wave_shape)
}

pub fn scalar_total(med_mass: f64, chi_mass: f64, c: &Couplings) -> f64 {
    scalar_qq(med_mass, c.g_quark)
        + scalar_ll(med_mass, c.g_lepton)
        + scalar_gg(med_mass, c.g_quark)
        + scalar_dm(med_mass, chi_mass, c.g_chi)
}

// ---------------------------------------------------------------------------
// Pseudo-scalar mediator
// ---------------------------------------------------------------------------

pub fn pseudo_scalar_qq(med_mass: f64, g: f64) -> f64 {
    3.0 * g * g * med_mass / (16.0 * PI)
        * pair_sum(med_mass, &QUARK_MASSES, yukawa_sq, s_wave_shape)
}

pub fn pseudo_scalar_ll(med_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (16.0 * PI) * pair_sum(med_mass, &LEPTON_MASSES, yukawa_sq, s_wave_shape)
}

pub fn pseudo_scalar_gg(med_mass: f64, g: f64) -> f64 {
    gluon_width(med_mass, g, form_factor_pseudo)
}

pub fn pseudo_scalar_dm(med_mass: f64, chi_mass: f64, g: f64) -> f64 {
    g * g * med_mass / (8.0 * PI) * pair_sum(med_mass, &[chi_mass], unit, s_wave_shape)
}

pub fn pseudo_scalar_total(med_mass: f64, chi_mass: f64, c: &Couplings) -> f64 {
    pseudo_scalar_qq(med_mass, c.g_quark)
        + pseudo_scalar_ll(med_mass, c.g_lepton)
        + pseudo_scalar_gg(med_mass, c.g_quark)
        + pseudo_scalar_dm(med_mass, chi_mass, c.g_chi)
}

// ---------------------------------------------------------------------------
// Dispatch by mediator and channel
// ---------------------------------------------------------------------------

/// Mediator spin/parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mediator {
    Vector,
    Axial,
    Scalar,
    PseudoScalar,
}

/// Decay final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Quarks,
    Leptons,
    Neutrinos,
    DarkMatter,
    Gluons,
}

impl fmt::Display for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mediator::Vector => "vector",
            Mediator::Axial => "axial-vector",
            Mediator::Scalar => "scalar",
            Mediator::PseudoScalar => "pseudo-scalar",
        })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Quarks => "quark",
            Channel::Leptons => "lepton",
            Channel::Neutrinos => "neutrino",
            Channel::DarkMatter => "dark-matter",
            Channel::Gluons => "gluon",
        })
    }
}

impl Mediator {
    pub const ALL: [Mediator; 4] = [
        Mediator::Vector,
        Mediator::Axial,
        Mediator::Scalar,
        Mediator::PseudoScalar,
    ];

    /// Channels summed into [`Mediator::total_width`].
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Mediator::Vector | Mediator::Axial => &[
                Channel::Quarks,
                Channel::Leptons,
                Channel::Neutrinos,
                Channel::DarkMatter,
            ],
            Mediator::Scalar | Mediator::PseudoScalar => &[
                Channel::Quarks,
                Channel::Leptons,
                Channel::Gluons,
                Channel::DarkMatter,
            ],
        }
    }

    /// Width into one channel with coupling `g`. `chi_mass` only matters
    /// for [`Channel::DarkMatter`].
    pub fn partial_width(
        self,
        channel: Channel,
        med_mass: f64,
        chi_mass: f64,
        g: f64,
    ) -> Result<f64, TheoryError> {
        use Channel::*;
        use Mediator::*;
        let width = match (self, channel) {
            (Vector, Quarks) => vector_qq(med_mass, g),
            (Vector, Leptons) => vector_ll(med_mass, g),
            (Vector, Neutrinos) => vector_nn(med_mass, g),
            (Vector, DarkMatter) => vector_dm(med_mass, chi_mass, g),
            (Axial, Quarks) => axial_qq(med_mass, g),
            (Axial, Leptons) => axial_ll(med_mass, g),
            (Axial, Neutrinos) => axial_nn(med_mass, g),
            (Axial, DarkMatter) => axial_dm(med_mass, chi_mass, g),
            (Scalar, Quarks) => scalar_qq(med_mass, g),
            (Scalar, Leptons) => scalar_ll(med_mass, g),
            (Scalar, Gluons) => scalar_gg(med_mass, g),
            (Scalar, DarkMatter) => scalar_dm(med_mass, chi_mass, g),
            (PseudoScalar, Quarks) => pseudo_scalar_qq(med_mass, g),
            (PseudoScalar, Leptons) => pseudo_scalar_ll(med_mass, g),
            (PseudoScalar, Gluons) => pseudo_scalar_gg(med_mass, g),
            (PseudoScalar, DarkMatter) => pseudo_scalar_dm(med_mass, chi_mass, g),
            (Vector | Axial, Gluons) | (Scalar | PseudoScalar, Neutrinos) => {
                return Err(TheoryError::UnsupportedChannel {
                    mediator: self,
                    channel,
                })
            }
        };
        Ok(width)
    }

    /// Coupling a channel uses inside the total width.
    pub fn coupling(channel: Channel, c: &Couplings) -> f64 {
        match channel {
            Channel::Quarks | Channel::Gluons => c.g_quark,
            Channel::Leptons | Channel::Neutrinos => c.g_lepton,
            Channel::DarkMatter => c.g_chi,
        }
    }

    pub fn total_width(self, med_mass: f64, chi_mass: f64, c: &Couplings) -> f64 {
        match self {
            Mediator::Vector => vector_total(med_mass, chi_mass, c),
            Mediator::Axial => axial_total(med_mass, chi_mass, c),
            Mediator::Scalar => scalar_total(med_mass, chi_mass, c),
            Mediator::PseudoScalar => pseudo_scalar_total(med_mass, chi_mass, c),
        }
    }

    /// [`Mediator::total_width`] over an array of mediator masses.
    pub fn total_widths(self, med_masses: &[f64], chi_mass: f64, c: &Couplings) -> Vec<f64> {
        super::elementwise(med_masses, |m| self.total_width(m, chi_mass, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(f64::MIN_POSITIVE)
    }

    /// Every implemented channel with the lightest mass that can appear
    /// in its final state.
    fn channels_with_threshold(chi_mass: f64) -> Vec<(Mediator, Channel, f64)> {
        let mut out = Vec::new();
        for m in Mediator::ALL {
            for &ch in m.channels() {
                let threshold = match ch {
                    Channel::Quarks => QUARK_MASSES[0],
                    Channel::Leptons => LEPTON_MASSES[0],
                    Channel::DarkMatter => chi_mass,
                    Channel::Gluons => TOP_MASS,
                    Channel::Neutrinos => 0.0,
                };
                out.push((m, ch, threshold));
            }
        }
        out
    }

    #[test]
    fn zero_below_threshold() {
        let chi = 50.0;
        for (m, ch, threshold) in channels_with_threshold(chi) {
            if threshold == 0.0 {
                continue;
            }
            let below = 1.999 * threshold;
            let w = m.partial_width(ch, below, chi, 1.0).unwrap();
            assert_eq!(w, 0.0, "{m} {ch} at M = {below}");
        }
    }

    #[test]
    fn non_negative_everywhere() {
        let chi = 10.0;
        let masses: Vec<f64> = (0..=60).map(|i| 10f64.powf(-3.0 + 0.1 * i as f64)).collect();
        for (m, ch, _) in channels_with_threshold(chi) {
            for &mm in &masses {
                let w = m.partial_width(ch, mm, chi, 0.7).unwrap();
                assert!(w >= 0.0 && w.is_finite(), "{m} {ch} at M = {mm}: {w}");
            }
        }
    }

    #[test]
    fn non_positive_mass_has_no_width() {
        for m in Mediator::ALL {
            assert_eq!(m.total_width(0.0, 1.0, &Couplings::default()), 0.0);
            assert_eq!(m.total_width(-5.0, 1.0, &Couplings::default()), 0.0);
        }
    }

    #[test]
    fn vector_qq_sums_open_flavours_only() {
        // At 1 GeV only u, d and s pairs are open.
        let m: f64 = 1.0;
        let expected: f64 = QUARK_MASSES[..3]
            .iter()
            .map(|&q| {
                let z = (q / m).powi(2);
                m * (1.0 - 4.0 * z).sqrt() * (1.0 + 2.0 * z) / (4.0 * PI)
            })
            .sum();
        assert!(close(vector_qq(m, 1.0), expected, 1e-12));
    }

    #[test]
    fn massless_limits() {
        let m = 1000.0;
        assert!(close(axial_dm(m, 0.0, 1.0), m / (12.0 * PI), 1e-12));
        assert!(close(vector_dm(m, 0.0, 1.0), m / (12.0 * PI), 1e-12));
        assert!(close(scalar_dm(m, 0.0, 2.0), 4.0 * m / (8.0 * PI), 1e-12));
        assert!(close(pseudo_scalar_dm(m, 0.0, 1.0), m / (8.0 * PI), 1e-12));
        assert!(close(vector_nn(m, 0.5), 0.25 * m / (24.0 * PI), 1e-12));
    }

    #[test]
    fn scalar_qq_uses_yukawa_and_beta_cubed() {
        // 20 GeV: u, d, s, c, b open; top closed.
        let m: f64 = 20.0;
        let expected: f64 = QUARK_MASSES[..5]
            .iter()
            .map(|&q| {
                let beta = (1.0 - 4.0 * (q / m).powi(2)).sqrt();
                3.0 * yukawa(q).powi(2) * m * beta.powi(3) / (16.0 * PI)
            })
            .sum();
        assert!(close(scalar_qq(m, 1.0), expected, 1e-12));

        let expected_ps: f64 = QUARK_MASSES[..5]
            .iter()
            .map(|&q| {
                let beta = (1.0 - 4.0 * (q / m).powi(2)).sqrt();
                3.0 * yukawa(q).powi(2) * m * beta / (16.0 * PI)
            })
            .sum();
        assert!(close(pseudo_scalar_qq(m, 1.0), expected_ps, 1e-12));
    }

    #[test]
    fn loop_function_above_threshold_is_arcsin_squared() {
        for tau in [1.5, 4.0, 100.0] {
            let f = loop_function(tau);
            let expected = (1.0 / tau.sqrt()).asin().powi(2);
            assert!(close(f.re, expected, 1e-12));
            assert!(f.im.abs() < 1e-12);
        }
    }

    #[test]
    fn loop_function_below_threshold_matches_log_form() {
        // f(τ) = -1/4 [ln((1 + s) / (1 - s)) - iπ]², s = sqrt(1 - τ)
        for tau in [0.01, 0.3, 0.9] {
            let s = (1.0f64 - tau).sqrt();
            let l = ((1.0 + s) / (1.0 - s)).ln();
            let w = Complex64::new(l, -PI);
            let expected = (w * w).scale(-0.25);
            assert!(close(loop_function(tau).abs(), expected.abs(), 1e-10));
        }
    }

    #[test]
    fn loop_function_is_continuous_at_one() {
        let at = loop_function(1.0).abs();
        assert!(close(loop_function(1.0 + 1e-9).abs(), at, 1e-3));
        assert!(close(loop_function(1.0 - 1e-9).abs(), at, 1e-3));
    }

    #[test]
    fn heavy_top_limit_of_form_factors() {
        let tau = 1e4;
        assert!((form_factor_scalar(tau).abs() - 2.0 / 3.0).abs() < 1e-3);
        assert!((form_factor_pseudo(tau).abs() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn gluon_width_opens_at_top_pair() {
        assert_eq!(scalar_gg(100.0, 1.0), 0.0);
        assert_eq!(pseudo_scalar_gg(100.0, 1.0), 0.0);
        assert_eq!(scalar_gg(2.0 * TOP_MASS - 1e-9, 1.0), 0.0);
        assert!(scalar_gg(2.0 * TOP_MASS, 1.0) > 0.0);
        assert!(pseudo_scalar_gg(1000.0, 1.0) > 0.0);
    }

    #[test]
    fn unsupported_channels_are_reported() {
        assert_eq!(
            Mediator::Vector.partial_width(Channel::Gluons, 100.0, 1.0, 1.0),
            Err(TheoryError::UnsupportedChannel {
                mediator: Mediator::Vector,
                channel: Channel::Gluons
            })
        );
        assert!(Mediator::Scalar
            .partial_width(Channel::Neutrinos, 100.0, 1.0, 1.0)
            .is_err());
        assert!(Mediator::PseudoScalar
            .partial_width(Channel::Neutrinos, 100.0, 1.0, 1.0)
            .is_err());
    }

    #[test]
    fn total_is_sum_of_listed_channels() {
        let c = Couplings {
            g_chi: 1.0,
            g_quark: 0.25,
            g_lepton: 0.1,
        };
        for m in Mediator::ALL {
            for med in [5.0, 150.0, 2000.0] {
                let chi = 40.0;
                let sum: f64 = m
                    .channels()
                    .iter()
                    .map(|&ch| m.partial_width(ch, med, chi, Mediator::coupling(ch, &c)).unwrap())
                    .sum();
                assert!(close(m.total_width(med, chi, &c), sum, 1e-12), "{m} at {med}");
            }
        }
    }

    #[test]
    fn total_widths_is_elementwise() {
        let masses = [10.0, 100.0, 1000.0];
        let c = Couplings::default();
        let widths = Mediator::Axial.total_widths(&masses, 1.0, &c);
        assert_eq!(widths.len(), 3);
        for (w, &m) in widths.iter().zip(&masses) {
            assert_eq!(*w, axial_total(m, 1.0, &c));
        }
    }
}
