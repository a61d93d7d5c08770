//! Translate LHC (mediator mass, DM mass) exclusions into DM-nucleon
//! cross-section limits for the vector/scalar-like (spin-independent) and
//! axial-vector-like (spin-dependent) simplified models.
//!
//! ```no_run
//! use lhctodd::theory::{Couplings, SimplifiedModel};
//!
//! let model = SimplifiedModel::spin_dependent(Couplings::default()).with_label("mono-jet");
//! let limit = model.translate_csv("some-limit-from-lhc.csv".as_ref(), b',')?;
//! let fig = limit.figure();
//! # Ok::<(), lhctodd::error::LimitError>(())
//! ```

use std::fmt;
use std::path::Path;

use super::constants::NEUTRON_MASS;
use super::width::Couplings;
use crate::data::loader::load_pairs;
use crate::error::LimitError;
use crate::plot::{cross_section_label, Figure, PlotSurface, Scale, CHI_MASS_LABEL};

/// Coupling structure of the translated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Vector or scalar mediator.
    SpinIndependent,
    /// Axial-vector mediator.
    SpinDependent,
}

impl Variant {
    /// σ in cm² at `g_q g_χ = 0.25`, `M = 1 TeV` and unit reduced-mass factor.
    pub fn normalization(self) -> f64 {
        match self {
            Variant::SpinIndependent => 6.9e-41,
            Variant::SpinDependent => 2.4e-42,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::SpinIndependent => "SI",
            Variant::SpinDependent => "SD",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coupling-parameterised simplified model.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedModel {
    pub couplings: Couplings,
    pub variant: Variant,
    pub label: Option<String>,
}

impl SimplifiedModel {
    pub fn new(variant: Variant, couplings: Couplings) -> Self {
        Self {
            couplings,
            variant,
            label: None,
        }
    }

    pub fn spin_independent(couplings: Couplings) -> Self {
        Self::new(Variant::SpinIndependent, couplings)
    }

    pub fn spin_dependent(couplings: Couplings) -> Self {
        Self::new(Variant::SpinDependent, couplings)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// DM-nucleon cross section (cm²) for mediator mass `med_mass` and DM
    /// mass `chi_mass`, both in GeV.
    pub fn sigma(&self, med_mass: f64, chi_mass: f64) -> f64 {
        let reduced = NEUTRON_MASS * chi_mass / (chi_mass + NEUTRON_MASS);
        let g = self.couplings.g_quark * self.couplings.g_chi / 0.25;
        self.variant.normalization() * g.powi(2) * (1000.0 / med_mass).powi(4) * reduced.powi(2)
    }

    /// Translate `(med_mass, chi_mass)` rows.
    pub fn translate(&self, table: &[[f64; 2]]) -> TranslatedLimit {
        let (med_mass, chi_mass): (Vec<f64>, Vec<f64>) = table.iter().map(|&[m, c]| (m, c)).unzip();
        let sigma = med_mass
            .iter()
            .zip(&chi_mass)
            .map(|(&m, &c)| self.sigma(m, c))
            .collect();
        TranslatedLimit {
            med_mass,
            chi_mass,
            sigma,
            label: self.label.clone().unwrap_or_default(),
            kind: self.variant.label().to_string(),
        }
    }

    /// Read a two-column `(mediator mass, DM mass)` table and translate it.
    pub fn translate_csv(&self, path: &Path, delimiter: u8) -> Result<TranslatedLimit, LimitError> {
        let table = load_pairs(path, delimiter)?;
        log::info!(
            "translating {} points from {} with the {} model",
            table.len(),
            path.display(),
            self.variant
        );
        Ok(self.translate(&table))
    }
}

/// Cross-section limit obtained from an LHC exclusion contour.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedLimit {
    pub med_mass: Vec<f64>,
    pub chi_mass: Vec<f64>,
    pub sigma: Vec<f64>,
    pub label: String,
    pub kind: String,
}

impl TranslatedLimit {
    /// `[sigma, chi_mass]` rows.
    pub fn pairs(&self) -> Vec<[f64; 2]> {
        self.sigma
            .iter()
            .zip(&self.chi_mass)
            .map(|(&s, &c)| [s, c])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sigma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigma.is_empty()
    }

    pub fn plot(&self, surface: &mut dyn PlotSurface) {
        surface.line(&self.chi_mass, &self.sigma, &self.label);
        surface.set_x_label(CHI_MASS_LABEL);
        surface.set_y_label(&cross_section_label(&self.kind));
        surface.set_x_scale(Scale::Log);
        surface.set_y_scale(Scale::Log);
    }

    pub fn figure(&self) -> Figure {
        let mut fig = Figure::new();
        self.plot(&mut fig);
        fig
    }
}
