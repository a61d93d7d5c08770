//! Theory layer: closed-form mediator widths and the translation of LHC
//! limits into DM-nucleon cross sections.
//!
//! ```text
//!   constants (masses, v, alpha_s table)
//!        │
//!        ├──► width       Γ(M) per mediator and channel
//!        │
//!        └──► simplified  σ(M, m_χ) for SI / SD recoil
//! ```
//!
//! Every function here is pure; nothing touches the limit store.

pub mod complex;
pub mod constants;
pub mod simplified;
pub mod width;

pub use simplified::{SimplifiedModel, TranslatedLimit, Variant};
pub use width::{Channel, Couplings, Mediator};

/// Apply a scalar formula to every element of `xs`.
pub fn elementwise(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    xs.iter().map(|&x| f(x)).collect()
}
