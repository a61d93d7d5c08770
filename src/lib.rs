//! # lhctodd
//!
//! Published direct-detection (DD) exclusion limits, and the formulas that
//! put LHC dark-matter searches on the same footing.
//!
//! - [`data`]: the read-only LMDB store of limit curves, its record codec,
//!   loaders and metadata filters
//! - [`limit`]: a stored limit as an interpolated, plottable curve
//! - [`theory`]: mediator decay widths and the SI/SD recoil translation
//! - [`plot`]: the drawing interface models render onto
//!
//! ```no_run
//! use lhctodd::config::Config;
//! use lhctodd::data::filter::Selector;
//! use lhctodd::limit::DirectDetection;
//!
//! let xenon = DirectDetection::open(&Config::from_env(), &Selector::Pattern("XENON1T".into()))?;
//! println!("{} at 100 GeV: {:e} cm²", xenon.name, xenon.sigma(100.0));
//! # Ok::<(), lhctodd::error::LimitError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod interp;
pub mod limit;
pub mod listing;
pub mod plot;
pub mod theory;

pub use config::Config;
pub use data::filter::Selector;
pub use data::model::{LimitMeta, LimitRecord};
pub use data::store::LimitStore;
pub use error::{DecodeError, LimitError, StoreError, TheoryError};
pub use limit::{plot_all, DirectDetection};
