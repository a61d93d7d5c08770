//! Data layer: record types, the on-disk codec, the LMDB store, table
//! loading and metadata filtering.
//!
//! Architecture:
//! ```text
//!   darkmatter-data/ (LMDB)      curation .json / LHC .csv
//!        │                              │
//!        ▼                              ▼
//!   ┌──────────┐                  ┌──────────┐
//!   │  store   │  key → blob      │  loader  │  parse file → rows
//!   └──────────┘                  └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  codec   │  blob ↔ (LimitCurve, LimitMeta)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ LimitRecord   │  curve + citation metadata
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  selectors / metadata predicates
//!   └──────────┘
//! ```

pub mod codec;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
