//! Block-structured mesh substrate for Plume.
//!
//! A level is covered by a [`BoxLayout`] of disjoint cell-centered boxes.
//! Each [`MultiField`] stores one [`FieldBlock`] per box, grown by a ghost
//! layer and tagged with an [`IndexType`] (nodal or cell-centered per
//! axis). On top of that this crate provides what a fluid stage needs from
//! its grid:
//!
//! - halo exchange respecting domain periodicity ([`MultiField::fill_boundary`])
//! - ownership masks that count shared nodes exactly once ([`OwnerMask`])
//! - disjoint tiles, optionally ghost-grown ([`BoxLayout::tiles`])
//! - same-resolution interpolation between staggerings ([`interp::sample`])
//! - debug-build write-once tracking for scratch fields ([`WriteOnceGuard`])
//!
//! Everything is single-process; parallelism is over tiles and blocks via
//! rayon.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod geometry;
pub mod guard;
pub mod halo;
pub mod index;
pub mod index_box;
pub mod interp;
pub mod layout;
pub mod mask;
pub mod tiling;

pub use error::MeshError;
pub use field::{FieldBlock, MultiField};
pub use geometry::Geometry;
pub use guard::WriteOnceGuard;
pub use halo::CommPrecision;
pub use index::{Axis, IndexType, IntVect};
pub use index_box::IndexBox;
pub use layout::BoxLayout;
pub use mask::OwnerMask;
pub use tiling::{Tile, TileSize};
