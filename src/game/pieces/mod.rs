//! Pieces Module
//!
//! Structural pieces, their connectors and colliders, the piece catalog and
//! per-type placement rules.

pub mod catalog;
pub mod connector;
pub mod parts;
pub mod piece;
pub mod rules;
pub mod templates;

pub use catalog::{CatalogEntry, CatalogListing, PieceCatalog, PieceFactory, PieceMeta, PieceTypeId, TemplateFactory};
pub use connector::Connector;
pub use parts::{Collider, PartNode, PartTag};
pub use piece::{Piece, PieceId, PieceState};
pub use rules::{AllOf, AlwaysValid, NoOverlap, PlacementCheck, PlacementRule, RequireSnapTo};
pub use templates::default_catalog;
