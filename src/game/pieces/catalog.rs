//! Piece Catalog
//!
//! Registered-identifier table of piece types. Each entry carries display
//! metadata, a factory that instantiates preview pieces and the placement
//! rule that decides validity for that type. String keys are a lookup
//! convenience for callers; the core works with [`PieceTypeId`].

use std::collections::BTreeMap;
use std::fmt;

use super::parts::PartNode;
use super::piece::Piece;
use super::rules::{AlwaysValid, PlacementRule};
use crate::game::builder::error::{BuildError, FactoryError};

/// Handle of a registered piece type: its index in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceTypeId(pub usize);

impl fmt::Display for PieceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Display metadata for a piece type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceMeta {
    pub name: String,
    pub category: String,
}

impl PieceMeta {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Produces fresh preview pieces for a type.
pub trait PieceFactory: Send + Sync {
    fn create(&self, type_id: PieceTypeId) -> Result<Piece, FactoryError>;
}

impl<F> PieceFactory for F
where
    F: Fn(PieceTypeId) -> Result<Piece, FactoryError> + Send + Sync,
{
    fn create(&self, type_id: PieceTypeId) -> Result<Piece, FactoryError> {
        self(type_id)
    }
}

/// Factory that flattens a part tree, validating it first.
#[derive(Debug, Clone)]
pub struct TemplateFactory {
    root: PartNode,
}

impl TemplateFactory {
    pub fn new(root: PartNode) -> Self {
        Self { root }
    }
}

impl PieceFactory for TemplateFactory {
    fn create(&self, type_id: PieceTypeId) -> Result<Piece, FactoryError> {
        let piece = Piece::from_parts(type_id, &self.root);

        if let Some(bad) = piece.connectors().iter().find(|c| !c.local.is_finite()) {
            return Err(FactoryError::InvalidTemplate(format!(
                "connector '{}' has a non-finite transform",
                bad.name
            )));
        }
        if let Some(bad) = piece.colliders().iter().find(|c| {
            !c.local.is_finite() || !c.half_extents.is_finite() || c.half_extents.min_element() <= 0.0
        }) {
            return Err(FactoryError::InvalidTemplate(format!(
                "collider '{}' must have finite, positive extents",
                bad.name
            )));
        }
        Ok(piece)
    }
}

pub struct CatalogEntry {
    pub key: String,
    pub meta: PieceMeta,
    pub factory: Box<dyn PieceFactory>,
    pub rule: Box<dyn PlacementRule>,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("key", &self.key)
            .field("meta", &self.meta)
            .field("rule", &self.rule.name())
            .finish()
    }
}

/// One row of [`PieceCatalog::by_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListing {
    pub id: PieceTypeId,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct PieceCatalog {
    entries: Vec<CatalogEntry>,
}

impl PieceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a piece type with the pass-through placement rule.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        meta: PieceMeta,
        factory: impl PieceFactory + 'static,
    ) -> PieceTypeId {
        self.register_with_rule(key, meta, factory, AlwaysValid)
    }

    /// Register a piece type. Re-registering a key replaces the entry in place
    /// and keeps its id.
    pub fn register_with_rule(
        &mut self,
        key: impl Into<String>,
        meta: PieceMeta,
        factory: impl PieceFactory + 'static,
        rule: impl PlacementRule + 'static,
    ) -> PieceTypeId {
        self.register_with(key, meta, factory, |_| rule)
    }

    /// Register a piece type whose rule is built from its own id, for rules
    /// that refer to the type being registered.
    pub fn register_with<R>(
        &mut self,
        key: impl Into<String>,
        meta: PieceMeta,
        factory: impl PieceFactory + 'static,
        rule: impl FnOnce(PieceTypeId) -> R,
    ) -> PieceTypeId
    where
        R: PlacementRule + 'static,
    {
        let key = key.into();
        let existing = self.entries.iter().position(|e| e.key == key);
        let id = PieceTypeId(existing.unwrap_or(self.entries.len()));

        let entry = CatalogEntry {
            key,
            meta,
            factory: Box::new(factory),
            rule: Box::new(rule(id)),
        };

        match existing {
            Some(index) => {
                tracing::warn!("[Catalog] Replacing piece '{}'", entry.key);
                self.entries[index] = entry;
            }
            None => {
                tracing::debug!("[Catalog] Registered '{}' as {}", entry.key, id);
                self.entries.push(entry);
            }
        }
        id
    }

    pub fn lookup(&self, id: PieceTypeId) -> Result<&CatalogEntry, BuildError> {
        self.entries
            .get(id.0)
            .ok_or(BuildError::UnknownPiece(id))
    }

    /// Resolve an external string key to its id.
    pub fn id_for(&self, key: &str) -> Result<PieceTypeId, BuildError> {
        self.entries
            .iter()
            .position(|e| e.key == key)
            .map(PieceTypeId)
            .ok_or_else(|| BuildError::UnknownPieceKey(key.to_string()))
    }

    /// Create a fresh preview piece of the given type.
    pub fn instantiate(&self, id: PieceTypeId) -> Result<Piece, BuildError> {
        let entry = self.lookup(id)?;
        let mut piece = entry
            .factory
            .create(id)
            .map_err(|source| BuildError::Instantiation {
                piece: entry.key.clone(),
                source,
            })?;
        piece.set_preview(true);
        Ok(piece)
    }

    /// Placement rule for a type; unknown types get the pass-through rule.
    pub fn rule_for(&self, id: PieceTypeId) -> &dyn PlacementRule {
        match self.entries.get(id.0) {
            Some(entry) => entry.rule.as_ref(),
            None => &AlwaysValid,
        }
    }

    /// Piece types grouped by category. Categories are sorted; entries keep
    /// registration order.
    pub fn by_category(&self) -> BTreeMap<String, Vec<CatalogListing>> {
        let mut groups: BTreeMap<String, Vec<CatalogListing>> = BTreeMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            groups
                .entry(entry.meta.category.clone())
                .or_default()
                .push(CatalogListing {
                    id: PieceTypeId(index),
                    name: entry.meta.name.clone(),
                });
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceTypeId, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (PieceTypeId(index), entry))
    }
}
