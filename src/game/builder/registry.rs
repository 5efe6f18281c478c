//! Placed-Piece Registry
//!
//! Owns every committed piece. Iteration order is commit order, which is the
//! order candidate discovery breaks distance ties in. Only commit and retract
//! mutate it.

use crate::game::pieces::{Piece, PieceId};

#[derive(Debug, Default)]
pub struct PieceRegistry {
    pieces: Vec<(PieceId, Piece)>,
    next_id: u32,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a piece, promoting it to a committed obstacle.
    pub fn commit(&mut self, mut piece: Piece) -> PieceId {
        piece.set_preview(false);
        piece.set_visible(true);
        piece.set_placement_feedback(true);

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push((id, piece));
        id
    }

    /// Remove a piece, handing it back to the caller to drop.
    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|(pid, _)| *pid == id)?;
        Some(self.pieces.remove(index).1)
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, piece)| piece)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Committed pieces in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().map(|(id, piece)| (*id, piece))
    }
}
