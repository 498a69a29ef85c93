//! Pipe catalog - connection sets and entry/exit resolution
//!
//! Each pipe kind has a fixed, ordered list of open sides. Water travelling in
//! direction `D` arrives at a cell through the wall opposite `D` (travelling
//! right means entering through the left wall).
//!
//! Exits are every other open side, kept in catalog order. The flow always
//! takes the first one, which makes T and cross pipes deterministic:
//! a cross entered while travelling left leaves through the top.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Direction, PipeKind, PIPE_WEIGHTS};

use Direction::{Bottom, Left, Right, Top};

/// Open sides of a pipe kind, in catalog order
pub fn connections(kind: PipeKind) -> &'static [Direction] {
    match kind {
        PipeKind::Horizontal => &[Left, Right],
        PipeKind::Vertical => &[Top, Bottom],
        PipeKind::ElbowTl => &[Top, Left],
        PipeKind::ElbowTr => &[Top, Right],
        PipeKind::ElbowBl => &[Bottom, Left],
        PipeKind::ElbowBr => &[Bottom, Right],
        PipeKind::Cross => &[Top, Right, Bottom, Left],
        PipeKind::TTop => &[Left, Right, Top],
        PipeKind::TBottom => &[Left, Right, Bottom],
        PipeKind::TLeft => &[Top, Bottom, Left],
        PipeKind::TRight => &[Top, Bottom, Right],
    }
}

/// Check if water travelling in `travel` can enter a pipe of this kind
pub fn can_enter(kind: PipeKind, travel: Direction) -> bool {
    connections(kind).contains(&travel.opposite())
}

/// Candidate exits after entering while travelling in `travel`
///
/// Empty when the pipe cannot be entered. Order follows [`connections`].
pub fn exit_directions(kind: PipeKind, travel: Direction) -> ArrayVec<Direction, 3> {
    let entry_wall = travel.opposite();
    let sides = connections(kind);
    if !sides.contains(&entry_wall) {
        return ArrayVec::new();
    }
    sides.iter().copied().filter(|&d| d != entry_wall).collect()
}

/// Exit the flow takes: the first candidate in catalog order
pub fn resolve_exit(kind: PipeKind, travel: Direction) -> Option<Direction> {
    exit_directions(kind, travel).first().copied()
}

/// Cross pipes are the only ones meant to be traversed twice
pub fn is_cross(kind: PipeKind) -> bool {
    kind == PipeKind::Cross
}

/// Draw a pipe kind from the weighted table
///
/// Cumulative scan in catalog order over an integer draw in `[0, total)`.
pub fn weighted_random_kind(rng: &mut SimpleRng) -> PipeKind {
    let total: u32 = PIPE_WEIGHTS.iter().map(|&(_, w)| w).sum();
    let mut remaining = rng.next_range(total);
    for &(kind, weight) in PIPE_WEIGHTS.iter() {
        if remaining < weight {
            return kind;
        }
        remaining -= weight;
    }
    PipeKind::Horizontal
}
