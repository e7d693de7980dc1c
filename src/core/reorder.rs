//! Drag-to-reorder engine
//!
//! Translates a pointer-drag gesture over a rendered list into a single
//! `(from, to)` move command. Stateless across gestures except for the
//! currently-dragged element; geometry comes in as plain bounding boxes
//! so the hit-testing stays independent of any rendering layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Fraction of the element height on each side of the midpoint treated as
/// the hysteresis dead-zone.
const DEAD_ZONE_RATIO: f64 = 0.3;

/// Which side of the candidate the dragged element would land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub enum DropPosition {
    Before,
    After,
}

/// Vertical extent of a rendered list element
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// The single insertion marker; at most one candidate carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct InsertionMarker {
    pub index: usize,
    pub position: DropPosition,
}

/// A resolved move instruction for the list store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct MoveCommand {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    origin: usize,
    marker: Option<InsertionMarker>,
}

/// Gesture state machine for one list
#[derive(Debug, Default)]
pub struct ReorderEngine {
    drag: Option<DragState>,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self { drag: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Record the dragged element and its original index
    pub fn begin(&mut self, element_index: usize) {
        self.drag = Some(DragState {
            origin: element_index,
            marker: None,
        });
    }

    /// Update the insertion marker while the pointer moves over a candidate.
    ///
    /// Setting the marker replaces whatever candidate carried it before, so
    /// only one marker exists at a time. Returns the marker to render, or
    /// `None` when no drag is active.
    pub fn hover(
        &mut self,
        pointer_y: f64,
        candidate: ElementBounds,
        candidate_index: usize,
    ) -> Option<InsertionMarker> {
        let drag = self.drag.as_mut()?;

        let marker = InsertionMarker {
            index: candidate_index,
            position: resolve_position(pointer_y, candidate),
        };
        drag.marker = Some(marker);
        Some(marker)
    }

    /// Resolve the drop into a move command.
    ///
    /// Accounts for the slot freed by removing the source element: when the
    /// source sits above the insertion point, every subsequent index shifts
    /// down by one before insertion. Dropping back onto the original slot
    /// (including onto the dragged element itself) is a no-op.
    pub fn drop_at(
        &mut self,
        candidate_index: usize,
        position: DropPosition,
    ) -> Option<MoveCommand> {
        let drag = self.drag?;

        let mut new_index = match position {
            DropPosition::Before => candidate_index,
            DropPosition::After => candidate_index + 1,
        };
        if drag.origin < new_index {
            new_index -= 1;
        }

        if new_index == drag.origin {
            return None;
        }

        Some(MoveCommand {
            from: drag.origin,
            to: new_index,
        })
    }

    /// Clear drag state and the marker.
    ///
    /// Must run on every drag termination, including cancellation, so no
    /// visual state sticks around.
    pub fn end(&mut self) {
        self.drag = None;
    }

    /// Current marker, if a drag is active and has hovered a candidate
    pub fn marker(&self) -> Option<InsertionMarker> {
        self.drag.and_then(|d| d.marker)
    }
}

/// Pick the insertion side for a pointer position over a candidate.
///
/// Outside the `height * 0.3` band around the midpoint the side is taken
/// directly; inside the band a plain midpoint comparison still picks a
/// side deterministically, which keeps the marker from flickering while
/// the pointer rests near the middle.
pub fn resolve_position(pointer_y: f64, candidate: ElementBounds) -> DropPosition {
    let mid = candidate.top + candidate.height / 2.0;
    let threshold = candidate.height * DEAD_ZONE_RATIO;

    if pointer_y < mid - threshold {
        DropPosition::Before
    } else if pointer_y > mid + threshold {
        DropPosition::After
    } else if pointer_y < mid {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATE: ElementBounds = ElementBounds { top: 0.0, height: 100.0 };

    #[test]
    fn test_resolve_outside_the_band() {
        assert_eq!(resolve_position(10.0, CANDIDATE), DropPosition::Before);
        assert_eq!(resolve_position(95.0, CANDIDATE), DropPosition::After);
    }

    #[test]
    fn test_dead_zone_falls_back_to_midpoint() {
        // mid = 50, band = [20, 80]
        assert_eq!(resolve_position(55.0, CANDIDATE), DropPosition::After);
        assert_eq!(resolve_position(45.0, CANDIDATE), DropPosition::Before);
        // Exactly on the midpoint resolves after
        assert_eq!(resolve_position(50.0, CANDIDATE), DropPosition::After);
    }

    #[test]
    fn test_band_boundaries_still_pick_a_side() {
        assert_eq!(resolve_position(20.0, CANDIDATE), DropPosition::Before);
        assert_eq!(resolve_position(80.0, CANDIDATE), DropPosition::After);
    }

    #[test]
    fn test_offset_candidate_uses_its_own_box() {
        let lower = ElementBounds { top: 200.0, height: 40.0 };
        // mid = 220, band = [208, 232]
        assert_eq!(resolve_position(205.0, lower), DropPosition::Before);
        assert_eq!(resolve_position(235.0, lower), DropPosition::After);
        assert_eq!(resolve_position(221.0, lower), DropPosition::After);
    }

    #[test]
    fn test_drop_after_applies_shift_correction() {
        let mut engine = ReorderEngine::new();
        engine.begin(0);

        // origin 0, candidate 3, after: 4 corrected down to 3
        let cmd = engine.drop_at(3, DropPosition::After).unwrap();
        assert_eq!(cmd, MoveCommand { from: 0, to: 3 });
    }

    #[test]
    fn test_drop_before_earlier_candidate_needs_no_correction() {
        let mut engine = ReorderEngine::new();
        engine.begin(4);

        let cmd = engine.drop_at(0, DropPosition::Before).unwrap();
        assert_eq!(cmd, MoveCommand { from: 4, to: 0 });
    }

    #[test]
    fn test_drop_onto_original_slot_is_a_noop() {
        let mut engine = ReorderEngine::new();
        engine.begin(2);

        // Onto itself, either side
        assert_eq!(engine.drop_at(2, DropPosition::Before), None);
        assert_eq!(engine.drop_at(2, DropPosition::After), None);
        // Immediately after the previous element lands back on index 2
        assert_eq!(engine.drop_at(1, DropPosition::After), None);
        // Immediately before the next element does too
        assert_eq!(engine.drop_at(3, DropPosition::Before), None);
    }

    #[test]
    fn test_move_applied_to_a_list_matches_expected_order() {
        let mut engine = ReorderEngine::new();
        engine.begin(0);
        let cmd = engine.drop_at(3, DropPosition::After).unwrap();

        let mut list = vec![0, 1, 2, 3, 4];
        let moved = list.remove(cmd.from);
        list.insert(cmd.to, moved);
        assert_eq!(list, vec![1, 2, 3, 0, 4]);
    }

    #[test]
    fn test_hover_keeps_a_single_marker() {
        let mut engine = ReorderEngine::new();
        engine.begin(0);

        let first = engine.hover(230.0, ElementBounds { top: 200.0, height: 40.0 }, 2);
        assert_eq!(first.map(|m| m.index), Some(2));

        let second = engine.hover(330.0, ElementBounds { top: 300.0, height: 40.0 }, 3);
        assert_eq!(second.map(|m| m.index), Some(3));
        // Entering the new candidate replaced the old marker
        assert_eq!(engine.marker().map(|m| m.index), Some(3));
    }

    #[test]
    fn test_gesture_calls_are_ignored_without_begin() {
        let mut engine = ReorderEngine::new();

        assert_eq!(engine.hover(10.0, CANDIDATE, 0), None);
        assert_eq!(engine.drop_at(1, DropPosition::After), None);
    }

    #[test]
    fn test_end_clears_state_even_without_a_drop() {
        let mut engine = ReorderEngine::new();
        engine.begin(1);
        engine.hover(55.0, CANDIDATE, 0);
        assert!(engine.is_dragging());

        engine.end();

        assert!(!engine.is_dragging());
        assert_eq!(engine.marker(), None);
        assert_eq!(engine.drop_at(0, DropPosition::Before), None);
    }
}
