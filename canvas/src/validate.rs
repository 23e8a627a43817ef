//! Placement and resize predicates.
//!
//! Both validators are pure: they look at an [`Occupancy`] and a proposed
//! rectangle and return a [`Verdict`]. Committing an accepted result is the
//! caller's job, and so is turning a rejection into a user-facing message.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::grid::Occupancy;
use crate::widget::{GridPosition, Span, Widget, WidgetId};

/// Outcome of a placement or resize check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Committing the change keeps every layout invariant.
    Accepted,
    /// The rectangle would extend past the last row or column.
    RejectedBounds,
    /// The rectangle would cover a cell owned by another widget.
    RejectedOverlap {
        /// First conflicting widget found, scanning row-major.
        other: WidgetId,
    },
    /// The span is below one cell in some direction.
    RejectedMinSize,
}

impl Verdict {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// May `widget` occupy `(row, col)` as its top-left cell?
///
/// The widget's current span is kept; an un-placed widget takes the default
/// span. Cells the widget already owns do not count as conflicts, so putting
/// a widget back where it is always succeeds.
#[must_use]
pub fn can_place(occupancy: &Occupancy<'_>, widget: &Widget, row: u32, col: u32) -> Verdict {
    can_place_span(occupancy, &widget.id, widget.span(), row, col)
}

/// [`can_place`] with an explicit span. An empty span is never placeable.
#[must_use]
pub fn can_place_span(occupancy: &Occupancy<'_>, id: &str, span: Span, row: u32, col: u32) -> Verdict {
    if !span.meets_minimum() {
        return Verdict::RejectedMinSize;
    }
    if !occupancy.dims().fits(row, col, span) {
        return Verdict::RejectedBounds;
    }
    check_overlap(occupancy, id, row, col, span)
}

/// May the widget at `position` grow or shrink to `new_span` without moving?
///
/// Rules run in order and the first failure wins: minimum size, bounds, overlap.
#[must_use]
pub fn can_resize(occupancy: &Occupancy<'_>, id: &str, position: &GridPosition, new_span: Span) -> Verdict {
    can_place_span(occupancy, id, new_span, position.row, position.col)
}

fn check_overlap(occupancy: &Occupancy<'_>, id: &str, row: u32, col: u32, span: Span) -> Verdict {
    match occupancy.conflict(id, row, col, span) {
        Some(other) => Verdict::RejectedOverlap { other: other.to_string() },
        None => Verdict::Accepted,
    }
}
