//! Rendering: draws an occupancy grid as plain text.
//!
//! Each placed widget gets a single-character tag, assigned in the order
//! widgets are first met scanning row-major. Free cells are drawn as `.`.
//! A legend mapping tags to widget ids follows the grid. This module only
//! reads state; it never mutates the registry.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::grid::Occupancy;

/// Tags handed out to widgets, in order.
const TAGS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Tag used once every entry in [`TAGS`] is taken.
const OVERFLOW_TAG: char = '#';

/// Free cell marker.
const EMPTY_TAG: char = '.';

/// Render the grid, one line per row, followed by the legend.
#[must_use]
pub fn to_text(occupancy: &Occupancy<'_>) -> String {
    let dims = occupancy.dims();
    let mut seen: Vec<&str> = Vec::new();
    let mut out = String::new();

    for row in 0..dims.rows {
        for col in 0..dims.cols {
            let tag = match occupancy.owner(row, col) {
                None => EMPTY_TAG,
                Some(id) => {
                    let idx = seen.iter().position(|s| *s == id).unwrap_or_else(|| {
                        seen.push(id);
                        seen.len() - 1
                    });
                    tag_for(idx)
                }
            };
            out.push(tag);
        }
        out.push('\n');
    }

    for (idx, id) in seen.iter().enumerate() {
        out.push(tag_for(idx));
        out.push(' ');
        out.push_str(id);
        out.push('\n');
    }
    out
}

fn tag_for(idx: usize) -> char {
    TAGS.get(idx).map_or(OVERFLOW_TAG, |b| char::from(*b))
}
