//! Shared numeric constants for the canvas crate.

// ── Spans ───────────────────────────────────────────────────────

/// Row span given to a widget whose position carries no explicit span.
pub const DEFAULT_ROW_SPAN: u32 = 2;

/// Column span given to a widget whose position carries no explicit span.
pub const DEFAULT_COL_SPAN: u32 = 2;

/// Smallest span a widget may be resized to, in either direction.
pub const MIN_SPAN: u32 = 1;

// ── Grid bounds (enforced by the host, not the core) ────────────

/// Fewest rows the editor lets a user configure.
pub const MIN_GRID_ROWS: u32 = 4;

/// Most rows the editor lets a user configure.
pub const MAX_GRID_ROWS: u32 = 12;

/// Fewest columns the editor lets a user configure.
pub const MIN_GRID_COLS: u32 = 6;

/// Most columns the editor lets a user configure.
pub const MAX_GRID_COLS: u32 = 16;

/// Rows of a freshly created canvas.
pub const DEFAULT_GRID_ROWS: u32 = 8;

/// Columns of a freshly created canvas.
pub const DEFAULT_GRID_COLS: u32 = 12;
