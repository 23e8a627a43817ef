//! Editor services used by the `kiosk` command line.
//!
//! ARCHITECTURE
//! ============
//! Service modules host the synchronous canvas engine: they forward its
//! actions to the configuration store and own save bookkeeping, so the CLI
//! stays focused on argument parsing and printing.

pub mod editor;
pub mod persistence;
