//! Kiosk layout editor: hosts the `kiosk-canvas` engine against a widget
//! configuration store.
//!
//! | Module | Role |
//! |--------|------|
//! | `catalog` | Stock widgets used when a store is empty |
//! | `config` | Environment-driven editor configuration |
//! | `store` | `WidgetConfigStore` trait plus memory, file and HTTP adapters |
//! | `services` | Editor session and whole-layout persistence |

pub mod catalog;
pub mod config;
pub mod services;
pub mod store;
