//! layerlens - map layer lifecycle reconciliation
//!
//! This library keeps the layers rendered on an interactive map in line with
//! an externally held state: which layers are active, whether a compare map
//! is shown, which date is selected and what area of interest is drawn.
//!
//! # High-Level API
//!
//! The [`view`] module provides the entry point:
//!
//! ```
//! use std::sync::Arc;
//! use layerlens::action::action_channel;
//! use layerlens::catalog::Catalog;
//! use layerlens::config::MapConfig;
//! use layerlens::state::ExternalState;
//! use layerlens::surface::memory::MemoryEngine;
//! use layerlens::view::MapView;
//!
//! let engine = MemoryEngine::new();
//! let catalog = Catalog::from_json(r#"[
//!     {"id": "population", "type": "raster",
//!      "source": {"type": "raster", "tiles": ["https://tiles/{z}/{x}/{y}"]}}
//! ]"#, None).unwrap();
//! let (tx, _rx) = action_channel();
//!
//! let mut view = MapView::new(MapConfig::default(), Arc::new(engine), Arc::new(catalog), tx);
//! view.init_map().unwrap();
//!
//! let report = view
//!     .update(ExternalState::new().with_active(["population"]))
//!     .unwrap();
//! assert_eq!(report.shown, vec!["population"]);
//! ```

pub mod action;
pub mod aoi;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod coord;
pub mod handler;
pub mod log;
pub mod logging;
pub mod reconciler;
pub mod state;
pub mod surface;
pub mod view;

/// Version of the layerlens library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
