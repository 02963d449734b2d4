//! # osmodry-core
//!
//! The stage-processing engine for osmodry - THE LOGIC.
//!
//! This crate models a food sample going through osmotic dehydration and
//! one or more drying stages. A [`Session`] owns the sample, applies stages
//! in the order the caller requests them, and keeps an append-only
//! [`HistoryLog`] that export and reporting read at the end.
//!
//! ## Data Flow
//!
//! ```text
//! Session::new ──► apply_osmosis / apply_drying ... ──► history()
//!                        │                                 │
//!                 Stage::losses()              ┌───────────┴──────────┐
//!                 SampleState::apply()         ▼                      ▼
//!                 HistoryLog::push()      export::export()   Trajectory::from_history()
//! ```
//!
//! ## Architectural Constraints
//!
//! - Synchronous and single-threaded; no I/O beyond caller-supplied writers
//! - No logging: progress lines are produced through `Display` and emitted
//!   by the application layer
//! - Internal state is never rounded; only history snapshots are
//!
//! ## Example
//!
//! ```
//! use osmodry_core::Session;
//!
//! let mut session = Session::new(100.0, 90.0)?;
//! session.apply_osmosis(50.0, 6.0)?;
//! session.apply_drying(60.0, 5.0)?;
//!
//! assert_eq!(session.history().len(), 2);
//! assert_eq!(session.state().elapsed_hours(), 11.0);
//! # Ok::<(), osmodry_core::ProcessError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod export;
pub mod history;
pub mod reference;
pub mod report;
pub mod sample;
pub mod session;
pub mod stage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{HistoryEntry, ProcessError, StageKind, round2};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use history::HistoryLog;
pub use sample::SampleState;
pub use session::{Session, StageOutcome};
pub use stage::{Stage, StageLoss};

// =============================================================================
// RE-EXPORTS: Reporting
// =============================================================================

#[cfg(feature = "crypto-hash")]
pub use export::export_checksum;
pub use export::{COLUMNS, ExportFormat, ProcessTable, export, export_json};
pub use reference::ReferenceSection;
pub use report::{Bounds, Trajectory};
