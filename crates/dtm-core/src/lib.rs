//! Table state engine.
//!
//! [`TableEngine`] owns the canonical rows and columns ([`RecordStore`]), the
//! transient view settings ([`ViewState`]), and the open row drafts
//! ([`EditSessions`]). Callers obtain an engine with [`TableEngine::open`]
//! and drive it through intents; nothing here is process-global.
//!
//! # Example
//!
//! ```ignore
//! use dtm_core::TableEngine;
//! use dtm_persistence::FileSnapshotStore;
//!
//! let mut engine = TableEngine::open(FileSnapshotStore::new("datatable-state.json"));
//! engine.set_search("doe");
//! for row in engine.projection().rows {
//!     println!("{}", row.name);
//! }
//! ```

pub mod columns;
pub mod edit;
pub mod engine;
pub mod error;
pub mod form;
pub mod notification;
pub mod store;
pub mod validation;
pub mod view;

pub use edit::{CommitOutcome, EditSessions, FieldKey, ValidationErrors};
pub use engine::{TableEngine, TableSummary};
pub use error::{AddRowError, ColumnError, EditError, StoreError};
pub use form::{DEFAULT_ROLE, FormErrors, NewRowForm, ROLES};
pub use notification::{Notification, NotificationLevel};
pub use store::RecordStore;
pub use validation::{validate_field, validate_row};
pub use view::{Projection, SortDirection, SortSpec, ViewState, compare_rows, matches_query};
