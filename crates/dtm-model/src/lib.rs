//! Data model for the table editor.
//!
//! Rows keep the four default fields typed and every other column in an open
//! extension map, so a row may lack any custom column without losing type
//! safety on the known ones.

pub mod column;
pub mod error;
pub mod row;
pub mod seed;
pub mod state;
pub mod value;

pub use column::{
    AGE, Column, DEFAULT_COLUMN_IDS, EMAIL, ID, NAME, ROLE, column_id_from_label, default_columns,
    is_default_column,
};
pub use error::{ModelError, Result};
pub use row::{Row, RowId};
pub use seed::{seed_rows, seed_state};
pub use state::{PAGE_SIZE, TableState};
pub use value::CellValue;
