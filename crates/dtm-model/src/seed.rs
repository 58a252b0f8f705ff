//! Seed dataset used when no snapshot can be restored.

use crate::column::default_columns;
use crate::row::{Row, RowId};
use crate::state::TableState;

const SEED_ROWS: [(&str, &str, &str, f64, &str); 26] = [
    ("1", "John Doe", "john@example.com", 28.0, "Developer"),
    ("2", "Jane Smith", "jane@example.com", 32.0, "Designer"),
    ("3", "Bob Johnson", "bob@example.com", 45.0, "Manager"),
    ("4", "Alice Brown", "alice@example.com", 29.0, "Developer"),
    ("5", "Charlie Wilson", "charlie@example.com", 35.0, "Analyst"),
    ("6", "David Miller", "david@example.com", 31.0, "Developer"),
    ("7", "Emma Davis", "emma@example.com", 27.0, "Designer"),
    ("8", "Frank White", "frank@example.com", 39.0, "Manager"),
    ("9", "Grace Lee", "grace@example.com", 26.0, "Developer"),
    ("10", "Henry Taylor", "henry@example.com", 33.0, "Analyst"),
    ("11", "Ivy Chen", "ivy@example.com", 30.0, "Developer"),
    ("12", "Jack Wilson", "jack@example.com", 41.0, "Manager"),
    ("13", "Kate Brown", "kate@example.com", 28.0, "Designer"),
    ("14", "Leo Martinez", "leo@example.com", 34.0, "Developer"),
    ("15", "Mia Anderson", "mia@example.com", 29.0, "Analyst"),
    ("16", "Noah Garcia", "noah@example.com", 36.0, "Developer"),
    ("17", "Olivia Moore", "olivia@example.com", 32.0, "Designer"),
    ("18", "Paul Jackson", "paul@example.com", 44.0, "Manager"),
    ("19", "Quinn Harris", "quinn@example.com", 27.0, "Developer"),
    ("20", "Rachel Clark", "rachel@example.com", 31.0, "Analyst"),
    ("21", "Sam Lewis", "sam@example.com", 35.0, "Developer"),
    ("22", "Tina Walker", "tina@example.com", 29.0, "Designer"),
    ("23", "Uma Hall", "uma@example.com", 38.0, "Manager"),
    ("24", "Victor Young", "victor@example.com", 33.0, "Developer"),
    ("25", "Wendy King", "wendy@example.com", 30.0, "Analyst"),
    ("26", "Xavier Thompson", "xavier@example.com", 34.0, "Developer"),
];

/// Rows of the seed dataset.
pub fn seed_rows() -> Vec<Row> {
    SEED_ROWS
        .iter()
        .filter_map(|&(id, name, email, age, role)| {
            RowId::new(id)
                .ok()
                .map(|id| Row::new(id, name, email, age, role))
        })
        .collect()
}

/// The initial table: default columns plus the seed rows.
pub fn seed_state() -> TableState {
    TableState {
        columns: default_columns(),
        rows: seed_rows(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let state = seed_state();
        assert_eq!(state.rows.len(), 26);
        assert_eq!(state.columns.len(), 4);
        state.validate().unwrap();
    }

    #[test]
    fn test_seed_first_row() {
        let rows = seed_rows();
        let first = &rows[0];
        assert_eq!(first.id().as_str(), "1");
        assert_eq!(first.name, "John Doe");
        assert_eq!(first.email, "john@example.com");
        assert_eq!(first.age, 28.0);
        assert_eq!(first.role, "Developer");
    }
}
