//! End-to-end behaviour of the engine against the seed dataset.

use std::path::Path;

use dtm_core::{
    ColumnError, CommitOutcome, NewRowForm, SortDirection, TableEngine,
    validation::AGE_RANGE_MESSAGE,
};
use dtm_model::{CellValue, Column, Row, RowId, default_columns};
use dtm_persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use tempfile::tempdir;

fn id(value: &str) -> RowId {
    RowId::new(value).unwrap()
}

fn seeded() -> TableEngine {
    TableEngine::open(MemorySnapshotStore::new())
}

/// Reopen the snapshot at `path` and check it restores without falling back.
fn reopen(path: &Path) -> TableEngine {
    let mut engine = TableEngine::open(FileSnapshotStore::new(path));
    let notifications = engine.take_notifications();
    assert!(notifications.is_empty(), "{notifications:?}");
    engine
}

#[test]
fn search_doe_finds_john() {
    let mut engine = seeded();
    engine.set_search("doe");
    let projection = engine.projection();
    let ids: Vec<&str> = projection.rows.iter().map(|row| row.id().as_str()).collect();
    assert_eq!(ids, vec!["1"]);
    assert_eq!(projection.filtered_count, 1);
    for row in engine.rows() {
        let listed = ids.contains(&row.id().as_str());
        let contains = row
            .fields()
            .any(|(_, value)| value.to_string().to_lowercase().contains("doe"));
        assert_eq!(listed, contains, "row {}", row.id());
    }
}

#[test]
fn add_department_column_then_duplicate_is_rejected() {
    let mut engine = seeded();
    assert_eq!(engine.add_column("Department").unwrap(), "department");
    assert_eq!(
        engine.columns().last(),
        Some(&Column::new("department", "Department"))
    );

    let before = engine.state().clone();
    assert_eq!(
        engine.add_column("Department"),
        Err(ColumnError::AlreadyExists {
            id: "department".into()
        })
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn invalid_age_commit_leaves_row_unchanged() {
    let mut engine = seeded();
    let original = engine.row(&id("3")).unwrap().clone();

    assert!(engine.begin_edit(&id("3")));
    engine.edit_field(&id("3"), "age", "200").unwrap();
    engine.edit_field(&id("3"), "name", "Robert Johnson").unwrap();

    assert_eq!(engine.commit(&id("3")), CommitOutcome::Rejected { failures: 1 });
    assert_eq!(
        engine.validation_errors().get(&id("3"), "age"),
        Some(AGE_RANGE_MESSAGE)
    );
    assert_eq!(engine.row(&id("3")), Some(&original));
    assert!(engine.is_editing(&id("3")));
}

#[test]
fn delete_role_column_is_refused_for_defaults_and_cascades_for_custom() {
    let mut engine = seeded();
    assert!(matches!(
        engine.delete_column("role"),
        Err(ColumnError::Protected { .. })
    ));
    assert!(engine.columns().iter().any(|column| column.id == "role"));

    engine.add_column("Team").unwrap();
    for index in 0..engine.rows().len() {
        let row_id = engine.rows()[index].id().clone();
        engine.begin_edit(&row_id);
        engine.edit_field(&row_id, "team", "Core").unwrap();
    }
    assert!(engine.commit_all().is_committed());
    assert!(engine.rows().iter().all(|row| row.has_field("team")));

    assert_eq!(engine.delete_column("team"), Ok(true));
    assert!(engine.rows().iter().all(|row| !row.has_field("team")));
    assert!(engine.columns().iter().all(|column| column.id != "team"));
    let after_first = engine.state().clone();
    assert_eq!(engine.delete_column("team"), Ok(false));
    assert_eq!(engine.state(), &after_first);
}

#[test]
fn sort_header_cycles_through_three_states() {
    let mut engine = seeded();
    let unsorted: Vec<String> = engine
        .projection()
        .rows
        .iter()
        .map(|row| row.id().to_string())
        .collect();

    engine.toggle_sort("age");
    assert_eq!(engine.view().sort().unwrap().direction, SortDirection::Ascending);
    assert_eq!(engine.projection().rows[0].age, 26.0);

    engine.toggle_sort("age");
    assert_eq!(engine.view().sort().unwrap().direction, SortDirection::Descending);
    assert_eq!(engine.projection().rows[0].age, 45.0);

    engine.toggle_sort("age");
    assert!(engine.view().sort().is_none());
    let restored: Vec<String> = engine
        .projection()
        .rows
        .iter()
        .map(|row| row.id().to_string())
        .collect();
    assert_eq!(restored, unsorted);
}

#[test]
fn export_then_import_keeps_visible_values() {
    let mut engine = seeded();
    engine.add_column("Office Location").unwrap();
    let row_id = id("5");
    engine.begin_edit(&row_id);
    engine
        .edit_field(&row_id, "office_location", "Oslo, Norway")
        .unwrap();
    for row in engine.rows().to_vec() {
        if row.id() != &row_id {
            engine.begin_edit(row.id());
            engine.edit_field(row.id(), "office_location", "Remote").unwrap();
        }
    }
    assert!(engine.commit_all().is_committed());

    let exported = engine.export_csv().unwrap();
    let before = engine.export_table();
    engine.import_csv(&exported).unwrap();

    assert_eq!(engine.export_table(), before);
    assert_eq!(
        engine.rows()[4].get("office_location").as_deref(),
        Some(&CellValue::from("Oslo, Norway"))
    );
}

#[test]
fn hidden_columns_are_not_exported() {
    let mut engine = seeded();
    engine.toggle_column("email");
    let text = engine.export_csv().unwrap();
    assert!(text.starts_with("Name,Age,Role\n"));
    assert!(!text.contains("john@example.com"));
}

#[test]
fn state_survives_reopen_but_view_does_not() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));
    engine.add_column("Department").unwrap();
    engine.move_column(4, 0).unwrap();
    engine.delete_row(&id("26"));
    engine.set_search("manager");
    engine.begin_edit(&id("1"));

    let reopened = TableEngine::open(FileSnapshotStore::new(&path));
    assert_eq!(reopened.state(), engine.state());
    assert_eq!(reopened.columns()[0].id, "department");
    assert_eq!(reopened.view().search(), "");
    assert_eq!(reopened.editing_count(), 0);
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));
    assert_eq!(engine.rows().len(), 26);
    assert_eq!(engine.columns(), default_columns().as_slice());
    assert_eq!(engine.take_notifications().len(), 1);

    engine.delete_row(&id("1"));
    let store = FileSnapshotStore::new(&path);
    assert_eq!(store.load().unwrap().unwrap().rows.len(), 25);
}

#[test]
fn infinite_imported_age_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));
    engine
        .import_csv("id,name,email,age,role\n7,Ada,ada@example.com,inf,Developer\n")
        .unwrap();
    assert_eq!(engine.rows()[0].age, 0.0);

    let reopened = reopen(&path);
    assert_eq!(reopened.rows().len(), 1);
    assert_eq!(reopened.state(), engine.state());
}

#[test]
fn hidden_age_edit_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));
    assert_eq!(engine.toggle_column("age"), Some(false));
    assert!(engine.begin_edit(&id("1")));
    engine.edit_field(&id("1"), "age", "abc").unwrap();
    assert!(engine.commit(&id("1")).is_committed());
    assert!(engine.delete_row(&id("2")));

    let reopened = reopen(&path);
    assert_eq!(reopened.rows().len(), 25);
    assert!(reopened.row(&id("1")).unwrap().age.is_nan());
    assert_eq!(reopened.row(&id("1")).unwrap().name, "John Doe");
    assert_eq!(reopened.columns(), engine.columns());
}

#[test]
fn row_with_reserved_custom_key_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));
    let row = Row::new(id("x"), "X", "x@example.com", 30.0, "Analyst").with_field("name", "Shadow");
    engine.insert_row(row).unwrap();
    assert_eq!(engine.row(&id("x")).unwrap().name, "Shadow");

    let reopened = reopen(&path);
    assert_eq!(reopened.rows().len(), 27);
    assert_eq!(reopened.state(), engine.state());
}

#[test]
fn unusual_accepted_states_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut engine = TableEngine::open(FileSnapshotStore::new(&path));

    // Blank value in a hidden column.
    engine.toggle_column("email");
    engine.begin_edit(&id("3"));
    engine.edit_field(&id("3"), "email", "").unwrap();
    assert!(engine.commit(&id("3")).is_committed());
    assert_eq!(reopen(&path).state(), engine.state());

    // Custom column left empty by the add-row form.
    engine.add_column("Notes").unwrap();
    let new_id = engine
        .add_row(&NewRowForm::new("Ada", "ada@example.com", "36"))
        .unwrap();
    assert_eq!(
        engine.row(&new_id).unwrap().get("notes").as_deref(),
        Some(&CellValue::from(""))
    );
    assert_eq!(reopen(&path).state(), engine.state());

    // Import with headers that match no column, one with numeric-looking text.
    engine
        .import_csv("id,name,email,age,role,Office Location,Badge\n1,A,a@b.co,30,Analyst,Oslo,0042\n2,B,b@c.co,31,Manager,,\n")
        .unwrap();
    let reopened = reopen(&path);
    assert_eq!(reopened.state(), engine.state());
    assert_eq!(
        reopened.row(&id("1")).unwrap().get("Badge").as_deref(),
        Some(&CellValue::from("0042"))
    );
}
