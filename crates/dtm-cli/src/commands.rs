//! Command handlers. Each one applies a single intent to the engine and
//! writes its report to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info_span};

use dtm_core::{
    AddRowError, CommitOutcome, NewRowForm, Notification, SortDirection, SortSpec, TableEngine,
};
use dtm_ingest::export_file_name;
use dtm_model::{Column, ID, RowId, is_default_column};

use crate::cli::{AddRowArgs, ColumnsCommand, Command, EditArgs, ShowArgs};
use crate::summary::{columns_table, notification_line, paging_line, projection_table, summary_line};

/// Run one command, then report queued notifications.
///
/// Returns `Ok(false)` when the intent was rejected or an error notification
/// was raised; `Err` is reserved for bad arguments and output failures.
pub fn execute(command: &Command, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    let succeeded = match command {
        Command::Show(args) => run_show(args, engine, out)?,
        Command::AddRow(args) => run_add_row(args, engine, out)?,
        Command::DeleteRow { id } => run_delete_row(id, engine, out)?,
        Command::Edit(args) => run_edit(args, engine, out)?,
        Command::Columns(command) => run_columns(command, engine, out)?,
        Command::Import { file } => run_import(file, engine),
        Command::Export { output } => run_export(output.as_deref(), engine, out)?,
    };

    let notifications = engine.take_notifications();
    for notification in &notifications {
        writeln!(out, "{}", notification_line(notification)).context("write output")?;
    }
    out.flush().context("flush output")?;
    Ok(succeeded && !notifications.iter().any(Notification::is_error))
}

fn run_show(args: &ShowArgs, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    if let Some(query) = &args.search {
        engine.set_search(query.clone());
    }
    if let Some(sort) = &args.sort {
        let column = resolve_column(engine.columns(), sort)
            .ok_or_else(|| anyhow!("unknown column '{sort}'"))?;
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        engine.set_sort(Some(SortSpec { column, direction }));
    }
    engine.set_page(args.page - 1);

    let projection = engine.projection();
    if projection.page_count > 0 && projection.page >= projection.page_count {
        bail!(
            "page {} is past the end (the table has {} pages)",
            args.page,
            projection.page_count
        );
    }
    let table = projection_table(&projection, engine.columns());
    writeln!(out, "{table}")?;
    writeln!(out, "{}", paging_line(&projection))?;
    writeln!(out, "{}", summary_line(&engine.summary()))?;
    Ok(true)
}

fn run_add_row(args: &AddRowArgs, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    let mut form = NewRowForm::new(&args.name, &args.email, &args.age).with_role(&args.role);
    for assignment in &args.fields {
        let (column, value) = parse_assignment(assignment)?;
        if is_default_column(&column) || engine.state().column(&column).is_none() {
            bail!("'{column}' is not a custom column; use the dedicated flag or add the column first");
        }
        form = form.with_field(column, value);
    }

    match engine.add_row(&form) {
        Ok(id) => {
            writeln!(out, "Added row {id}")?;
            Ok(true)
        }
        Err(AddRowError::Invalid(errors)) => {
            for (field, message) in errors {
                writeln!(out, "{field}: {message}")?;
            }
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn run_delete_row(id: &str, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    let id = RowId::new(id)?;
    if engine.delete_row(&id) {
        writeln!(out, "Deleted row {id}")?;
        Ok(true)
    } else {
        writeln!(out, "No row with id '{id}'")?;
        Ok(false)
    }
}

fn run_edit(args: &EditArgs, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    let id = RowId::new(args.id.as_str())?;
    let assignments = args
        .set
        .iter()
        .map(|assignment| parse_assignment(assignment))
        .collect::<Result<Vec<_>>>()?;
    for (column, _) in &assignments {
        if column != ID && engine.state().column(column).is_none() {
            bail!("unknown column '{column}'");
        }
    }

    let span = info_span!("edit", row_id = %id);
    let _guard = span.enter();
    if !engine.begin_edit(&id) {
        writeln!(out, "No row with id '{id}'")?;
        return Ok(false);
    }
    for (column, value) in &assignments {
        engine
            .edit_field(&id, column, value)
            .with_context(|| format!("edit field '{column}'"))?;
    }

    match engine.commit(&id) {
        CommitOutcome::Committed(_) => {
            writeln!(out, "Updated row {id}")?;
            Ok(true)
        }
        CommitOutcome::Rejected { failures } => {
            debug!(failures, "edit rejected");
            for (column, message) in engine.validation_errors().for_row(&id) {
                writeln!(out, "{column}: {message}")?;
            }
            engine.cancel(&id);
            Ok(false)
        }
        CommitOutcome::NothingToCommit => Ok(false),
    }
}

fn run_columns(
    command: &ColumnsCommand,
    engine: &mut TableEngine,
    out: &mut dyn Write,
) -> Result<bool> {
    match command {
        ColumnsCommand::List => {
            writeln!(out, "{}", columns_table(engine.columns()))?;
        }
        ColumnsCommand::Add { label } => {
            let id = engine.add_column(label)?;
            writeln!(out, "Added column '{id}'")?;
        }
        ColumnsCommand::Delete { id } => {
            if !engine.delete_column(id)? {
                writeln!(out, "No column with id '{id}'")?;
                return Ok(false);
            }
            writeln!(out, "Deleted column '{id}'")?;
        }
        ColumnsCommand::Toggle { id } => match engine.toggle_column(id) {
            Some(visible) => {
                let state = if visible { "visible" } else { "hidden" };
                writeln!(out, "Column '{id}' is now {state}")?;
            }
            None => {
                writeln!(out, "No column with id '{id}'")?;
                return Ok(false);
            }
        },
        ColumnsCommand::Rename { id, label } => {
            engine.relabel_column(id, label)?;
            writeln!(out, "Column '{id}' is now labeled '{label}'")?;
        }
        ColumnsCommand::Move { from, to } => {
            let (Some(from_index), Some(to_index)) = (from.checked_sub(1), to.checked_sub(1))
            else {
                bail!("column positions start at 1");
            };
            engine.move_column(from_index, to_index)?;
            writeln!(out, "{}", columns_table(engine.columns()))?;
        }
    }
    Ok(true)
}

fn run_import(file: &Path, engine: &mut TableEngine) -> bool {
    engine.import_file(file).is_ok()
}

fn run_export(output: Option<&Path>, engine: &mut TableEngine, out: &mut dyn Write) -> Result<bool> {
    let path = output.map_or_else(|| PathBuf::from(export_file_name()), Path::to_path_buf);
    if engine.export_file(&path).is_err() {
        return Ok(false);
    }
    writeln!(out, "Wrote {}", path.display())?;
    Ok(true)
}

/// Split `COLUMN=VALUE` at the first `=`. The value may be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected COLUMN=VALUE, got '{raw}'"))?;
    let column = column.trim();
    if column.is_empty() {
        bail!("missing column name in '{raw}'");
    }
    Ok((column.to_string(), value.to_string()))
}

/// Find a column by id, or by label ignoring case.
fn resolve_column(columns: &[Column], name: &str) -> Option<String> {
    columns
        .iter()
        .find(|column| column.id == name)
        .or_else(|| {
            columns
                .iter()
                .find(|column| column.label.eq_ignore_ascii_case(name))
        })
        .map(|column| column.id.clone())
}
