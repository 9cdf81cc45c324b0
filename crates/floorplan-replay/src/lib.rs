//! Floor-plan replay host
//!
//! Loads a JSON script of editor commands and raw input events, feeds them
//! through a [`Canvas`] in order, and reports the resulting layout.
//!
//! ```json
//! {
//!   "container": { "width": 800.0, "height": 600.0 },
//!   "steps": [
//!     { "type": "add_table", "name": "T1", "position": { "x": 103.0, "y": 97.0 } },
//!     { "type": "pointer", "event": { "type": "down", "position": { "x": 110.0, "y": 110.0 } } },
//!     { "type": "pointer", "event": { "type": "move", "position": { "x": 111.0, "y": 110.0 } } },
//!     { "type": "pointer", "event": { "type": "up", "position": { "x": 111.0, "y": 110.0 } } }
//!   ]
//! }
//! ```

use floorplan_core::{
    Canvas, EditorConfig, FloorId, Key, NewTable, PointerEvent, SnapMode, StatusCounts, TableId,
    TableStatus, Venue, VenueError, Viewport,
};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that abort a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Venue error: {0}")]
    Venue(#[from] VenueError),
    #[error("Step {index}: no table named {name:?} on the active floor")]
    UnknownTable { index: usize, name: String },
    #[error("Step {index}: {source}")]
    Step { index: usize, source: VenueError },
}

/// Default container size, matching a typical editor pane.
fn default_container() -> Size {
    Size::new(1280.0, 800.0)
}

/// A scripted editing session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EditorConfig,
    /// Starting layout. A fresh venue is used when absent.
    #[serde(default)]
    pub venue: Option<Venue>,
    /// Canvas container size for fit-to-content.
    #[serde(default = "default_container")]
    pub container: Size,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One scripted action. Tables are referred to by name on the active floor.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    AddFloor,
    SelectFloor { floor_id: FloorId },
    RenameFloor { floor_id: FloorId, name: String },
    BeginRename { floor_id: FloorId },
    RenameDraft { text: String },
    Key { key: Key },
    AddTable {
        #[serde(flatten)]
        table: NewTable,
    },
    SelectTable { table: String },
    SetStatus { table: String, status: TableStatus },
    DeleteTable { table: String },
    DeleteSelected,
    Pointer { event: PointerEvent },
    ZoomIn,
    ZoomOut,
    Fit,
    EditMode { enabled: bool },
    Snap { mode: SnapMode },
}

/// Final state of a replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub venue: Venue,
    pub active_floor: FloorId,
    pub selection: Option<TableId>,
    pub viewport: Viewport,
    pub legend: StatusCounts,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Run every step of `script` against a new canvas.
pub fn run_script(script: Script) -> Result<Report, ReplayError> {
    let venue = script.venue.unwrap_or_default();
    venue.validate()?;
    let mut canvas = Canvas::with_venue(venue, script.config);
    let container = script.container;

    for (index, step) in script.steps.into_iter().enumerate() {
        log::debug!("Step {index}: {step:?}");
        apply_step(&mut canvas, index, step, container)?;
    }

    Ok(Report {
        active_floor: canvas.active_floor(),
        selection: canvas.selection(),
        viewport: canvas.viewport.clone(),
        legend: canvas.active_status_counts(),
        venue: canvas.into_venue(),
    })
}

/// Load a script from disk and run it.
pub fn replay_file(path: impl AsRef<Path>) -> Result<Report, ReplayError> {
    let path = path.as_ref();
    log::info!("Replaying {}", path.display());
    let json = std::fs::read_to_string(path)?;
    run_script(Script::from_json(&json)?)
}

fn find_table(canvas: &Canvas, index: usize, name: &str) -> Result<TableId, ReplayError> {
    canvas
        .active_tables()
        .find(|t| t.name == name)
        .map(|t| t.id())
        .ok_or_else(|| ReplayError::UnknownTable {
            index,
            name: name.to_string(),
        })
}

fn apply_step(
    canvas: &mut Canvas,
    index: usize,
    step: Step,
    container: Size,
) -> Result<(), ReplayError> {
    let at_step = |source| ReplayError::Step { index, source };

    match step {
        Step::AddFloor => {
            canvas.add_floor();
        }
        Step::SelectFloor { floor_id } => canvas.set_active_floor(floor_id).map_err(at_step)?,
        Step::RenameFloor { floor_id, name } => {
            if !canvas.rename_floor(floor_id, &name) {
                log::warn!("Step {index}: rename of floor {floor_id} ignored");
            }
        }
        Step::BeginRename { floor_id } => {
            if !canvas.begin_floor_rename(floor_id) {
                return Err(at_step(VenueError::FloorNotFound(floor_id)));
            }
        }
        Step::RenameDraft { text } => canvas.set_floor_name_draft(text),
        Step::Key { key } => {
            canvas.handle_key(key);
        }
        Step::AddTable { table } => {
            canvas.add_table(table).map_err(at_step)?;
        }
        Step::SelectTable { table } => {
            let id = find_table(canvas, index, &table)?;
            canvas.select(id);
        }
        Step::SetStatus { table, status } => {
            let id = find_table(canvas, index, &table)?;
            canvas.set_table_status(id, status).map_err(at_step)?;
        }
        Step::DeleteTable { table } => {
            let id = find_table(canvas, index, &table)?;
            canvas.delete_table(id);
        }
        Step::DeleteSelected => {
            if canvas.delete_selected().is_none() {
                log::warn!("Step {index}: nothing selected to delete");
            }
        }
        Step::Pointer { event } => {
            canvas.handle_pointer(event);
        }
        Step::ZoomIn => canvas.zoom_in(),
        Step::ZoomOut => canvas.zoom_out(),
        Step::Fit => canvas.fit_to_content(container),
        Step::EditMode { enabled } => canvas.set_edit_mode(enabled),
        Step::Snap { mode } => canvas.snap_mode = mode,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use std::io::Write;

    #[test]
    fn test_drag_scenario() {
        let script = Script::from_json(
            r#"{
                "steps": [
                    { "type": "add_table", "name": "T1", "position": { "x": 103.0, "y": 97.0 } },
                    { "type": "pointer", "event": { "type": "down", "position": { "x": 110.0, "y": 110.0 } } },
                    { "type": "pointer", "event": { "type": "move", "position": { "x": 111.0, "y": 110.0 } } },
                    { "type": "pointer", "event": { "type": "up", "position": { "x": 111.0, "y": 110.0 } } }
                ]
            }"#,
        )
        .unwrap();

        let report = run_script(script).unwrap();

        let table = &report.venue.tables()[0];
        assert_eq!(table.position, Point::new(100.0, 100.0));
        assert_eq!(report.selection, Some(table.id()));
    }

    #[test]
    fn test_floor_scenario() {
        let script = Script::from_json(
            r#"{
                "steps": [
                    { "type": "add_table", "seat_count": 4 },
                    { "type": "add_floor" },
                    { "type": "select_floor", "floor_id": 2 },
                    { "type": "add_table", "seat_count": 6, "name": "Big" },
                    { "type": "set_status", "table": "Big", "status": "reserved" },
                    { "type": "begin_rename", "floor_id": 2 },
                    { "type": "rename_draft", "text": "Patio" },
                    { "type": "key", "key": "enter" }
                ]
            }"#,
        )
        .unwrap();

        let report = run_script(script).unwrap();

        assert_eq!(report.active_floor, 2);
        assert_eq!(report.venue.floor(2).unwrap().name, "Patio");
        assert_eq!(report.venue.tables_on_floor(1).count(), 1);
        assert_eq!(report.venue.tables_on_floor(2).count(), 1);
        assert_eq!(report.legend.reserved, 1);
        assert_eq!(report.legend.available, 0);
    }

    #[test]
    fn test_unknown_table_aborts() {
        let script =
            Script::from_json(r#"{ "steps": [ { "type": "delete_table", "table": "Nope" } ] }"#)
                .unwrap();
        let err = run_script(script).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownTable { index: 0, .. }));
    }

    #[test]
    fn test_unknown_floor_aborts() {
        let script =
            Script::from_json(r#"{ "steps": [ { "type": "select_floor", "floor_id": 9 } ] }"#)
                .unwrap();
        let err = run_script(script).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Step {
                index: 0,
                source: VenueError::FloorNotFound(9)
            }
        ));
    }

    #[test]
    fn test_fit_uses_container() {
        let script = Script::from_json(
            r#"{
                "container": { "width": 400.0, "height": 400.0 },
                "config": { "fit_padding": 0.0 },
                "steps": [
                    { "type": "add_table", "position": { "x": 0.0, "y": 0.0 }, "seat_count": 2 },
                    { "type": "add_table", "position": { "x": 720.0, "y": 0.0 }, "seat_count": 2 },
                    { "type": "fit" }
                ]
            }"#,
        )
        .unwrap();

        let report = run_script(script).unwrap();

        assert!((report.viewport.scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_replay_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "steps": [ {{ "type": "add_floor" }}, {{ "type": "zoom_in" }} ] }}"#
        )
        .unwrap();

        let report = replay_file(file.path()).unwrap();

        assert_eq!(report.venue.floors().len(), 2);
        assert!((report.viewport.scale - 1.2).abs() < 1e-9);
        assert!(report.to_json().unwrap().contains("Ground Floor"));
    }

    #[test]
    fn test_demo_script() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/dining_room.json");
        let report = replay_file(path).unwrap();

        assert_eq!(report.venue.floor(1).unwrap().name, "Dining Room");
        assert_eq!(report.active_floor, 1);
        assert_eq!(report.legend.occupied, 1);
        assert_eq!(report.legend.total(), 3);
        let booth = report
            .venue
            .tables()
            .iter()
            .find(|t| t.name == "Booth")
            .unwrap();
        assert_eq!(booth.position, Point::new(160.0, 200.0));
        assert!(report.viewport.scale <= 1.0);
        assert_eq!(report.venue.tables_on_floor(2).count(), 1);
    }

    #[test]
    fn test_invalid_starting_venue() {
        let script = Script::from_json(
            r#"{
                "venue": {
                    "floors": [ { "id": 1, "name": "Main" } ],
                    "tables": [ {
                        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                        "name": "Lost",
                        "seat_count": 2,
                        "position": { "x": 0.0, "y": 0.0 },
                        "floor_id": 3
                    } ]
                }
            }"#,
        )
        .unwrap();
        let err = run_script(script).unwrap_err();
        assert!(matches!(err, ReplayError::Venue(VenueError::FloorNotFound(3))));
    }

    #[test]
    fn test_missing_file() {
        let err = replay_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }
}
