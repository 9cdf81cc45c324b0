//! Floor-plan editing session.

use crate::config::EditorConfig;
use crate::floor_name::FloorNameEdit;
use crate::gesture::Gesture;
use crate::input::{Key, MouseButton, PointerEvent};
use crate::snap::{SnapMode, snap_point};
use crate::table::{Table, TableId, TableStatus};
use crate::venue::{FloorId, NewTable, StatusCounts, Venue, VenueError};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};

/// An editing session over a venue layout.
///
/// Owns the venue store plus the ephemeral view state: viewport, active
/// floor, selection, pointer gesture and floor-name edit. All mutation of the
/// venue goes through here so the selection never points at a deleted table.
#[derive(Debug, Clone)]
pub struct Canvas {
    venue: Venue,
    /// Current pan/zoom.
    pub viewport: Viewport,
    /// Session tunables.
    pub config: EditorConfig,
    /// Grid snapping for table drags.
    pub snap_mode: SnapMode,
    active_floor: FloorId,
    selection: Option<TableId>,
    edit_mode: bool,
    gesture: Gesture,
    floor_name: FloorNameEdit,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a session over a fresh venue with default settings.
    pub fn new() -> Self {
        Self::with_venue(Venue::new(), EditorConfig::default())
    }

    /// Create a session over an existing venue.
    ///
    /// The first floor becomes active. A venue without floors gets one.
    pub fn with_venue(mut venue: Venue, config: EditorConfig) -> Self {
        let active_floor = match venue.floors().first() {
            Some(floor) => floor.id,
            None => venue.add_floor().id,
        };
        Self {
            venue,
            viewport: Viewport::with_scale_bounds(config.min_scale, config.max_scale),
            snap_mode: SnapMode::default(),
            active_floor,
            selection: None,
            edit_mode: config.edit_mode,
            gesture: Gesture::default(),
            floor_name: FloorNameEdit::default(),
            config,
        }
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Hand the venue back to the host, ending the session.
    pub fn into_venue(self) -> Venue {
        self.venue
    }

    pub fn active_floor(&self) -> FloorId {
        self.active_floor
    }

    pub fn selection(&self) -> Option<TableId> {
        self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn floor_name_edit(&self) -> &FloorNameEdit {
        &self.floor_name
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Toggle edit mode. Leaving it drops any table drag.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        if !edit_mode && self.gesture.is_dragging() {
            self.gesture.end();
        }
        self.edit_mode = edit_mode;
    }

    /// Tables on the active floor, in insertion order.
    pub fn active_tables(&self) -> impl Iterator<Item = &Table> {
        self.venue.tables_on_floor(self.active_floor)
    }

    /// Legend counts for the active floor.
    pub fn active_status_counts(&self) -> StatusCounts {
        self.venue.status_counts(self.active_floor)
    }

    // --- Floors -----------------------------------------------------------

    /// Add a floor. The active floor does not change.
    pub fn add_floor(&mut self) -> FloorId {
        self.venue.add_floor().id
    }

    /// Switch the active floor.
    ///
    /// An in-progress gesture is cancelled; a dragged table keeps its last
    /// written position.
    pub fn set_active_floor(&mut self, floor_id: FloorId) -> Result<(), VenueError> {
        if !self.venue.has_floor(floor_id) {
            return Err(VenueError::FloorNotFound(floor_id));
        }
        if floor_id != self.active_floor {
            self.gesture.end();
            self.selection = None;
            self.active_floor = floor_id;
            log::debug!("Active floor is now {floor_id}");
        }
        Ok(())
    }

    pub fn rename_floor(&mut self, floor_id: FloorId, name: &str) -> bool {
        self.venue.rename_floor(floor_id, name)
    }

    /// Open the inline name editor for a floor (double-click on its tab).
    pub fn begin_floor_rename(&mut self, floor_id: FloorId) -> bool {
        self.floor_name.begin(&self.venue, floor_id)
    }

    pub fn set_floor_name_draft(&mut self, text: impl Into<String>) {
        self.floor_name.set_draft(text);
    }

    pub fn commit_floor_rename(&mut self) -> bool {
        self.floor_name.commit(&mut self.venue)
    }

    pub fn cancel_floor_rename(&mut self) {
        self.floor_name.cancel();
    }

    // --- Tables -----------------------------------------------------------

    /// Add a table to the active floor and select it.
    pub fn add_table(&mut self, new: NewTable) -> Result<TableId, VenueError> {
        let id = self.venue.add_table(self.active_floor, new)?.id();
        self.selection = Some(id);
        Ok(id)
    }

    /// Replace a table record wholesale.
    pub fn update_table(&mut self, table: Table) -> Result<(), VenueError> {
        let id = table.id();
        let floor_id = table.floor_id;
        self.venue.update_table(table)?;
        if floor_id != self.active_floor {
            if self.selection == Some(id) {
                self.selection = None;
            }
            if self.gesture.dragged_table() == Some(id) {
                self.gesture.end();
            }
        }
        Ok(())
    }

    pub fn set_table_status(&mut self, id: TableId, status: TableStatus) -> Result<(), VenueError> {
        let mut table = self
            .venue
            .table(id)
            .cloned()
            .ok_or(VenueError::TableNotFound(id))?;
        table.status = status;
        self.venue.update_table(table)
    }

    /// Delete a table, clearing the selection and any drag that referenced it.
    pub fn delete_table(&mut self, id: TableId) -> Option<Table> {
        let removed = self.venue.delete_table(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.gesture.dragged_table() == Some(id) {
            self.gesture.end();
        }
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Option<Table> {
        let id = self.selection?;
        self.delete_table(id)
    }

    /// Select a table on the active floor.
    pub fn select(&mut self, id: TableId) -> bool {
        let on_active = self
            .venue
            .table(id)
            .is_some_and(|t| t.floor_id == self.active_floor);
        if on_active {
            self.selection = Some(id);
        }
        on_active
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // --- View -------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_by(self.config.zoom_step, None);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_by(1.0 / self.config.zoom_step, None);
    }

    /// Fit the active floor's tables into a container of the given size.
    pub fn fit_to_content(&mut self, container: Size) {
        let padding = self.config.fit_padding;
        self.viewport
            .fit_to_tables(self.venue.tables_on_floor(self.active_floor), container, padding);
    }

    // --- Input ------------------------------------------------------------

    /// Route a pointer event. Returns true if view or venue state changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                let was_active = !self.gesture.is_idle();
                self.gesture.end();
                was_active
            }
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => {
                if !modifiers.zoom_modifier() {
                    return false;
                }
                self.wheel_zoom(position, delta)
            }
        }
    }

    /// Route a key press to the floor-name editor.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.floor_name.is_editing() {
            return false;
        }
        match key {
            Key::Enter => {
                self.commit_floor_rename();
            }
            Key::Escape => self.cancel_floor_rename(),
        }
        true
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) -> bool {
        if button != MouseButton::Left || !self.gesture.is_idle() {
            return false;
        }
        let canvas_point = self.viewport.screen_to_canvas(position);
        let hit = self
            .venue
            .table_at(self.active_floor, canvas_point)
            .map(|t| (t.id(), t.position));

        match hit {
            Some((id, table_position)) => {
                self.selection = Some(id);
                if self.edit_mode {
                    self.gesture.begin_drag(id, canvas_point - table_position);
                }
            }
            None => {
                self.selection = None;
                self.gesture.begin_pan(position);
            }
        }
        true
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Panning { .. } => match self.gesture.pan_delta(position) {
                Some(delta) => {
                    self.viewport.pan_by(delta);
                    true
                }
                None => false,
            },
            Gesture::DraggingTable {
                table_id,
                grab_offset,
            } => {
                let target = self.viewport.screen_to_canvas(position) - grab_offset;
                let snapped = snap_point(target, self.snap_mode, self.config.grid_size).point;
                match self.venue.move_table(table_id, snapped) {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("Dropping drag: {err}");
                        self.gesture.end();
                        false
                    }
                }
            }
        }
    }

    fn wheel_zoom(&mut self, position: Point, delta: Vec2) -> bool {
        let factor = if delta.y < 0.0 {
            self.config.wheel_zoom_step
        } else if delta.y > 0.0 {
            1.0 / self.config.wheel_zoom_step
        } else {
            return false;
        };
        let before = self.viewport.scale;
        self.viewport.zoom_by(factor, Some(position));
        (self.viewport.scale - before).abs() > f64::EPSILON
    }
}
