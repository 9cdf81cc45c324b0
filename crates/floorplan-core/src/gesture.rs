//! Pointer gesture state machine.
//!
//! A pointer session is either a canvas pan or a table drag, never both:
//!
//! ```text
//! Idle --down on empty canvas--> Panning --up/leave--> Idle
//! Idle --down on table (edit)--> DraggingTable --up/leave--> Idle
//! ```

use crate::table::TableId;
use kurbo::{Point, Vec2};

/// State of the current pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No pointer session in progress.
    #[default]
    Idle,
    /// Dragging the canvas.
    Panning {
        /// Last pointer position in screen coordinates.
        last: Point,
    },
    /// Dragging a table.
    DraggingTable {
        table_id: TableId,
        /// Canvas-space offset from the table's top-left to the grab point.
        grab_offset: Vec2,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Gesture::Panning { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::DraggingTable { .. })
    }

    /// Table being dragged, if any.
    pub fn dragged_table(&self) -> Option<TableId> {
        match self {
            Gesture::DraggingTable { table_id, .. } => Some(*table_id),
            _ => None,
        }
    }

    /// Start panning from `position`. Ignored unless idle.
    pub fn begin_pan(&mut self, position: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        log::debug!("Gesture: Idle -> Panning");
        *self = Gesture::Panning { last: position };
        true
    }

    /// Start dragging a table. Ignored unless idle.
    pub fn begin_drag(&mut self, table_id: TableId, grab_offset: Vec2) -> bool {
        if !self.is_idle() {
            return false;
        }
        log::debug!("Gesture: Idle -> DraggingTable({table_id})");
        *self = Gesture::DraggingTable {
            table_id,
            grab_offset,
        };
        true
    }

    /// Advance a pan to `position`, returning the screen delta to apply.
    pub fn pan_delta(&mut self, position: Point) -> Option<Vec2> {
        match self {
            Gesture::Panning { last } => {
                let delta = position - *last;
                *last = position;
                Some(delta)
            }
            _ => None,
        }
    }

    /// Terminate whatever is in progress. Nothing is rolled back.
    pub fn end(&mut self) {
        if !self.is_idle() {
            log::debug!("Gesture: {} -> Idle", self.name());
        }
        *self = Gesture::Idle;
    }

    fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "Idle",
            Gesture::Panning { .. } => "Panning",
            Gesture::DraggingTable { .. } => "DraggingTable",
        }
    }
}
