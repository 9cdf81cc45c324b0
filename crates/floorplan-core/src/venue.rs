//! Venue store: floors and the tables placed on them.

use crate::table::{Table, TableId, TableStatus};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Identifier of a floor. Assigned in increasing order.
pub type FloorId = u32;

/// Name given to the first floor of a fresh venue.
pub const INITIAL_FLOOR_NAME: &str = "Ground Floor";

/// Errors returned by venue mutations that would break an invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VenueError {
    #[error("Floor not found: {0}")]
    FloorNotFound(FloorId),
    #[error("Table not found: {0}")]
    TableNotFound(TableId),
    #[error("Seat count must be at least 1")]
    InvalidSeatCount,
    #[error("Duplicate floor id: {0}")]
    DuplicateFloor(FloorId),
    #[error("Duplicate table id: {0}")]
    DuplicateTable(TableId),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A floor (level) of the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
}

impl Floor {
    /// Generated name for a floor created with [`Venue::add_floor`].
    pub fn default_name(id: FloorId) -> String {
        format!("Floor {id}")
    }
}

/// Attributes for a new table. Unset fields take the table defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTable {
    pub name: Option<String>,
    pub seat_count: Option<u32>,
    pub position: Option<Point>,
    pub status: Option<TableStatus>,
}

impl NewTable {
    pub fn with_seats(seat_count: u32) -> Self {
        Self {
            seat_count: Some(seat_count),
            ..Self::default()
        }
    }
}

/// Per-status table counts for the floor legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub cleaning: usize,
}

impl StatusCounts {
    /// Count for a single status.
    pub fn get(&self, status: TableStatus) -> usize {
        match status {
            TableStatus::Available => self.available,
            TableStatus::Occupied => self.occupied,
            TableStatus::Reserved => self.reserved,
            TableStatus::Cleaning => self.cleaning,
        }
    }

    pub fn total(&self) -> usize {
        self.available + self.occupied + self.reserved + self.cleaning
    }

    fn bump(&mut self, status: TableStatus) {
        match status {
            TableStatus::Available => self.available += 1,
            TableStatus::Occupied => self.occupied += 1,
            TableStatus::Reserved => self.reserved += 1,
            TableStatus::Cleaning => self.cleaning += 1,
        }
    }
}

/// The venue layout: every floor and every table, in insertion order.
///
/// This is the single authoritative copy the editor mutates. Persistence is
/// left to the host, which can round-trip the layout with
/// [`Venue::to_json`] and [`Venue::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    floors: Vec<Floor>,
    tables: Vec<Table>,
}

impl Default for Venue {
    fn default() -> Self {
        Self::new()
    }
}

impl Venue {
    /// Create a venue with a single ground floor and no tables.
    pub fn new() -> Self {
        Self {
            floors: vec![Floor {
                id: 1,
                name: INITIAL_FLOOR_NAME.to_string(),
            }],
            tables: Vec::new(),
        }
    }

    /// Create a venue with no floors at all.
    pub fn empty() -> Self {
        Self {
            floors: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// All floors in creation order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// All tables across every floor, in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn has_floor(&self, id: FloorId) -> bool {
        self.floor(id).is_some()
    }

    /// Append a new floor with the next id and a generated name.
    pub fn add_floor(&mut self) -> &Floor {
        let id = self.floors.iter().map(|f| f.id).max().map_or(1, |max| max + 1);
        self.floors.push(Floor {
            id,
            name: Floor::default_name(id),
        });
        log::info!("Added floor {id}");
        &self.floors[self.floors.len() - 1]
    }

    /// Rename a floor.
    ///
    /// The new name is trimmed; an empty result leaves the floor untouched.
    /// Returns true if the stored name now equals the trimmed input.
    pub fn rename_floor(&mut self, id: FloorId, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            log::warn!("Rejected empty name for floor {id}");
            return false;
        }
        match self.floors.iter_mut().find(|f| f.id == id) {
            Some(floor) => {
                if floor.name != trimmed {
                    log::info!("Renamed floor {id} to {trimmed:?}");
                    floor.name = trimmed.to_string();
                }
                true
            }
            None => false,
        }
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Create a table on `floor_id` and append it.
    pub fn add_table(&mut self, floor_id: FloorId, new: NewTable) -> Result<&Table, VenueError> {
        if !self.has_floor(floor_id) {
            return Err(VenueError::FloorNotFound(floor_id));
        }
        let seat_count = new.seat_count.unwrap_or(Table::DEFAULT_SEATS);
        if seat_count == 0 {
            return Err(VenueError::InvalidSeatCount);
        }
        let name = new
            .name
            .unwrap_or_else(|| format!("Table {}", self.tables_on_floor(floor_id).count() + 1));

        let mut table = Table::new(floor_id, name, seat_count);
        if let Some(position) = new.position {
            table.position = position;
        }
        if let Some(status) = new.status {
            table.status = status;
        }

        log::info!("Added table {} on floor {floor_id}", table.id);
        self.tables.push(table);
        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Replace the stored table with the same id, wholesale.
    pub fn update_table(&mut self, table: Table) -> Result<(), VenueError> {
        if !self.has_floor(table.floor_id) {
            return Err(VenueError::FloorNotFound(table.floor_id));
        }
        if table.seat_count == 0 {
            return Err(VenueError::InvalidSeatCount);
        }
        let slot = self
            .tables
            .iter_mut()
            .find(|t| t.id == table.id)
            .ok_or(VenueError::TableNotFound(table.id))?;
        *slot = table;
        Ok(())
    }

    /// Set only the position of a table. Used by drag placement.
    pub fn move_table(&mut self, id: TableId, position: Point) -> Result<(), VenueError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(VenueError::TableNotFound(id))?;
        table.position = position;
        Ok(())
    }

    /// Remove a table. Returns the removed table, if it existed.
    pub fn delete_table(&mut self, id: TableId) -> Option<Table> {
        let index = self.tables.iter().position(|t| t.id == id)?;
        log::info!("Deleted table {id}");
        Some(self.tables.remove(index))
    }

    /// Tables on one floor, in insertion order.
    pub fn tables_on_floor(&self, floor_id: FloorId) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(move |t| t.floor_id == floor_id)
    }

    /// Topmost table on `floor_id` under a canvas-space point.
    ///
    /// Later tables are drawn over earlier ones, so the last hit wins.
    pub fn table_at(&self, floor_id: FloorId, point: Point) -> Option<&Table> {
        self.tables
            .iter()
            .rev()
            .find(|t| t.floor_id == floor_id && t.hit_test(point))
    }

    pub fn status_counts(&self, floor_id: FloorId) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for table in self.tables_on_floor(floor_id) {
            counts.bump(table.status);
        }
        counts
    }

    /// Serialize the venue to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a venue from JSON, checking the store invariants.
    pub fn from_json(json: &str) -> Result<Self, VenueError> {
        let venue: Self =
            serde_json::from_str(json).map_err(|e| VenueError::Serialization(e.to_string()))?;
        venue.validate()?;
        Ok(venue)
    }

    /// Check the store invariants on a layout built outside the mutation API.
    pub fn validate(&self) -> Result<(), VenueError> {
        let mut floor_ids = HashSet::new();
        for floor in &self.floors {
            if !floor_ids.insert(floor.id) {
                return Err(VenueError::DuplicateFloor(floor.id));
            }
        }
        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(table.id) {
                return Err(VenueError::DuplicateTable(table.id));
            }
            if !floor_ids.contains(&table.floor_id) {
                return Err(VenueError::FloorNotFound(table.floor_id));
            }
            if table.seat_count == 0 {
                return Err(VenueError::InvalidSeatCount);
            }
        }
        Ok(())
    }
}

/// Bounding box over the footprints of `tables`, or `None` if there are none.
pub fn bounding_box<'a, I>(tables: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .map(Table::footprint)
        .reduce(|acc, r| acc.union(r))
}
