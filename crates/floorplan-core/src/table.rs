//! Table definitions for the floor plan.

use crate::venue::FloorId;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a table.
pub type TableId = Uuid;

/// Footprint of a table seating up to [`STANDARD_MAX_SEATS`] guests.
pub const STANDARD_FOOTPRINT: Size = Size::new(80.0, 80.0);
/// Footprint of a table seating more than [`STANDARD_MAX_SEATS`] guests.
pub const WIDE_FOOTPRINT: Size = Size::new(120.0, 80.0);
/// Largest seat count that still uses the standard footprint.
pub const STANDARD_MAX_SEATS: u32 = 4;

/// Dining status of a table. Any status may change to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    /// All statuses, in legend order.
    pub const ALL: [TableStatus; 4] = [
        TableStatus::Available,
        TableStatus::Occupied,
        TableStatus::Reserved,
        TableStatus::Cleaning,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TableStatus::Available => "Available",
            TableStatus::Occupied => "Occupied",
            TableStatus::Reserved => "Reserved",
            TableStatus::Cleaning => "Cleaning",
        }
    }

    /// Legend color for this status.
    pub fn color(self) -> Color {
        match self {
            TableStatus::Available => Color::from_rgba8(34, 197, 94, 255),
            TableStatus::Occupied => Color::from_rgba8(239, 68, 68, 255),
            TableStatus::Reserved => Color::from_rgba8(234, 179, 8, 255),
            TableStatus::Cleaning => Color::from_rgba8(59, 130, 246, 255),
        }
    }
}

/// Footprint size class, derived from seat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Standard,
    Wide,
}

impl SizeClass {
    /// Size class for a given seat count.
    pub fn for_seats(seat_count: u32) -> Self {
        if seat_count <= STANDARD_MAX_SEATS {
            SizeClass::Standard
        } else {
            SizeClass::Wide
        }
    }

    /// Canvas-space size of this class.
    pub fn size(self) -> Size {
        match self {
            SizeClass::Standard => STANDARD_FOOTPRINT,
            SizeClass::Wide => WIDE_FOOTPRINT,
        }
    }
}

/// A table placed on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: TableId,
    /// Display label, not required to be unique.
    pub name: String,
    /// Number of seats (at least 1).
    pub seat_count: u32,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Floor this table belongs to.
    pub floor_id: FloorId,
    /// Current dining status.
    #[serde(default)]
    pub status: TableStatus,
}

impl Table {
    /// Default position for newly added tables.
    pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);
    /// Default seat count for newly added tables.
    pub const DEFAULT_SEATS: u32 = 4;

    /// Create a new table at the default position.
    pub fn new(floor_id: FloorId, name: impl Into<String>, seat_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seat_count: seat_count.max(1),
            position: Self::DEFAULT_POSITION,
            floor_id,
            status: TableStatus::default(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Footprint size class for this table's seat count.
    pub fn size_class(&self) -> SizeClass {
        SizeClass::for_seats(self.seat_count)
    }

    /// Area the table occupies in canvas space.
    pub fn footprint(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size_class().size())
    }

    /// Check whether a canvas-space point lies on the table.
    pub fn hit_test(&self, point: Point) -> bool {
        let f = self.footprint();
        point.x >= f.x0 && point.x <= f.x1 && point.y >= f.y0 && point.y <= f.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_defaults() {
        let table = Table::new(1, "Table 1", 4);
        assert_eq!(table.status, TableStatus::Available);
        assert_eq!(table.position, Table::DEFAULT_POSITION);
        assert_eq!(table.floor_id, 1);
    }

    #[test]
    fn test_seat_count_floor_is_one() {
        let table = Table::new(1, "Stool", 0);
        assert_eq!(table.seat_count, 1);
    }

    #[test]
    fn test_unique_ids() {
        let a = Table::new(1, "A", 2);
        let b = Table::new(1, "B", 2);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_size_class_tiers() {
        assert_eq!(SizeClass::for_seats(1), SizeClass::Standard);
        assert_eq!(SizeClass::for_seats(4), SizeClass::Standard);
        assert_eq!(SizeClass::for_seats(5), SizeClass::Wide);
        assert_eq!(SizeClass::for_seats(12), SizeClass::Wide);
    }

    #[test]
    fn test_footprint() {
        let mut table = Table::new(1, "T", 6);
        table.position = Point::new(20.0, 40.0);
        let f = table.footprint();
        assert!((f.width() - WIDE_FOOTPRINT.width).abs() < f64::EPSILON);
        assert!((f.height() - WIDE_FOOTPRINT.height).abs() < f64::EPSILON);
        assert!((f.x0 - 20.0).abs() < f64::EPSILON);
        assert!((f.y0 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let table = Table::new(1, "T", 2);
        assert!(table.hit_test(Point::new(100.0, 100.0)));
        assert!(table.hit_test(Point::new(140.0, 179.0)));
        assert!(!table.hit_test(Point::new(99.0, 120.0)));
        assert!(!table.hit_test(Point::new(181.0, 120.0)));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TableStatus::Cleaning).unwrap();
        assert_eq!(json, "\"cleaning\"");
    }

    #[test]
    fn test_status_labels_distinct() {
        let labels: std::collections::HashSet<_> =
            TableStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), TableStatus::ALL.len());
    }
}
