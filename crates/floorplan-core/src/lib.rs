//! Floor-plan core library
//!
//! Platform-agnostic data structures and logic for the venue floor-plan
//! editor: the table/floor store, the pan/zoom viewport and the pointer
//! gesture handling that places tables on a snapping grid.

pub mod canvas;
pub mod config;
pub mod floor_name;
pub mod gesture;
pub mod input;
pub mod snap;
pub mod table;
pub mod venue;
pub mod viewport;

pub use canvas::Canvas;
pub use config::EditorConfig;
pub use floor_name::FloorNameEdit;
pub use gesture::Gesture;
pub use input::{Key, Modifiers, MouseButton, PointerEvent};
pub use snap::{GRID_SIZE, SnapMode, SnapResult, snap_point, snap_to_grid, snap_value};
pub use table::{SizeClass, Table, TableId, TableStatus};
pub use venue::{Floor, FloorId, NewTable, StatusCounts, Venue, VenueError, bounding_box};
pub use viewport::Viewport;
