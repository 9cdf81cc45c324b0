//! Inline floor-name editing.

use crate::venue::{FloorId, Venue};

/// Edit state of the floor-name field.
///
/// Only one floor name is edited at a time. `Viewing` is both the initial
/// state and the state every commit or cancel returns to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FloorNameEdit {
    #[default]
    Viewing,
    Editing {
        floor_id: FloorId,
        /// In-progress text, not yet applied to the venue.
        draft: String,
    },
}

impl FloorNameEdit {
    pub fn is_editing(&self) -> bool {
        matches!(self, FloorNameEdit::Editing { .. })
    }

    /// Floor being edited, if any.
    pub fn floor_id(&self) -> Option<FloorId> {
        match self {
            FloorNameEdit::Editing { floor_id, .. } => Some(*floor_id),
            FloorNameEdit::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            FloorNameEdit::Editing { draft, .. } => Some(draft),
            FloorNameEdit::Viewing => None,
        }
    }

    /// Enter editing for `floor_id`, seeding the draft with its current name.
    ///
    /// Any draft for another floor is discarded. Unknown floors are ignored.
    pub fn begin(&mut self, venue: &Venue, floor_id: FloorId) -> bool {
        let Some(floor) = venue.floor(floor_id) else {
            return false;
        };
        if let Some(previous) = self.floor_id().filter(|&id| id != floor_id) {
            log::debug!("Discarding name draft for floor {previous}");
        }
        *self = FloorNameEdit::Editing {
            floor_id,
            draft: floor.name.clone(),
        };
        true
    }

    /// Replace the draft text. Ignored while viewing.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let FloorNameEdit::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// Apply the draft and return to `Viewing`.
    ///
    /// A blank draft is dropped and the floor keeps its name. Returns true
    /// if the venue accepted the name.
    pub fn commit(&mut self, venue: &mut Venue) -> bool {
        match std::mem::take(self) {
            FloorNameEdit::Editing { floor_id, draft } => venue.rename_floor(floor_id, &draft),
            FloorNameEdit::Viewing => false,
        }
    }

    /// Drop the draft and return to `Viewing`.
    pub fn cancel(&mut self) {
        *self = FloorNameEdit::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_renames() {
        let mut venue = Venue::new();
        let mut edit = FloorNameEdit::default();

        assert!(edit.begin(&venue, 1));
        assert_eq!(edit.draft(), Some("Ground Floor"));
        edit.set_draft("Patio");
        assert!(edit.commit(&mut venue));

        assert_eq!(edit, FloorNameEdit::Viewing);
        assert_eq!(venue.floor(1).unwrap().name, "Patio");
    }

    #[test]
    fn test_blank_commit_keeps_name() {
        let mut venue = Venue::new();
        let mut edit = FloorNameEdit::default();

        edit.begin(&venue, 1);
        edit.set_draft("   ");
        assert!(!edit.commit(&mut venue));

        assert!(!edit.is_editing());
        assert_eq!(venue.floor(1).unwrap().name, "Ground Floor");
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut venue = Venue::new();
        let mut edit = FloorNameEdit::default();

        edit.begin(&venue, 1);
        edit.set_draft("Terrace");
        edit.cancel();

        assert!(!edit.commit(&mut venue));
        assert_eq!(venue.floor(1).unwrap().name, "Ground Floor");
    }

    #[test]
    fn test_begin_unknown_floor() {
        let venue = Venue::new();
        let mut edit = FloorNameEdit::default();
        assert!(!edit.begin(&venue, 3));
        assert!(!edit.is_editing());
    }

    #[test]
    fn test_switching_floor_discards_draft() {
        let mut venue = Venue::new();
        venue.add_floor();
        let mut edit = FloorNameEdit::default();

        edit.begin(&venue, 1);
        edit.set_draft("Basement");
        edit.begin(&venue, 2);
        assert_eq!(edit.floor_id(), Some(2));
        assert_eq!(edit.draft(), Some("Floor 2"));

        edit.commit(&mut venue);
        assert_eq!(venue.floor(1).unwrap().name, "Ground Floor");
    }

    #[test]
    fn test_set_draft_while_viewing_is_ignored() {
        let mut edit = FloorNameEdit::default();
        edit.set_draft("Nope");
        assert_eq!(edit, FloorNameEdit::Viewing);
    }
}
