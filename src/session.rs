// ⏳ Edit Sessions - One tagged value per entity
// The draft belongs to the session: commit promotes it, cancel drops it, and
// the committed entity is never touched while an edit is underway

/// Per-entity edit state.
///
/// `Clean` holds the committed entity alone. `Editing` holds the committed
/// entity unchanged next to the draft being mutated. Exactly one variant
/// holds at any time, which is what makes cancel a guaranteed rollback.
#[derive(Debug, Clone, PartialEq)]
pub enum EditSession<E> {
    Clean(E),
    Editing { committed: E, draft: E },
}

impl<E: Clone> EditSession<E> {
    pub fn new(entity: E) -> Self {
        EditSession::Clean(entity)
    }

    /// Committed view, regardless of edit state
    pub fn entity(&self) -> &E {
        match self {
            EditSession::Clean(entity) => entity,
            EditSession::Editing { committed, .. } => committed,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Active draft, if an edit is underway
    pub fn draft(&self) -> Option<&E> {
        match self {
            EditSession::Clean(_) => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    /// Mutable view of the active draft; the only mutable view while editing
    pub fn draft_mut(&mut self) -> Option<&mut E> {
        match self {
            EditSession::Clean(_) => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    /// `Clean -> Editing`, snapshotting the current entity into both the
    /// committed slot and the draft. Calling again while already editing
    /// keeps the existing snapshot and draft (no rollback point is lost).
    /// Returns whether a new session actually started.
    pub fn begin(&mut self) -> bool {
        match self {
            EditSession::Clean(entity) => {
                let committed = entity.clone();
                let draft = entity.clone();
                *self = EditSession::Editing { committed, draft };
                true
            }
            EditSession::Editing { .. } => false,
        }
    }

    /// Promote the draft to committed state. Returns false when no edit
    /// was underway (the session is left as-is).
    pub fn commit(&mut self) -> bool {
        match self {
            EditSession::Editing { draft, .. } => {
                let promoted = draft.clone();
                *self = EditSession::Clean(promoted);
                true
            }
            EditSession::Clean(_) => false,
        }
    }

    /// Drop the draft, restoring the committed entity. Returns false when
    /// no edit was underway.
    pub fn cancel(&mut self) -> bool {
        match self {
            EditSession::Editing { committed, .. } => {
                let restored = committed.clone();
                *self = EditSession::Clean(restored);
                true
            }
            EditSession::Clean(_) => false,
        }
    }

    /// Consume the session, yielding the committed entity
    pub fn into_entity(self) -> E {
        match self {
            EditSession::Clean(entity) => entity,
            EditSession::Editing { committed, .. } => committed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Piece {
        title: String,
        price: f64,
    }

    fn sample_piece() -> Piece {
        Piece {
            title: "Blue Harbor".to_string(),
            price: 1200.0,
        }
    }

    #[test]
    fn test_new_session_is_clean() {
        let session = EditSession::new(sample_piece());
        assert!(!session.is_editing());
        assert!(session.draft().is_none());
        assert_eq!(session.entity().title, "Blue Harbor");
    }

    #[test]
    fn test_begin_creates_draft_copy() {
        let mut session = EditSession::new(sample_piece());
        assert!(session.begin());
        assert!(session.is_editing());
        assert_eq!(session.draft(), Some(&sample_piece()));
    }

    #[test]
    fn test_commit_promotes_draft() {
        let mut session = EditSession::new(sample_piece());
        session.begin();
        if let Some(draft) = session.draft_mut() {
            draft.title = "Blue Harbor II".to_string();
            draft.price = 1500.0;
        }
        assert!(session.commit());
        assert!(!session.is_editing());
        assert_eq!(session.entity().title, "Blue Harbor II");
        assert_eq!(session.entity().price, 1500.0);
    }

    #[test]
    fn test_cancel_restores_committed_exactly() {
        let mut session = EditSession::new(sample_piece());
        session.begin();
        if let Some(draft) = session.draft_mut() {
            draft.title = "scratch".to_string();
            draft.price = 1.0;
        }
        assert!(session.cancel());
        assert!(!session.is_editing());
        assert_eq!(session.entity(), &sample_piece());
    }

    #[test]
    fn test_begin_twice_keeps_existing_draft() {
        let mut session = EditSession::new(sample_piece());
        session.begin();
        if let Some(draft) = session.draft_mut() {
            draft.title = "half-finished edit".to_string();
        }
        // a second begin must not wipe either the draft or the snapshot
        assert!(!session.begin());
        assert_eq!(session.draft().map(|d| d.title.as_str()), Some("half-finished edit"));
        assert_eq!(session.entity(), &sample_piece());
    }

    #[test]
    fn test_commit_and_cancel_are_noops_when_clean() {
        let mut session = EditSession::new(sample_piece());
        assert!(!session.commit());
        assert!(!session.cancel());
        assert_eq!(session.entity(), &sample_piece());
    }

    #[test]
    fn test_into_entity_yields_committed_view() {
        let mut session = EditSession::new(sample_piece());
        session.begin();
        if let Some(draft) = session.draft_mut() {
            draft.title = "unsaved".to_string();
        }
        assert_eq!(session.into_entity(), sample_piece());
    }
}
