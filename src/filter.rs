// 🔍 Filter/Paginate Engine - Debounced search + "load more" pagination
// Entity-agnostic: runs over any session slice through the shape contract.
// One instance per rendered collection

use crate::schema::CatalogEntity;
use crate::session::EditSession;
use std::time::{Duration, Instant};

/// Quiet period before typed input becomes the effective search term
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Entities revealed per "load more" step
pub const PAGE_SIZE: usize = 5;

// ============================================================================
// DEBOUNCED INPUT
// ============================================================================

/// Latest-wins debounce for one text field.
///
/// Each keystroke overwrites the live text and re-arms a single deadline;
/// there is never more than one pending update, and only the final text of a
/// rapid burst ever becomes effective. Deadlines are driven by the caller's
/// clock, so tests pass synthetic instants instead of sleeping.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    live: String,
    applied: String,
    pending_since: Option<Instant>,
    delay: Duration,
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        SearchDebounce {
            live: String::new(),
            applied: String::new(),
            pending_since: None,
            delay,
        }
    }

    /// Record a keystroke; cancels and re-arms the pending deadline
    pub fn set(&mut self, text: &str, now: Instant) {
        if text == self.live {
            return;
        }
        self.live = text.to_string();
        self.pending_since = Some(now);
    }

    /// Fire the deadline once the quiet period has passed. Returns true only
    /// when the effective term actually changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.pending_since = None;
                self.apply()
            }
            _ => false,
        }
    }

    /// Apply any pending text immediately, skipping the remaining wait
    pub fn flush(&mut self) -> bool {
        self.pending_since = None;
        self.apply()
    }

    fn apply(&mut self) -> bool {
        if self.applied == self.live {
            return false;
        }
        self.applied = self.live.clone();
        true
    }

    /// The effective (debounced) term
    pub fn term(&self) -> &str {
        &self.applied
    }

    /// The raw text as typed so far
    pub fn live(&self) -> &str {
        &self.live
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

// ============================================================================
// CATALOG VIEW
// ============================================================================

/// Debounced filter + incremental pagination over one collection.
///
/// The visible prefix only ever grows, except that it snaps back to page 1
/// at the exact moment a new effective term lands - so no frame can render
/// a stale page against a fresh filter, and typing alone never disturbs the
/// current view.
#[derive(Debug, Clone)]
pub struct CatalogView {
    search: SearchDebounce,
    page: usize,
    page_size: usize,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        CatalogView {
            search: SearchDebounce::default(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        CatalogView {
            search: SearchDebounce::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Live keystroke entry point
    pub fn set_search_term(&mut self, text: &str, now: Instant) {
        self.search.set(text, now);
    }

    /// Drive the debounce deadline. Resets to page 1 exactly when the
    /// effective term changes; returns whether it changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.search.poll(now);
        if changed {
            self.page = 1;
            tracing::debug!(term = self.search.term(), "search term applied");
        }
        changed
    }

    /// Apply pending input immediately (Enter in a search box)
    pub fn flush_search(&mut self) -> bool {
        let changed = self.search.flush();
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn term(&self) -> &str {
        self.search.term()
    }

    pub fn live_term(&self) -> &str {
        self.search.live()
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Lazy, restartable pass over the sessions whose searchable fields
    /// case-insensitively contain the effective term. An empty term passes
    /// the whole collection through in order. Matching always reads
    /// committed values, never open drafts.
    pub fn filtered_view<'a, E: CatalogEntity>(
        &self,
        records: &'a [EditSession<E>],
    ) -> impl Iterator<Item = &'a EditSession<E>> + 'a {
        let term = self.search.term().to_lowercase();
        records
            .iter()
            .filter(move |record| matches_term(record.entity(), &term))
    }

    /// Visible prefix of the filtered view: `page × page_size` entries
    pub fn visible_slice<'a, E: CatalogEntity>(
        &self,
        records: &'a [EditSession<E>],
    ) -> Vec<&'a EditSession<E>> {
        self.filtered_view(records)
            .take(self.page * self.page_size)
            .collect()
    }

    pub fn filtered_count<E: CatalogEntity>(&self, records: &[EditSession<E>]) -> usize {
        self.filtered_view(records).count()
    }

    /// More matches exist past the visible prefix
    pub fn has_more<E: CatalogEntity>(&self, records: &[EditSession<E>]) -> bool {
        self.filtered_count(records) > self.page * self.page_size
    }

    /// Reveal one more page; the prefix never shrinks from here
    pub fn load_more(&mut self) {
        self.page += 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

fn matches_term<E: CatalogEntity>(entity: &E, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    E::SEARCH_FIELDS.iter().any(|field| {
        entity
            .field_text(field)
            .map(|text| text.to_lowercase().contains(term))
            .unwrap_or(false)
    })
}
