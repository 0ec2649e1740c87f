use std::cell::Cell;

use shared::envelope::{PaginatedResponse, Pagination};

/// List/detail bookkeeping shared by every list-backed resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCollection<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl<T> Default for ResourceCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
            pagination: Pagination::default(),
        }
    }
}

impl<T> ResourceCollection<T> {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Replaces items and pagination wholesale.
    pub fn replace_page(&mut self, page: PaginatedResponse<T>) {
        self.items = page.data;
        self.pagination = page.pagination;
        self.settle();
    }

    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.settle();
    }

    /// Focuses `item`. Loading and error belong to the listing and are left
    /// alone; the detail fetch tracks its own [`RequestStatus`].
    pub fn select(&mut self, item: T) {
        self.selected = Some(item);
    }

    /// Records a failure. Items already on screen stay.
    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    pub fn settle(&mut self) {
        self.is_loading = false;
        self.error = None;
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn has_more_pages(&self) -> bool {
        self.pagination.has_more_pages()
    }
}

/// Loading and error flags for one kind of request, kept apart so that
/// unrelated requests finishing in any order cannot clear each other's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    pub fn settle(&mut self) {
        self.is_loading = false;
        self.error = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter. A response is applied only if its ticket is
/// still the latest one issued, so a slow early request cannot overwrite a
/// faster later one.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_items() {
        let mut collection = ResourceCollection::default();
        collection.begin();
        collection.replace_page(PaginatedResponse {
            data: vec!["a", "b"],
            pagination: Pagination::new(1, 2, 4),
        });
        assert!(collection.has_more_pages());

        collection.begin();
        assert!(collection.is_loading);
        collection.fail("Failed to fetch courses".into());

        assert_eq!(collection.items, vec!["a", "b"]);
        assert!(!collection.is_loading);
        assert_eq!(collection.error.as_deref(), Some("Failed to fetch courses"));
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut collection = ResourceCollection::<u8>::default();
        collection.fail("boom".into());
        collection.begin();
        assert_eq!(collection.error, None);
    }

    #[test]
    fn selecting_leaves_listing_status_alone() {
        let mut collection = ResourceCollection::default();
        collection.begin();
        collection.select("c1");

        assert!(collection.is_loading);
        assert_eq!(collection.selected, Some("c1"));
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let sequence = RequestSequence::default();
        let first = sequence.issue();
        let second = sequence.issue();

        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }
}
