use tracing::{debug, warn};

use crate::error::Result;
use crate::store::Store;
use crate::types::{HistoryItem, PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Discard held items and start over from the head.
    Replace,
    Append,
}

/// A page fetch the pager wants dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub offset: usize,
    pub mode: PageMode,
}

/// Offset-paged, newest-first view of the classification history.
#[derive(Debug)]
pub struct HistoryPager {
    store: Store,
    latest: u64,
}

impl HistoryPager {
    pub fn new(store: Store) -> Self {
        Self { store, latest: 0 }
    }

    /// Fetch from offset 0. Always dispatches and supersedes any fetch in flight.
    pub fn refresh(&mut self) -> PageRequest {
        self.latest += 1;
        self.store.update(|s| s.history.in_flight = true);
        debug!(id = self.latest, "refreshing history");
        PageRequest {
            id: self.latest,
            offset: 0,
            mode: PageMode::Replace,
        }
    }

    /// Fetch the next page, or `None` when at the end or already fetching.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }

        self.latest += 1;
        let offset = self.store.read(|s| s.history.offset);
        self.store.update(|s| s.history.in_flight = true);
        debug!(id = self.latest, offset, "loading more history");
        Some(PageRequest {
            id: self.latest,
            offset,
            mode: PageMode::Append,
        })
    }

    pub fn can_load_more(&self) -> bool {
        self.store
            .read(|s| s.history.has_more && !s.history.in_flight)
    }

    /// Apply a fetched page. Returns false if the response was stale or failed.
    pub fn complete(&mut self, request: PageRequest, response: Result<Vec<HistoryItem>>) -> bool {
        if request.id != self.latest {
            debug!(id = request.id, latest = self.latest, "discarding stale history page");
            return false;
        }

        let page = match response {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, offset = request.offset, "failed to fetch history");
                self.store.update(|s| s.history.in_flight = false);
                return false;
            }
        };

        let has_more = page.len() == PAGE_SIZE;
        self.store.update(|s| {
            let history = &mut s.history;
            match request.mode {
                PageMode::Replace => {
                    history.items = page;
                    history.offset = PAGE_SIZE;
                }
                PageMode::Append => {
                    history.items.extend(page);
                    history.offset += PAGE_SIZE;
                }
            }
            history.has_more = has_more;
            history.in_flight = false;
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::Sentiment;

    /// Stable server data: item ids count down from `total`.
    fn server_page(total: usize, offset: usize) -> Vec<HistoryItem> {
        (offset..total.min(offset + PAGE_SIZE))
            .map(|i| HistoryItem {
                id: (total - i) as i64,
                text: format!("text {}", total - i),
                sentiment: Sentiment::Neutral,
                timestamp: "2024-05-01T10:00:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn refresh_replaces_and_resets_offset() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());

        let req = pager.refresh();
        assert_eq!(req.offset, 0);
        assert!(pager.complete(req, Ok(server_page(120, 0))));

        let req = pager.load_more().unwrap();
        assert!(pager.complete(req, Ok(server_page(120, 50))));
        assert_eq!(store.snapshot().history.items.len(), 100);

        let req = pager.refresh();
        assert!(pager.complete(req, Ok(server_page(121, 0))));

        let history = store.snapshot().history;
        assert_eq!(history.items.len(), 50);
        assert_eq!(history.items[0].id, 121);
        assert_eq!(history.offset, PAGE_SIZE);
        assert!(history.has_more);
    }

    #[test]
    fn pages_concatenate_in_order_without_duplicates() {
        let total = 230;
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());

        let req = pager.refresh();
        pager.complete(req, Ok(server_page(total, 0)));
        while let Some(req) = pager.load_more() {
            pager.complete(req, Ok(server_page(total, req.offset)));
        }

        let history = store.snapshot().history;
        let expected: Vec<HistoryItem> = (0..5)
            .flat_map(|n| server_page(total, n * PAGE_SIZE))
            .collect();
        assert_eq!(history.items, expected);
        assert_eq!(history.offset, 5 * PAGE_SIZE);
        assert!(!history.has_more);

        let mut ids: Vec<i64> = history.items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn short_page_ends_paging() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());

        let req = pager.refresh();
        pager.complete(req, Ok(server_page(80, 0)));
        let history = store.snapshot().history;
        assert!(history.has_more);
        assert_eq!(history.offset, 50);

        let req = pager.load_more().unwrap();
        assert_eq!(req.offset, 50);
        pager.complete(req, Ok(server_page(80, 50)));

        let history = store.snapshot().history;
        assert_eq!(history.items.len(), 80);
        assert!(!history.has_more);
        assert!(pager.load_more().is_none());
        assert_eq!(store.snapshot().history, history);
    }

    #[test]
    fn exact_multiple_needs_one_empty_page() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());

        let req = pager.refresh();
        pager.complete(req, Ok(server_page(50, 0)));
        let req = pager.load_more().unwrap();
        pager.complete(req, Ok(Vec::new()));

        let history = store.snapshot().history;
        assert_eq!(history.items.len(), 50);
        assert!(!history.has_more);
    }

    #[test]
    fn load_more_before_first_refresh_is_noop() {
        let mut pager = HistoryPager::new(Store::default());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn load_more_is_single_flight() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());
        let req = pager.refresh();
        pager.complete(req, Ok(server_page(200, 0)));

        let first = pager.load_more().unwrap();
        assert!(store.snapshot().history.in_flight);
        assert!(pager.load_more().is_none());

        pager.complete(first, Ok(server_page(200, 50)));
        assert!(pager.load_more().is_some());
    }

    #[test]
    fn failed_load_more_leaves_history_untouched() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());
        let req = pager.refresh();
        pager.complete(req, Ok(server_page(200, 0)));
        let before = store.snapshot().history;

        let req = pager.load_more().unwrap();
        assert!(!pager.complete(req, Err(AppError::Http("timeout".into()))));

        let after = store.snapshot().history;
        assert_eq!(after, before);

        let retry = pager.load_more().unwrap();
        assert_eq!(retry.offset, 50);
    }

    #[test]
    fn failed_refresh_keeps_held_items() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());
        let req = pager.refresh();
        pager.complete(req, Ok(server_page(70, 0)));

        let req = pager.refresh();
        pager.complete(req, Err(AppError::Http("refused".into())));

        let history = store.snapshot().history;
        assert_eq!(history.items.len(), 50);
        assert!(!history.in_flight);
    }

    #[test]
    fn refresh_discards_in_flight_append() {
        let store = Store::default();
        let mut pager = HistoryPager::new(store.clone());
        let req = pager.refresh();
        pager.complete(req, Ok(server_page(200, 0)));

        let append = pager.load_more().unwrap();
        let refresh = pager.refresh();

        pager.complete(refresh, Ok(server_page(201, 0)));
        assert!(!pager.complete(append, Ok(server_page(200, 50))));

        let history = store.snapshot().history;
        assert_eq!(history.items.len(), 50);
        assert_eq!(history.items[0].id, 201);
    }
}
