// In-memory listing store: full collection, active filter, derived visible view

use crate::config::Config;
use crate::date::{self, Clock, DateZone, SystemClock};
use crate::error::{Result, StoreError};
use crate::filter::StatusFilter;
use crate::models::{RawRequest, RawTimestamp, Request, RequestStatus};
use crate::source::RequestSource;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Callback run after every successful mutation
pub type Listener = Box<dyn Fn(&ListingStore) + Send + Sync>;

/// Listing of requests with a status filter and an `updated_at` ordering
///
/// `all_records` is the source of truth. `visible` is rebuilt from
/// `(all_records, active_filter)` after every mutation: the records passing
/// the filter, sorted ascending by `updated_at` (ties keep collection order).
///
/// Mutations take `&mut self`, so callers sharing a store across threads
/// must serialize access themselves.
pub struct ListingStore {
    all_records: Vec<Request>,
    visible: Vec<Request>,
    active_filter: StatusFilter,
    loading: bool,
    zone: DateZone,
    clock: Box<dyn Clock>,
    listeners: Vec<Listener>,
}

impl ListingStore {
    /// Empty store using the system clock and the configured date zone
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config.timezone, SystemClock)
    }

    pub fn with_clock<C: Clock + 'static>(zone: DateZone, clock: C) -> Self {
        Self {
            all_records: Vec::new(),
            visible: Vec::new(),
            active_filter: StatusFilter::All,
            loading: true,
            zone,
            clock: Box::new(clock),
            listeners: Vec::new(),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Records passing the active filter, oldest `updated_at` first
    pub fn visible(&self) -> &[Request] {
        &self.visible
    }

    pub fn all_records(&self) -> &[Request] {
        &self.all_records
    }

    pub fn active_filter(&self) -> StatusFilter {
        self.active_filter
    }

    /// True until the first successful load
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: u64) -> Option<&Request> {
        self.all_records.iter().find(|r| r.id == id)
    }

    /// Number of records in the full collection per status
    pub fn counts(&self) -> [(RequestStatus, usize); 3] {
        RequestStatus::ALL.map(|status| {
            let count = self.all_records.iter().filter(|r| r.status == status).count();
            (status, count)
        })
    }

    /// Register a callback run after every successful mutation
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&ListingStore) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Fetch from `source` once and load the result
    ///
    /// A failing source leaves the store untouched.
    pub fn load_from(&mut self, source: &dyn RequestSource) -> Result<()> {
        let raw = source.fetch().map_err(StoreError::Load)?;
        self.load(raw)
    }

    /// Replace the collection with `raw`, normalizing both dates to `YYYY-MM-DD`
    ///
    /// Resets the filter to `All` and clears the loading flag. Either every
    /// record is accepted or the store is left as it was.
    pub fn load(&mut self, raw: Vec<RawRequest>) -> Result<()> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut records = Vec::with_capacity(raw.len());

        for request in raw {
            if !seen.insert(request.id) {
                return Err(StoreError::DuplicateId(request.id));
            }
            let created_at = self.normalize(request.id, &request.created_at)?;
            let updated_at = self.normalize(request.id, &request.updated_at)?;
            records.push(Request {
                id: request.id,
                title: request.title,
                status: request.status,
                created_at,
                updated_at,
            });
        }

        self.all_records = records;
        self.active_filter = StatusFilter::All;
        self.refresh_visible();
        self.loading = false;

        info!(count = self.all_records.len(), "Loaded requests");
        self.notify();
        Ok(())
    }

    /// Show only records matching `filter` (`All` shows everything)
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.active_filter = filter;
        self.refresh_visible();

        debug!(%filter, visible = self.visible.len(), "set_filter: applied");
        self.notify();
    }

    /// Change a record's status and stamp `updated_at` with today's date
    ///
    /// When a specific filter is active, the filter afterwards is the record's
    /// status *before* this change: neither the filter that was selected nor
    /// the new status. With `All` active the filter stays `All`.
    ///
    /// Returns `false` without touching anything if no record has `id`.
    pub fn set_status(&mut self, id: u64, status: RequestStatus) -> bool {
        let updated_at = date::format_date(self.clock.now(), self.zone);

        let Some(record) = self.all_records.iter_mut().find(|r| r.id == id) else {
            debug!(id, "set_status: no request with id");
            return false;
        };

        let next_filter = match self.active_filter {
            StatusFilter::All => StatusFilter::All,
            _ => StatusFilter::from(record.status),
        };

        debug!(
            id,
            from = %record.status,
            to = %status,
            filter = %next_filter,
            "set_status: updating"
        );

        record.status = status;
        record.updated_at = updated_at;

        self.active_filter = next_filter;
        self.refresh_visible();
        self.notify();
        true
    }

    /// [`set_status`](Self::set_status) for callers holding a filter value;
    /// `All` is rejected before any state changes
    pub fn set_status_filter(&mut self, id: u64, status: StatusFilter) -> Result<bool> {
        let status = RequestStatus::try_from(status)?;
        Ok(self.set_status(id, status))
    }

    /// Remove the record with `id`; the active filter is kept
    ///
    /// Returns `false` if no record has `id`.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.all_records.len();
        self.all_records.retain(|r| r.id != id);

        if self.all_records.len() == before {
            debug!(id, "remove: no request with id");
            return false;
        }

        self.refresh_visible();
        debug!(id, remaining = self.all_records.len(), "remove: removed");
        self.notify();
        true
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn normalize(&self, id: u64, raw: &RawTimestamp) -> Result<String> {
        date::normalize(raw, self.zone).ok_or_else(|| StoreError::InvalidDate {
            id,
            value: raw.to_string(),
        })
    }

    fn refresh_visible(&mut self) {
        let filter = self.active_filter;
        let mut visible: Vec<Request> = self.all_records.iter().filter(|r| filter.matches(r)).cloned().collect();
        visible.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
        self.visible = visible;
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self);
        }
    }
}

impl Default for ListingStore {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl fmt::Debug for ListingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingStore")
            .field("all_records", &self.all_records)
            .field("visible", &self.visible)
            .field("active_filter", &self.active_filter)
            .field("loading", &self.loading)
            .field("zone", &self.zone)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
