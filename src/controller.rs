//! Generic paged list controller shared by every back-office table.
//!
//! A controller owns the page currently on screen, the active filters and
//! the load phase of one table. Every load replaces the held page wholesale;
//! every successful mutation is followed by a reload of the current page.
//! Loads are sequenced: a response is applied only if no newer load was
//! issued while it was in flight.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::api::errors::ApiError;
use crate::api::{Body, ListReader, ListRequest, RawPage, RowWriter, WriteRequest};
use crate::domain::Entity;
use crate::domain::filter::FilterCriteria;
use crate::domain::page::Page;
use crate::domain::types::{PageNumber, TypeConstraintError};
use crate::models::config::AdminConfig;
use crate::pagination::{Paginated, visible_page_window};
use crate::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE_WINDOW};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("invalid page: {0}")]
    InvalidPage(#[from] TypeConstraintError),

    #[error("page {requested} is out of range (1..={total_pages})")]
    PageOutOfRange { requested: usize, total_pages: usize },

    /// The session expired or was rejected; the caller must log in again.
    #[error("re-authentication required")]
    ReauthenticationRequired,

    #[error(transparent)]
    Api(ApiError),

    /// A newer load was issued while this one was in flight; its response
    /// was discarded.
    #[error("response to request {request_id} was superseded")]
    Superseded { request_id: u64 },

    #[error("row {0} is not on the current page")]
    RowNotLoaded(String),

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("cannot encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// A batch stopped at its first failure after `applied` requests went
    /// through. Those are not rolled back.
    #[error("batch stopped after {applied} applied request(s): {source}")]
    Batch {
        applied: usize,
        source: Box<ControllerError>,
    },

    /// The writes went through but the reload after them failed. The held
    /// page is out of date; `response` is the server's answer to a single
    /// write.
    #[error("{applied} request(s) applied, reload failed: {source}")]
    RefreshFailed {
        applied: usize,
        response: Option<Value>,
        source: Box<ControllerError>,
    },
}

impl From<ApiError> for ControllerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ControllerError::ReauthenticationRequired,
            other => ControllerError::Api(other),
        }
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// A write against one table.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation<K> {
    /// `POST <path>`.
    Create(Body),
    /// `PUT <path>/:key`.
    Update { key: K, body: Body },
    /// `DELETE <path>/:key`.
    Delete { key: K },
    /// Delete-as-status-change: sets the table's retired status.
    Retire { key: K },
    SetStatus { key: K, status: String },
    /// Moves a row on the current page to its toggled status.
    ToggleStatus { key: K },
    /// Any other write, e.g. issuing a coupon or replying to a question.
    Action(WriteRequest),
}

struct CollectionState<E> {
    page: Option<Page<E>>,
    current_page: PageNumber,
    filters: FilterCriteria,
    phase: LoadPhase,
    latest_request: u64,
    /// Local count adjustment shown until the next fetch lands.
    total_hint: Option<u64>,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            page: None,
            current_page: PageNumber::FIRST,
            filters: FilterCriteria::new(),
            phase: LoadPhase::Idle,
            latest_request: 0,
            total_hint: None,
        }
    }
}

pub struct PagedCollectionController<E: Entity, A> {
    api: Arc<A>,
    page_size: usize,
    window_size: usize,
    skip_unchanged_reload: bool,
    state: Mutex<CollectionState<E>>,
}

impl<E, A> PagedCollectionController<E, A>
where
    E: Entity,
    A: ListReader + RowWriter,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            page_size: DEFAULT_ITEMS_PER_PAGE,
            window_size: DEFAULT_PAGE_WINDOW,
            skip_unchanged_reload: false,
            state: Mutex::new(CollectionState::default()),
        }
    }

    pub fn from_config(api: Arc<A>, config: &AdminConfig) -> Self {
        Self::new(api)
            .with_page_size(config.items_per_page)
            .with_window_size(config.page_window)
            .skip_unchanged_reload(config.skip_unchanged_reload)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    /// Lets `load_page` return the held page when neither the page number
    /// nor the filters changed. Reloads after mutations always fetch.
    pub fn skip_unchanged_reload(mut self, enabled: bool) -> Self {
        self.skip_unchanged_reload = enabled;
        self
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Loads `page`, with `filters` when given or the session's filters
    /// otherwise. On failure the held page and filters stay as they were.
    pub async fn load_page(
        &self,
        page: usize,
        filters: Option<FilterCriteria>,
    ) -> ControllerResult<Page<E>> {
        let page = PageNumber::new(page)?;
        let filters = match filters {
            Some(filters) => filters.effective(),
            None => self.state.lock().await.filters.clone(),
        };
        self.load(page, filters, false).await
    }

    /// Replaces the filters and goes back to the first page. Blank values
    /// are dropped before the request is built.
    pub async fn apply_filters(&self, filters: FilterCriteria) -> ControllerResult<Page<E>> {
        self.load(PageNumber::FIRST, filters.effective(), false).await
    }

    pub async fn reset_filters(&self) -> ControllerResult<Page<E>> {
        self.load(PageNumber::FIRST, FilterCriteria::new(), false).await
    }

    /// Pager navigation: rejects pages past the last known one.
    pub async fn change_page(&self, page: usize) -> ControllerResult<Page<E>> {
        let requested = PageNumber::new(page)?;
        let (total_pages, filters) = {
            let state = self.state.lock().await;
            (
                state.page.as_ref().map(|p| p.total_pages),
                state.filters.clone(),
            )
        };
        if let Some(last) = total_pages.map(|total| total.max(1))
            && page > last
        {
            return Err(ControllerError::PageOutOfRange {
                requested: page,
                total_pages: last,
            });
        }
        self.load(requested, filters, false).await
    }

    /// Fetches the current page again, bypassing the unchanged-reload skip.
    pub async fn refresh(&self) -> ControllerResult<Page<E>> {
        let (page, filters) = {
            let state = self.state.lock().await;
            (state.current_page, state.filters.clone())
        };
        self.load(page, filters, true).await
    }

    async fn load(
        &self,
        page: PageNumber,
        filters: FilterCriteria,
        force: bool,
    ) -> ControllerResult<Page<E>> {
        let request_id = {
            let mut state = self.state.lock().await;
            if !force
                && self.skip_unchanged_reload
                && state.phase == LoadPhase::Loaded
                && state.current_page == page
                && state.filters == filters
                && let Some(held) = &state.page
            {
                return Ok(held.clone());
            }
            state.latest_request += 1;
            state.phase = LoadPhase::Loading;
            state.latest_request
        };

        let request = ListRequest::new(&E::RESOURCE, page, self.page_size, &filters);
        log::debug!(
            "request {request_id}: GET {} page {page} ({} filter(s))",
            request.path,
            filters.applied().count()
        );

        let result = match self.api.fetch_page(&request).await {
            Ok(raw) => self.decode(raw, page),
            Err(e) => Err(e.into()),
        };

        let mut state = self.state.lock().await;
        if state.latest_request != request_id {
            log::debug!(
                "discarding stale response to request {request_id} for {}",
                E::RESOURCE.path
            );
            return Err(ControllerError::Superseded { request_id });
        }

        match result {
            Ok(fetched) => {
                state.page = Some(fetched.clone());
                state.current_page = page;
                state.filters = filters;
                state.phase = LoadPhase::Loaded;
                state.total_hint = None;
                Ok(fetched)
            }
            Err(e) => {
                log::error!("Failed to load {} page {page}: {e}", E::RESOURCE.path);
                state.phase = LoadPhase::Errored;
                Err(e)
            }
        }
    }

    fn decode(&self, raw: RawPage, page: PageNumber) -> ControllerResult<Page<E>> {
        let rows = if raw.unpaged {
            let offset = (page.get() - 1).saturating_mul(self.page_size);
            raw.items
                .into_iter()
                .skip(offset)
                .take(self.page_size)
                .collect()
        } else {
            raw.items
        };
        let items: Vec<E> = serde_json::from_value(Value::Array(rows))
            .map_err(|e| ControllerError::Api(ApiError::from(e)))?;
        let fetched = Page::new(items, page, self.page_size, raw.total_items);

        if let Some(server_pages) = raw.total_pages
            && server_pages != fetched.total_pages as u64
        {
            log::warn!(
                "{} reports {server_pages} page(s), {} expected from {} row(s)",
                E::RESOURCE.path,
                fetched.total_pages,
                fetched.total_items
            );
        }
        Ok(fetched)
    }

    /// Sends one write and reloads the current page.
    ///
    /// Returns the server's response to the write. A failed reload after an
    /// accepted write is reported as [`ControllerError::RefreshFailed`].
    pub async fn mutate(&self, mutation: Mutation<E::Key>) -> ControllerResult<Value> {
        let (request, delta) = self.write_request(mutation).await?;
        let response = self.send(&request).await?;
        self.adjust_total(delta).await;
        match self.refresh_after_mutation().await {
            Ok(()) => Ok(response),
            Err(e) => Err(ControllerError::RefreshFailed {
                applied: 1,
                response: Some(response),
                source: Box::new(e),
            }),
        }
    }

    /// Sends the writes one after another and stops at the first failure.
    ///
    /// Writes already applied are kept and nothing is reloaded after a
    /// failure. On success the current page is reloaded once.
    pub async fn mutate_each(&self, mutations: Vec<Mutation<E::Key>>) -> ControllerResult<usize> {
        if mutations.is_empty() {
            return Ok(0);
        }

        let mut applied = 0;
        for mutation in mutations {
            let outcome = match self.write_request(mutation).await {
                Ok((request, delta)) => self.send(&request).await.map(|_| delta),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(delta) => {
                    self.adjust_total(delta).await;
                    applied += 1;
                }
                Err(e) => {
                    log::error!(
                        "Batch on {} stopped after {applied} request(s): {e}",
                        E::RESOURCE.path
                    );
                    return Err(ControllerError::Batch {
                        applied,
                        source: Box::new(e),
                    });
                }
            }
        }

        self.refresh_after_mutation()
            .await
            .map_err(|e| ControllerError::RefreshFailed {
                applied,
                response: None,
                source: Box::new(e),
            })?;
        Ok(applied)
    }

    async fn send(&self, request: &WriteRequest) -> ControllerResult<Value> {
        match self.api.send(request).await {
            Ok(response) => {
                log::info!("{:?} {} applied", request.method, request.path);
                Ok(response)
            }
            Err(e) => {
                log::error!("Failed to {:?} {}: {e}", request.method, request.path);
                Err(e.into())
            }
        }
    }

    async fn write_request(
        &self,
        mutation: Mutation<E::Key>,
    ) -> ControllerResult<(WriteRequest, i64)> {
        let resource = E::RESOURCE;
        let request = match mutation {
            Mutation::Create(body) => return Ok((WriteRequest::post(resource.path, body), 1)),
            Mutation::Delete { key } => {
                return Ok((WriteRequest::delete(resource.row_path(&key)), -1));
            }
            Mutation::Update { key, body } => WriteRequest::put(resource.row_path(&key), body),
            Mutation::Retire { key } => {
                let status = E::RETIRED_STATUS
                    .ok_or(ControllerError::Unsupported("rows of this table cannot be retired"))?;
                WriteRequest::set_status(&resource.row_path(&key), status)
            }
            Mutation::SetStatus { key, status } => {
                WriteRequest::set_status(&resource.row_path(&key), &status)
            }
            Mutation::ToggleStatus { key } => {
                let state = self.state.lock().await;
                let row = state
                    .page
                    .iter()
                    .flat_map(|page| page.items.iter())
                    .find(|row| row.key() == key)
                    .ok_or_else(|| ControllerError::RowNotLoaded(key.to_string()))?;
                let status = row
                    .toggled_status()
                    .ok_or(ControllerError::Unsupported("row has no status to toggle"))?;
                WriteRequest::set_status(&resource.row_path(&key), status)
            }
            Mutation::Action(request) => request,
        };
        Ok((request, 0))
    }

    async fn adjust_total(&self, delta: i64) {
        if delta == 0 {
            return;
        }
        let mut state = self.state.lock().await;
        let base = state
            .total_hint
            .or_else(|| state.page.as_ref().map(|p| p.total_items))
            .unwrap_or(0);
        state.total_hint = Some(base.saturating_add_signed(delta));
    }

    async fn refresh_after_mutation(&self) -> ControllerResult<()> {
        let page = match self.refresh().await {
            Ok(page) => page,
            Err(ControllerError::Superseded { .. }) => return Ok(()),
            Err(e) => return Err(e),
        };

        // The last row of the last page went away: step back.
        if page.is_empty() && page.page_number.get() > page.total_pages.max(1) {
            let last = PageNumber::new(page.total_pages.max(1))?;
            let filters = self.state.lock().await.filters.clone();
            match self.load(last, filters, true).await {
                Ok(_) | Err(ControllerError::Superseded { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Fetches `{ count }` from the table's count endpoint and shows it
    /// until the next page fetch.
    pub async fn refresh_count(&self) -> ControllerResult<u64> {
        let path = E::RESOURCE
            .count_path
            .ok_or(ControllerError::Unsupported("table has no count endpoint"))?;
        let body = self.api.fetch_value(path, &[]).await?;
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| ApiError::Decode(format!("missing `count` in {path} response")))?;
        self.state.lock().await.total_hint = Some(count);
        Ok(count)
    }

    pub async fn page(&self) -> Option<Page<E>> {
        self.state.lock().await.page.clone()
    }

    pub async fn current_page(&self) -> PageNumber {
        self.state.lock().await.current_page
    }

    pub async fn filters(&self) -> FilterCriteria {
        self.state.lock().await.filters.clone()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.lock().await.phase
    }

    /// Row count to display: the local hint if one is pending, otherwise the
    /// count of the last fetch.
    pub async fn displayed_total(&self) -> u64 {
        let state = self.state.lock().await;
        state
            .total_hint
            .or_else(|| state.page.as_ref().map(|p| p.total_items))
            .unwrap_or(0)
    }

    /// A row of the held page.
    pub async fn find(&self, key: &E::Key) -> Option<E> {
        let state = self.state.lock().await;
        state
            .page
            .as_ref()
            .and_then(|page| page.items.iter().find(|row| row.key() == *key).cloned())
    }

    pub async fn visible_pages(&self) -> Vec<usize> {
        let state = self.state.lock().await;
        match &state.page {
            Some(page) => visible_page_window(page.page_number.get(), page.total_pages, self.window_size),
            None => Vec::new(),
        }
    }

    /// Display view of the held page with ranked rows.
    pub async fn paginated(&self) -> Option<Paginated<E>> {
        let state = self.state.lock().await;
        state
            .page
            .as_ref()
            .map(|page| Paginated::new(page, self.window_size))
    }
}
