//! Application state management for ngodesk.
//!
//! `App` owns one list controller per screen, the cache, the optional API
//! client, and the channel that background fetches and bulk actions report
//! back through.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use ngodesk_core::actions::{self, BulkAction};
use ngodesk_core::api::{DocumentAction, DocumentLink};
use ngodesk_core::cache::CacheAges;
use ngodesk_core::listing::{specs, SelectScope, DEFAULT_PAGE_SIZE};
use ngodesk_core::models::{
    ComplianceDocument, Employee, ExitRecord, Grant, OnboardingTask, Opportunity,
    ReferenceCheck, SuperAdminUser,
};
use ngodesk_core::stats::{ComplianceStats, GrantTotals, HeadcountStats, PipelineStats};
use ngodesk_core::utils::format_currency;
use ngodesk_core::{
    ApiClient, ApiError, CacheManager, Config, CoreResult, Dataset, ListSpec, Payload, Record,
    Screen, TabularListController,
};

use crate::ui::table::ScreenList;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// One message per dataset plus completion and action results.
const CHANNEL_BUFFER_SIZE: usize = 32;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingQuit,
    ConfirmingBulk(BulkAction),
    Quitting,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Messages sent from spawned tasks back to the main loop.
enum RefreshResult {
    /// One dataset fetched (or generated, in demo mode)
    Loaded(Payload),
    /// One dataset failed; the others are unaffected
    Failed(Dataset, String),
    /// Every dataset in a refresh has reported
    RefreshComplete,
    BulkDone {
        screen: Screen,
        action: BulkAction,
        ids: Vec<String>,
        updated: usize,
    },
    BulkFailed(BulkAction, String),
    Link(DocumentAction, DocumentLink),
    LinkFailed(String),
}

// ============================================================================
// Screen lists
// ============================================================================

/// One list controller per screen.
pub struct Lists {
    grant_portfolio: TabularListController<Grant>,
    grant_archive: TabularListController<Grant>,
    compliance: TabularListController<ComplianceDocument>,
    opportunities: TabularListController<Opportunity>,
    employees: TabularListController<Employee>,
    onboarding: TabularListController<OnboardingTask>,
    exits: TabularListController<ExitRecord>,
    references: TabularListController<ReferenceCheck>,
    users: TabularListController<SuperAdminUser>,
}

/// Screens that don't fix their own page size follow the config.
fn build<T: Record>(spec: ListSpec<T>, config: &Config) -> CoreResult<TabularListController<T>> {
    let mut list = TabularListController::new(spec)?;
    if list.page_size() == DEFAULT_PAGE_SIZE && config.page_size != DEFAULT_PAGE_SIZE {
        list.set_page_size(config.page_size)?;
    }
    list.set_view_mode(config.default_view);
    Ok(list)
}

impl Lists {
    pub fn new(config: &Config) -> CoreResult<Self> {
        Ok(Self {
            grant_portfolio: build(specs::grant_portfolio(), config)?,
            grant_archive: build(specs::grant_archive(), config)?,
            compliance: build(specs::compliance_documents(), config)?,
            opportunities: build(specs::opportunities(), config)?,
            employees: build(specs::employees(), config)?,
            onboarding: build(specs::onboarding_tasks(), config)?,
            exits: build(specs::exits(), config)?,
            references: build(specs::reference_checks(), config)?,
            users: build(specs::users(), config)?,
        })
    }

    pub fn get(&self, screen: Screen) -> &dyn ScreenList {
        match screen {
            Screen::GrantPortfolio => &self.grant_portfolio,
            Screen::GrantArchive => &self.grant_archive,
            Screen::Compliance => &self.compliance,
            Screen::Opportunities => &self.opportunities,
            Screen::Employees => &self.employees,
            Screen::Onboarding => &self.onboarding,
            Screen::Exits => &self.exits,
            Screen::References => &self.references,
            Screen::Users => &self.users,
        }
    }

    pub fn get_mut(&mut self, screen: Screen) -> &mut dyn ScreenList {
        match screen {
            Screen::GrantPortfolio => &mut self.grant_portfolio,
            Screen::GrantArchive => &mut self.grant_archive,
            Screen::Compliance => &mut self.compliance,
            Screen::Opportunities => &mut self.opportunities,
            Screen::Employees => &mut self.employees,
            Screen::Onboarding => &mut self.onboarding,
            Screen::Exits => &mut self.exits,
            Screen::References => &mut self.references,
            Screen::Users => &mut self.users,
        }
    }

    /// Screens fed by `dataset`. Grants back both portfolio and archive.
    fn screens_for(dataset: Dataset) -> impl Iterator<Item = Screen> {
        Screen::ALL.into_iter().filter(move |s| s.dataset() == dataset)
    }

    pub fn apply(&mut self, payload: Payload) {
        match payload {
            Payload::Grants(data) => {
                self.grant_archive.set_records(data.clone());
                self.grant_portfolio.set_records(data);
            }
            Payload::ComplianceDocuments(data) => self.compliance.set_records(data),
            Payload::Employees(data) => self.employees.set_records(data),
            Payload::OnboardingTasks(data) => self.onboarding.set_records(data),
            Payload::Exits(data) => self.exits.set_records(data),
            Payload::ReferenceChecks(data) => self.references.set_records(data),
            Payload::Opportunities(data) => self.opportunities.set_records(data),
            Payload::Users(data) => self.users.set_records(data),
        }
    }

    pub fn begin_loading(&mut self, dataset: Dataset) {
        for screen in Self::screens_for(dataset) {
            self.get_mut(screen).begin_loading();
        }
    }

    pub fn fail_loading(&mut self, dataset: Dataset, error: &str) {
        for screen in Self::screens_for(dataset) {
            self.get_mut(screen).fail_loading(error.to_string());
        }
    }

    /// Apply a completed bulk action locally and return the updated
    /// collection for the cache.
    fn apply_bulk(&mut self, action: BulkAction, ids: &[String], today: NaiveDate) -> Payload {
        match action {
            BulkAction::SendReminders => {
                self.compliance
                    .update_records(ids, |doc| actions::mark_reminded(doc, today));
                Payload::ComplianceDocuments(self.compliance.records().to_vec())
            }
            BulkAction::SuspendUsers => {
                self.users.update_records(ids, actions::mark_suspended);
                Payload::Users(self.users.records().to_vec())
            }
        }
    }

    /// Summary figures shown above a screen's list. Empty when the screen
    /// has none.
    pub fn stats_line(&self, screen: Screen) -> String {
        match screen {
            Screen::GrantPortfolio | Screen::GrantArchive => {
                let list = if screen == Screen::GrantPortfolio {
                    &self.grant_portfolio
                } else {
                    &self.grant_archive
                };
                let totals = GrantTotals::from_grants(list.filtered());
                let mut parts = vec![format!(
                    "{} grants · {} total",
                    totals.count,
                    format_currency(totals.total_amount)
                )];
                for (status, (count, amount)) in &totals.by_status {
                    parts.push(format!("{} {} ({})", status, count, format_currency(*amount)));
                }
                parts.join(" · ")
            }
            Screen::Compliance => {
                let stats = ComplianceStats::from_documents(self.compliance.records());
                if stats.total == 0 {
                    return String::new();
                }
                let mut parts: Vec<String> = stats
                    .by_status
                    .iter()
                    .map(|(status, count)| format!("{} {}", status, count))
                    .collect();
                parts.push(format!("{:.0}% compliant", stats.compliance_rate()));
                parts.push(format!("{} need reminders", stats.reminder_eligible));
                parts.join(" · ")
            }
            Screen::Opportunities => {
                let stats = PipelineStats::from_opportunities(self.opportunities.records());
                let win_rate = stats
                    .win_rate()
                    .map(|r| format!("{:.0}%", r))
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "Open pipeline {} · {} awarded · {} declined · win rate {}",
                    format_currency(stats.open_amount),
                    stats.awarded,
                    stats.declined,
                    win_rate
                )
            }
            Screen::Employees | Screen::Exits => {
                let stats = HeadcountStats::new(self.employees.records(), self.exits.records());
                let mut parts = vec![format!("Headcount {}", stats.headcount())];
                let breakdown = if screen == Screen::Employees {
                    &stats.by_status
                } else {
                    &stats.exits_by_type
                };
                parts.extend(breakdown.iter().map(|(k, v)| format!("{} {}", k, v)));
                parts.join(" · ")
            }
            Screen::Onboarding | Screen::References | Screen::Users => String::new(),
        }
    }
}

/// The bulk action a screen offers, if any.
pub fn bulk_action_for(screen: Screen) -> Option<BulkAction> {
    match screen {
        Screen::Compliance => Some(BulkAction::SendReminders),
        Screen::Users => Some(BulkAction::SuspendUsers),
        _ => None,
    }
}

/// User-facing text for a failed fetch or action.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.chain().find_map(|cause| cause.downcast_ref::<ApiError>()) {
        Some(ApiError::RateLimited) => "Rate limited - try again shortly".to_string(),
        Some(ApiError::Unauthorized) => "Unauthorized - check NGODESK_API_TOKEN".to_string(),
        Some(ApiError::NetworkError(_)) => "Network error - is the backend reachable?".to_string(),
        _ => format!("{:#}", err),
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub config: Config,
    /// None in demo mode
    api: Option<ApiClient>,
    pub cache: CacheManager,

    // UI State
    pub state: AppState,
    pub current_screen: Screen,
    pub lists: Lists,
    cursors: [usize; Screen::ALL.len()],
    facet_focus: [usize; Screen::ALL.len()],

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,
    refresh_errors: usize,
    /// One refresh at a time, so an older fetch cannot land after a newer one
    pub refresh_in_flight: bool,
    pub bulk_in_flight: bool,

    pub status_message: Option<String>,
    pub cache_ages: CacheAges,
}

impl App {
    /// Create a new application instance from a loaded config, caching
    /// under the config's standard cache directory.
    pub fn new(config: Config) -> Result<Self> {
        let cache_dir = match config.cache_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "No cache directory, using ./cache");
                PathBuf::from("./cache")
            }
        };
        Self::with_config(config, cache_dir)
    }

    pub fn with_config(config: Config, cache_dir: PathBuf) -> Result<Self> {
        debug!(?cache_dir, demo = config.is_demo(), "Cache directory configured");
        let cache = CacheManager::new(cache_dir)?;
        let api = match config.api_base_url {
            Some(ref url) => Some(ApiClient::new(url)?.with_token(config.api_token.clone())),
            None => None,
        };
        let lists = Lists::new(&config)?;
        let (refresh_tx, refresh_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let cache_ages = cache.ages();

        Ok(Self {
            config,
            api,
            cache,
            state: AppState::Normal,
            current_screen: Screen::default(),
            lists,
            cursors: [0; Screen::ALL.len()],
            facet_focus: [0; Screen::ALL.len()],
            refresh_rx,
            refresh_tx,
            refresh_errors: 0,
            refresh_in_flight: false,
            bulk_in_flight: false,
            status_message: None,
            cache_ages,
        })
    }

    pub fn is_demo(&self) -> bool {
        self.api.is_none()
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn current_list(&self) -> &dyn ScreenList {
        self.lists.get(self.current_screen)
    }

    fn current_list_mut(&mut self) -> &mut dyn ScreenList {
        self.lists.get_mut(self.current_screen)
    }

    // =========================================================================
    // Cache
    // =========================================================================

    /// Load every cached dataset into its screens.
    pub fn load_from_cache(&mut self) {
        for dataset in Dataset::ALL {
            match self.cache.load_payload(dataset) {
                Ok(Some(cached)) => {
                    debug!(cache = %dataset, age = %cached.age_display(), "Loaded from cache");
                    self.lists.apply(cached.data);
                }
                Ok(None) => {}
                Err(e) => warn!(cache = %dataset, error = %e, "Failed to load cache"),
            }
        }
        self.cache_ages = self.cache.ages();
    }

    pub fn is_cache_stale(&self) -> bool {
        self.cache.any_stale()
    }

    // =========================================================================
    // Background Data Refresh
    // =========================================================================

    /// Spawn a background task to refresh all data. Ignored while a refresh
    /// is already running.
    pub fn refresh_all_background(&mut self) {
        if self.refresh_in_flight {
            debug!("Refresh already running, ignoring request");
            return;
        }
        self.refresh_in_flight = true;
        info!(demo = self.is_demo(), "Starting background refresh of all data");
        for dataset in Dataset::ALL {
            self.lists.begin_loading(dataset);
        }
        self.refresh_errors = 0;

        let tx = self.refresh_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            Self::execute_background_refresh(tx, api).await;
        });

        self.status_message = Some("Refreshing data...".to_string());
    }

    /// Fetch every dataset and wait for the results. Used outside the
    /// interactive loop.
    pub async fn refresh_all_now(&mut self) -> Result<()> {
        for dataset in Dataset::ALL {
            let payload = match self.api {
                None => Payload::demo(dataset),
                Some(ref client) => client.fetch_payload(dataset).await?,
            };
            self.lists.apply(payload);
        }
        Ok(())
    }

    /// Helper to send refresh results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send refresh result - channel closed");
        }
    }

    async fn execute_background_refresh(tx: mpsc::Sender<RefreshResult>, api: Option<ApiClient>) {
        match api {
            None => {
                for dataset in Dataset::ALL {
                    Self::send_result(&tx, RefreshResult::Loaded(Payload::demo(dataset))).await;
                }
            }
            Some(client) => {
                for (dataset, result) in client.fetch_payloads(&Dataset::ALL).await {
                    let message = match result {
                        Ok(payload) => RefreshResult::Loaded(payload),
                        Err(e) => {
                            warn!(dataset = %dataset, error = %e, "Refresh failed");
                            RefreshResult::Failed(dataset, describe_error(&e))
                        }
                    };
                    Self::send_result(&tx, message).await;
                }
            }
        }
        Self::send_result(&tx, RefreshResult::RefreshComplete).await;
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.refresh_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_refresh_result(result);
        }
    }

    fn process_refresh_result(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::Loaded(payload) => {
                if let Err(e) = self.cache.save_payload(&payload) {
                    warn!(dataset = %payload.dataset(), error = %e, "Failed to cache data");
                }
                debug!(dataset = %payload.dataset(), count = payload.len(), "Data loaded");
                self.lists.apply(payload);
                self.cache_ages = self.cache.ages();
                self.clamp_cursor();
            }
            RefreshResult::Failed(dataset, message) => {
                self.refresh_errors += 1;
                self.lists.fail_loading(dataset, &message);
                self.status_message = Some(format!("Failed to load {}: {}", dataset.noun(), message));
            }
            RefreshResult::RefreshComplete => {
                self.refresh_in_flight = false;
                info!(errors = self.refresh_errors, "Refresh complete");
                if self.refresh_errors == 0 {
                    self.status_message = None;
                }
            }
            RefreshResult::BulkDone { screen, action, ids, updated } => {
                self.bulk_in_flight = false;
                let today = self.today();
                let payload = self.lists.apply_bulk(action, &ids, today);
                if let Err(e) = self.cache.save_payload(&payload) {
                    warn!(error = %e, "Failed to cache bulk action result");
                }
                self.lists.get_mut(screen).clear_selection();
                self.status_message = Some(action.summary(updated));
            }
            RefreshResult::BulkFailed(action, message) => {
                self.bulk_in_flight = false;
                self.status_message = Some(format!("{} failed: {}", action.label(), message));
            }
            RefreshResult::Link(action, link) => {
                self.status_message = Some(format!("{} link: {}", action.as_str(), link.url));
            }
            RefreshResult::LinkFailed(message) => {
                self.status_message = Some(format!("Document link failed: {}", message));
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn go_to_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.clamp_cursor();
    }

    pub fn cursor(&self) -> usize {
        self.cursors[self.current_screen.index()]
    }

    fn set_cursor(&mut self, cursor: usize) {
        self.cursors[self.current_screen.index()] = cursor;
    }

    fn clamp_cursor(&mut self) {
        let len = self.current_list().page_ids().len();
        let cursor = self.cursor().min(len.saturating_sub(1));
        self.set_cursor(cursor);
    }

    /// Moves past the end of a page onto the next one.
    pub fn move_down(&mut self) {
        let len = self.current_list().page_ids().len();
        if self.cursor() + 1 < len {
            self.set_cursor(self.cursor() + 1);
        } else if self.current_list_mut().next_page() {
            self.set_cursor(0);
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor() > 0 {
            self.set_cursor(self.cursor() - 1);
        } else if self.current_list_mut().prev_page() {
            let len = self.current_list().page_ids().len();
            self.set_cursor(len.saturating_sub(1));
        }
    }

    pub fn next_page(&mut self) {
        if self.current_list_mut().next_page() {
            self.set_cursor(0);
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_list_mut().prev_page() {
            self.set_cursor(0);
        }
    }

    pub fn first_page(&mut self) {
        self.current_list_mut().go_to_page(1);
        self.set_cursor(0);
    }

    pub fn last_page(&mut self) {
        let last = self.current_list().total_pages();
        self.current_list_mut().go_to_page(last);
        self.set_cursor(0);
    }

    /// Id of the record under the cursor.
    pub fn cursor_id(&self) -> Option<String> {
        self.current_list().page_ids().into_iter().nth(self.cursor())
    }

    // =========================================================================
    // Search, facets, sorting
    // =========================================================================

    pub fn start_search(&mut self) {
        self.state = AppState::Searching;
    }

    pub fn search_push(&mut self, c: char) {
        let query = format!("{}{}", self.current_list().query(), c);
        self.current_list_mut().set_query(&query);
        self.set_cursor(0);
    }

    pub fn search_pop(&mut self) {
        let mut query = self.current_list().query().to_string();
        query.pop();
        self.current_list_mut().set_query(&query);
        self.set_cursor(0);
    }

    /// Enter keeps the query; Esc discards it.
    pub fn finish_search(&mut self, keep: bool) {
        if !keep {
            self.current_list_mut().set_query("");
            self.set_cursor(0);
        }
        self.state = AppState::Normal;
    }

    /// Index of the facet that `f` cycles on the current screen.
    pub fn facet_focus(&self) -> usize {
        self.facet_focus[self.current_screen.index()]
    }

    pub fn next_facet_field(&mut self) {
        let count = self.current_list().facet_count();
        if count == 0 {
            return;
        }
        let index = self.current_screen.index();
        self.facet_focus[index] = (self.facet_focus[index] + 1) % count;
    }

    pub fn cycle_facet(&mut self) {
        let focus = self.facet_focus();
        match self.current_list_mut().cycle_facet_at(focus) {
            Ok(selection) => debug!(facet = focus, value = %selection.label(), "Facet changed"),
            Err(e) => warn!(error = %e, "Failed to cycle facet"),
        }
        self.set_cursor(0);
    }

    pub fn clear_filters(&mut self) {
        self.current_list_mut().clear_filters();
        self.set_cursor(0);
        self.status_message = Some("Filters cleared".to_string());
    }

    /// Advance to the next sortable column.
    pub fn cycle_sort(&mut self) {
        let options = self.current_list().sort_options();
        if options.is_empty() {
            return;
        }
        let current = self.current_list().sort_state().column;
        let next = current
            .and_then(|c| options.iter().position(|(key, _)| *key == c))
            .map(|i| (i + 1) % options.len())
            .unwrap_or(0);
        let (key, label) = options[next];
        self.apply_sort(key);
        self.status_message = Some(format!("Sorted by {}", label));
    }

    /// Flip the direction of the current sort column.
    pub fn flip_sort(&mut self) {
        if let Some(column) = self.current_list().sort_state().column {
            self.apply_sort(column);
        }
    }

    fn apply_sort(&mut self, key: &str) {
        if let Err(e) = self.current_list_mut().toggle_sort(key) {
            warn!(error = %e, "Failed to sort");
        }
        self.set_cursor(0);
    }

    pub fn toggle_view_mode(&mut self) {
        let mode = self.current_list_mut().toggle_view_mode();
        self.status_message = Some(format!("{} view", mode.label()));
    }

    // =========================================================================
    // Selection and bulk actions
    // =========================================================================

    pub fn toggle_row(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.current_list_mut().flip_selected(&id);
        }
    }

    /// Select everything in `scope`, or deselect it if it is already fully
    /// selected.
    pub fn toggle_select_all(&mut self, scope: SelectScope) {
        let list = self.current_list_mut();
        let checked = list.check_state(scope) != ngodesk_core::listing::CheckState::All;
        list.select_all(scope, checked);
    }

    /// Ask for confirmation of the screen's bulk action.
    pub fn request_bulk_action(&mut self) {
        let Some(action) = bulk_action_for(self.current_screen) else {
            self.status_message = Some("No bulk action on this screen".to_string());
            return;
        };
        if self.bulk_in_flight {
            self.status_message = Some("A bulk action is already running".to_string());
            return;
        }
        if !self.current_list().can_apply_bulk() {
            self.status_message = Some(format!(
                "Select at least one eligible record to {}",
                action.label().to_lowercase()
            ));
            return;
        }
        self.state = AppState::ConfirmingBulk(action);
    }

    /// Records the pending bulk action will touch.
    pub fn bulk_target_count(&self) -> usize {
        self.current_list().eligible_selected_ids().len()
    }

    pub fn confirm_bulk_action(&mut self, action: BulkAction) {
        self.state = AppState::Normal;
        let ids = self.current_list().eligible_selected_ids();
        if ids.is_empty() {
            return;
        }
        let screen = self.current_screen;
        self.bulk_in_flight = true;
        self.status_message = Some(format!("{} ({})...", action.label(), ids.len()));

        let tx = self.refresh_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let message = match actions::execute(api.as_ref(), action, &ids).await {
                Ok(updated) => RefreshResult::BulkDone { screen, action, ids, updated },
                Err(e) => {
                    warn!(action = action.label(), error = %e, "Bulk action failed");
                    RefreshResult::BulkFailed(action, describe_error(&e))
                }
            };
            Self::send_result(&tx, message).await;
        });
    }

    /// Resolve a preview or download link for the document under the cursor.
    pub fn open_document(&mut self, action: DocumentAction) {
        if self.current_screen != Screen::Compliance {
            return;
        }
        let Some(id) = self.cursor_id() else {
            return;
        };
        let tx = self.refresh_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let message = match actions::document_link(api.as_ref(), &id, action).await {
                Ok(link) => RefreshResult::Link(action, link),
                Err(e) => RefreshResult::LinkFailed(describe_error(&e)),
            };
            Self::send_result(&tx, message).await;
        });
    }
}
