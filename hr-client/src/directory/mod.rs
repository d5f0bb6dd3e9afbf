//! People directory
//!
//! State behind the People view: which tabs a viewer gets, the rows of each
//! tab, what a row click does and the re-registration of terminated
//! employees. Collections are fetched through [`HrApi`] and kept in a
//! [`DirectoryCache`] that several directories may share.

mod cache;
pub mod format;
mod rows;

pub use cache::{CacheEntry, Collection, DirectoryCache};
pub use rows::{Cell, Column, DirectoryRow, UNASSIGNED_TEAM, cells};

use std::collections::HashMap;
use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::Employee;
use shared::policy::{self, Capability, Viewer};
use shared::reregister;
use tokio::sync::Mutex;

use crate::{ClientResult, HrApi};

/// Shown when a terminated record lacks a name or e-mail
pub const MISSING_INFO: &str = "Missing required employee information. Cannot create new employee.";

/// Directory tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Employees,
    MyTeam,
    Terminated,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Employees => "Employees",
            Self::MyTeam => "My Team",
            Self::Terminated => "Terminated Employees",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            Self::Employees => Collection::Employees,
            Self::MyTeam => Collection::MyTeam,
            Self::Terminated => Collection::Terminated,
        }
    }

    /// Whether rows of this tab carry an action menu
    pub fn with_menu(self) -> bool {
        !matches!(self, Self::Terminated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-facing outcome of a directory action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub code: Option<ErrorCode>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>, code: Option<ErrorCode>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            code,
        }
    }

    pub fn error(message: impl Into<String>, code: Option<ErrorCode>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

/// What a row click leads to
#[derive(Debug, Clone, PartialEq)]
pub enum RowClick {
    OpenProfile(Arc<Employee>),
    /// A re-registration of this employee now awaits confirmation
    ConfirmReRegistration(i64),
    Ignored,
}

/// Services shared by every directory of one session
#[derive(Clone)]
pub struct DirectoryContext {
    pub api: Arc<dyn HrApi>,
    pub cache: DirectoryCache,
    reregistering: Arc<Mutex<()>>,
}

impl DirectoryContext {
    pub fn new(api: Arc<dyn HrApi>) -> Self {
        Self::with_cache(api, DirectoryCache::new())
    }

    pub fn with_cache(api: Arc<dyn HrApi>, cache: DirectoryCache) -> Self {
        Self {
            api,
            cache,
            reregistering: Arc::new(Mutex::new(())),
        }
    }
}

/// People view state for one viewer
pub struct PeopleDirectory {
    ctx: DirectoryContext,
    viewer: Viewer,
    rows: HashMap<Tab, Vec<DirectoryRow>>,
    pending: Option<i64>,
}

impl PeopleDirectory {
    pub fn new(ctx: DirectoryContext, viewer: Viewer) -> Self {
        Self {
            ctx,
            viewer,
            rows: HashMap::new(),
            pending: None,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Tabs visible to the viewer, in display order
    pub fn tabs(&self) -> Vec<Tab> {
        let mut tabs = vec![Tab::Employees];
        if policy::allows(&self.viewer, Capability::ViewTeam) {
            tabs.push(Tab::MyTeam);
        }
        if policy::allows(&self.viewer, Capability::ViewTerminated) {
            tabs.push(Tab::Terminated);
        }
        tabs
    }

    /// Fill every visible tab, from the cache where possible
    pub async fn load(&mut self) -> ClientResult<()> {
        for tab in self.tabs() {
            let records = self.collection(tab.collection()).await?;
            self.rows.insert(tab, to_rows(records));
        }
        Ok(())
    }

    /// Drop every cached collection and load again
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.ctx.cache.invalidate_all().await;
        self.load().await
    }

    pub fn rows(&self, tab: Tab) -> &[DirectoryRow] {
        self.rows.get(&tab).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn columns(&self) -> &'static [Column] {
        Column::for_level(self.viewer.level)
    }

    /// Cells of every row in a tab
    pub fn cells(&self, tab: Tab) -> Vec<Vec<Cell>> {
        let columns = self.columns();
        self.rows(tab)
            .iter()
            .map(|row| cells(row, columns, &self.viewer, tab.with_menu()))
            .collect()
    }

    pub fn click(&mut self, tab: Tab, emp_id: i64) -> RowClick {
        let Some(row) = self.rows(tab).iter().find(|r| r.emp_id == emp_id) else {
            return RowClick::Ignored;
        };

        if policy::may_open_profile(row.terminated) {
            return RowClick::OpenProfile(row.source_handle());
        }
        if tab == Tab::Terminated && policy::allows(&self.viewer, Capability::ReRegister) {
            self.pending = Some(emp_id);
            return RowClick::ConfirmReRegistration(emp_id);
        }
        RowClick::Ignored
    }

    /// Employee id of the re-registration awaiting confirmation
    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Re-register the employee of the pending confirmation
    ///
    /// Only one re-registration runs at a time across directories sharing a
    /// context. Validation failures abort before any network call. On
    /// success the old row leaves the terminated tab, the new record joins
    /// the employees tab and the whole cache is invalidated.
    pub async fn confirm_reregistration(&mut self) -> Notice {
        let Some(emp_id) = self.pending.take() else {
            return Notice::warning("No re-registration awaiting confirmation", None);
        };

        let Ok(_guard) = Arc::clone(&self.ctx.reregistering).try_lock_owned() else {
            let code = ErrorCode::ReRegistrationInProgress;
            return Notice::warning(code.message(), Some(code));
        };

        let source = self
            .rows(Tab::Terminated)
            .iter()
            .find(|r| r.emp_id == emp_id)
            .map(DirectoryRow::source_handle);
        let Some(source) = source else {
            let code = ErrorCode::EmployeeNotFound;
            return Notice::error(code.message(), Some(code));
        };

        if let Err(e) = reregister::validate(&source) {
            tracing::warn!(emp_id, code = %e.code, "Re-registration aborted");
            return Notice::error(MISSING_INFO, Some(e.code));
        }

        let created = match self.ctx.api.reregister(emp_id).await {
            Ok(created) => Arc::new(created),
            Err(e) => {
                tracing::error!(emp_id, error = %e, "Re-registration failed");
                return Notice::error(e.to_string(), e.error_code());
            }
        };

        if let Some(terminated) = self.rows.get_mut(&Tab::Terminated) {
            terminated.retain(|r| r.emp_id != emp_id);
        }
        self.rows
            .entry(Tab::Employees)
            .or_default()
            .push(DirectoryRow::new(Arc::clone(&created)));

        self.ctx.cache.invalidate_all().await;
        match self.collection(Collection::Terminated).await {
            Ok(records) => {
                self.rows.insert(Tab::Terminated, to_rows(records));
            }
            // Keep the list as already updated
            Err(e) => tracing::warn!(error = %e, "Reloading terminated employees failed"),
        }

        tracing::info!(old_id = emp_id, new_id = created.emp_id, "Employee re-registered");
        Notice::success(format!(
            "New employee created successfully: {}",
            created.full_name()
        ))
    }

    async fn collection(&self, collection: Collection) -> ClientResult<Vec<Arc<Employee>>> {
        if let Some(entry) = self.ctx.cache.get(collection).await {
            return Ok(entry.records);
        }

        let fetched = match collection {
            Collection::Employees => self.ctx.api.list_employees().await?,
            Collection::Terminated => self.ctx.api.list_terminated().await?,
            Collection::MyTeam => match self.viewer.emp_id {
                Some(manager_id) => self.ctx.api.list_team(manager_id).await?,
                None => Vec::new(),
            },
        };
        tracing::debug!(?collection, count = fetched.len(), "Fetched collection");

        let records: Vec<Arc<Employee>> = fetched.into_iter().map(Arc::new).collect();
        self.ctx.cache.put(collection, records.clone()).await;
        Ok(records)
    }
}

fn to_rows(records: Vec<Arc<Employee>>) -> Vec<DirectoryRow> {
    records.into_iter().map(DirectoryRow::new).collect()
}
