use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    commands::{AddReagentCommand, AddReagentResult, Command},
    config::AppConfig,
    errors::ServiceError,
    seed,
    services::{
        expiry::ExpiryClassifier,
        ingest::ReagentInput,
        reagent_store::{IdPolicy, ReagentStore},
    },
    ui::{
        panel::AddReagentPanel,
        table::{ReagentRow, ReagentTable, TableSummary},
    },
};

/// Discrete user actions. Each one is fully applied before the next is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchChanged(String),
    ToggleFilter,
    OpenAddPanel,
    /// Cancel button or a click on the overlay.
    CloseAddPanel,
    EditField { field: String, value: String },
    Submit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Updated,
    Added(AddReagentResult),
}

/// State behind the reagents page: the store plus the search box, the filter
/// toggle and the add panel.
#[derive(Debug, Clone)]
pub struct InventorySession {
    store: ReagentStore,
    table: ReagentTable,
    panel: AddReagentPanel,
    search_term: String,
    filter_open: bool,
    strict_ingest: bool,
}

impl Default for InventorySession {
    fn default() -> Self {
        Self::new(ReagentStore::new(), ExpiryClassifier::default())
    }
}

impl InventorySession {
    pub fn new(store: ReagentStore, classifier: ExpiryClassifier) -> Self {
        Self {
            store,
            table: ReagentTable::new(classifier),
            panel: AddReagentPanel::new(),
            search_term: String::new(),
            filter_open: false,
            strict_ingest: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = if config.seed_demo_data {
            seed::seeded_store(config.id_policy)
        } else {
            ReagentStore::with_policy(config.id_policy)
        };
        let mut session = Self::new(store, ExpiryClassifier::new(config.expiring_soon_days));
        session.strict_ingest = config.strict_ingest;
        info!(
            records = session.store.len(),
            strict = session.strict_ingest,
            "Inventory session started"
        );
        session
    }

    pub fn with_strict_ingest(mut self, strict: bool) -> Self {
        self.strict_ingest = strict;
        self
    }

    pub fn store(&self) -> &ReagentStore {
        &self.store
    }

    pub fn panel(&self) -> &AddReagentPanel {
        &self.panel
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter_open(&self) -> bool {
        self.filter_open
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.store.policy()
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<EventOutcome, ServiceError> {
        debug!(?event, "ui event");
        match event {
            UiEvent::SearchChanged(term) => self.search_term = term,
            UiEvent::ToggleFilter => self.filter_open = !self.filter_open,
            UiEvent::OpenAddPanel => self.panel.open(),
            UiEvent::CloseAddPanel => self.panel.close(),
            UiEvent::EditField { field, value } => self.panel.set_field(&field, value)?,
            UiEvent::Submit => return self.submit().map(EventOutcome::Added),
        }
        Ok(EventOutcome::Updated)
    }

    /// Saves the panel's draft. On rejection the panel stays open with the draft intact.
    fn submit(&mut self) -> Result<AddReagentResult, ServiceError> {
        if !self.panel.is_open() {
            return Err(ServiceError::InvalidOperation(
                "the add panel is not open".to_string(),
            ));
        }
        let result = self.add(self.panel.draft().clone())?;
        self.panel.save();
        Ok(result)
    }

    /// Adds a payload directly, bypassing the panel (used for bulk import).
    pub fn add(&mut self, input: ReagentInput) -> Result<AddReagentResult, ServiceError> {
        AddReagentCommand::new(input)
            .strict(self.strict_ingest)
            .execute(&mut self.store)
    }

    /// Rows for the current search term, classified against `today`.
    pub fn visible_rows(&self, today: NaiveDate) -> Vec<ReagentRow<'_>> {
        self.table.rows(&self.store, &self.search_term, today)
    }

    pub fn summary(&self) -> TableSummary {
        self.table.summary(&self.store, &self.search_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::expiry::ExpiryStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn edit(field: &str, value: &str) -> UiEvent {
        UiEvent::EditField {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn submit_through_panel() {
        let mut session = InventorySession::from_config(&AppConfig::default());
        session.dispatch(UiEvent::OpenAddPanel).unwrap();
        session.dispatch(edit("name", "Ацетон")).unwrap();
        session.dispatch(edit("quantity", "2")).unwrap();
        session.dispatch(edit("expiryDate", "2025-06-05")).unwrap();

        let outcome = session.dispatch(UiEvent::Submit).unwrap();
        let EventOutcome::Added(result) = outcome else {
            panic!("expected an add");
        };
        assert_eq!(result.id, 4);
        assert!(!session.panel().is_open());
        assert!(session.panel().draft().name.is_empty());

        let rows = session.visible_rows(today());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].status, ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn submit_requires_open_panel() {
        let mut session = InventorySession::default();
        let err = session.dispatch(UiEvent::Submit).unwrap_err();
        assert_eq!(err.code(), "invalid_operation");
    }

    #[test]
    fn strict_rejection_keeps_panel_open() {
        let mut session = InventorySession::default().with_strict_ingest(true);
        session.dispatch(UiEvent::OpenAddPanel).unwrap();
        session.dispatch(edit("name", "Ацетон")).unwrap();
        session.dispatch(edit("quantity", "many")).unwrap();

        assert!(session.dispatch(UiEvent::Submit).is_err());
        assert!(session.panel().is_open());
        assert_eq!(session.panel().draft().quantity, "many");
        assert!(session.store().is_empty());
    }

    #[test]
    fn search_and_toggles() {
        let mut session = InventorySession::from_config(&AppConfig::default());
        session
            .dispatch(UiEvent::SearchChanged("H2SO4".into()))
            .unwrap();
        assert_eq!(session.visible_rows(today()).len(), 2);
        assert_eq!(session.summary().to_string(), "1-2 из 3");

        session.dispatch(UiEvent::ToggleFilter).unwrap();
        assert!(session.filter_open());
        session.dispatch(UiEvent::ToggleFilter).unwrap();
        assert!(!session.filter_open());

        session.dispatch(UiEvent::OpenAddPanel).unwrap();
        session.dispatch(UiEvent::CloseAddPanel).unwrap();
        assert!(!session.panel().is_open());
    }

    #[test]
    fn config_without_seed_starts_empty() {
        let config = AppConfig {
            seed_demo_data: false,
            id_policy: IdPolicy::Monotonic,
            ..AppConfig::default()
        };
        let session = InventorySession::from_config(&config);
        assert!(session.store().is_empty());
        assert_eq!(session.id_policy(), IdPolicy::Monotonic);
    }
}
