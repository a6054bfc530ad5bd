use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    commands::Command,
    errors::ServiceError,
    services::{
        ingest::{IngestWarning, ReagentInput, RecordIngestor},
        reagent_store::ReagentStore,
    },
};

#[derive(Debug, Clone)]
pub struct AddReagentCommand {
    pub input: ReagentInput,
    /// Refuse payloads that would otherwise be stored with warnings.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddReagentResult {
    pub id: u64,
    pub warnings: Vec<IngestWarning>,
}

impl AddReagentCommand {
    pub fn new(input: ReagentInput) -> Self {
        Self {
            input,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Command for AddReagentCommand {
    type Result = AddReagentResult;

    #[instrument(skip(self, store), fields(name = %self.input.name, strict = self.strict))]
    fn execute(&self, store: &mut ReagentStore) -> Result<Self::Result, ServiceError> {
        let ingestor = RecordIngestor::new();
        let id = store.next_id();

        let (record, warnings) = if self.strict {
            let record = ingestor.ingest_strict(id, &self.input).map_err(|e| {
                error!("Rejected reagent input: {}", e);
                e
            })?;
            (record, Vec::new())
        } else {
            let outcome = ingestor.ingest(id, &self.input);
            (outcome.record, outcome.warnings)
        };

        store.try_add(record)?;
        info!(id, warnings = warnings.len(), "Reagent added");

        Ok(AddReagentResult { id, warnings })
    }
}
