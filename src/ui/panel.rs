use crate::{errors::ServiceError, services::ingest::ReagentInput};

/// State of the slide-in "add reagent" form.
///
/// Closing the panel keeps whatever was typed; only a successful save clears it.
#[derive(Debug, Clone, Default)]
pub struct AddReagentPanel {
    is_open: bool,
    draft: ReagentInput,
}

impl AddReagentPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn draft(&self) -> &ReagentInput {
        &self.draft
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Same as [`close`](Self::close): the draft survives until the next save.
    pub fn cancel(&mut self) {
        self.close();
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), ServiceError> {
        let slot = self
            .draft
            .field_mut(field)
            .ok_or_else(|| ServiceError::InvalidInput(format!("unknown form field: {}", field)))?;
        *slot = value.into();
        Ok(())
    }

    /// Hands the draft over, clears the form and closes the panel.
    pub fn save(&mut self) -> ReagentInput {
        self.is_open = false;
        std::mem::take(&mut self.draft)
    }

    pub fn reset(&mut self) {
        self.draft = ReagentInput::default();
    }
}
