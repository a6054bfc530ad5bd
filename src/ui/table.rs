use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    models::ReagentRecord,
    services::{
        expiry::{BadgeTone, ExpiryClassifier, ExpiryStatus, StatusBadge},
        reagent_store::ReagentStore,
    },
};

/// Column headers, in display order.
pub const COLUMNS: [&str; 7] = [
    "НАИМЕНОВАНИЕ, ФОРМУЛА",
    "ДАТА ПОСТУПЛЕНИЯ",
    "КЛАССИФИКАЦИЯ",
    "ДАТА ИЗГОТОВЛЕНИЯ",
    "ГОДЕН ДО",
    "ВХОДНОЙ КОНТРОЛЬ",
    "ПРИМЕЧАНИЕ",
];

/// One rendered table row: the record plus its status as of the render date.
#[derive(Debug, Clone, Serialize)]
pub struct ReagentRow<'a> {
    #[serde(flatten)]
    pub record: &'a ReagentRecord,
    pub status: ExpiryStatus,
    pub badge: Option<StatusBadge>,
}

impl<'a> ReagentRow<'a> {
    pub fn new(record: &'a ReagentRecord, status: ExpiryStatus) -> Self {
        Self {
            record,
            status,
            badge: status.badge(),
        }
    }

    pub fn expiry_tone(&self) -> BadgeTone {
        self.status.tone()
    }

    /// Grade badge text. Unknown grades are shown as entered.
    pub fn grade_label(&self) -> &'a str {
        match self.record.grade_kind() {
            Some(grade) => grade.label(),
            None => self.record.grade.as_str(),
        }
    }

    pub fn package_control_label(&self) -> &'a str {
        match self.record.package_control_kind() {
            Some(control) => control.label(),
            None => self.record.package_control.as_str(),
        }
    }

    /// Cell texts in [`COLUMNS`] order.
    pub fn cells(&self) -> [&'a str; 7] {
        [
            self.record.name.as_str(),
            self.record.receipt_date.as_str(),
            self.grade_label(),
            self.record.manufacture_date.as_str(),
            self.record.expiry_date.as_str(),
            self.package_control_label(),
            self.record.notes.as_str(),
        ]
    }
}

/// Footer text for the table: which rows are visible out of how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible == 0 {
            write!(f, "0 из {}", self.total)
        } else {
            write!(f, "1-{} из {}", self.visible, self.total)
        }
    }
}

/// Builds table rows from the store. Classification runs on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReagentTable {
    classifier: ExpiryClassifier,
}

impl ReagentTable {
    pub fn new(classifier: ExpiryClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ExpiryClassifier {
        &self.classifier
    }

    pub fn rows<'a>(
        &self,
        store: &'a ReagentStore,
        search_term: &str,
        today: NaiveDate,
    ) -> Vec<ReagentRow<'a>> {
        store
            .filter(search_term)
            .map(|record| {
                let status = self.classifier.display_status(&record.expiry_date, today);
                ReagentRow::new(record, status)
            })
            .collect()
    }

    pub fn summary(&self, store: &ReagentStore, search_term: &str) -> TableSummary {
        TableSummary {
            visible: store.filter(search_term).count(),
            total: store.len(),
        }
    }
}
