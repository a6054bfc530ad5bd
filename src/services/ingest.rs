use std::{fmt, fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;
use validator::Validate;

use crate::{
    errors::ServiceError,
    models::{reagent::parse_date, Grade, PackageControl, ReagentRecord, Unit},
    services::reagent_store::ReagentStore,
};

/// Raw form payload. Every field is text exactly as typed; absent keys are empty.
///
/// Imported files are not always this tidy, so `null` reads as empty text and bare
/// numbers or booleans read as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ReagentInput {
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,
    #[serde(deserialize_with = "loose_text")]
    pub quantity: String,
    #[serde(deserialize_with = "loose_text")]
    pub unit: String,
    #[serde(alias = "frequency", deserialize_with = "loose_text")]
    pub grade: String,
    #[serde(deserialize_with = "loose_text")]
    pub manufacture_date: String,
    #[serde(deserialize_with = "loose_text")]
    pub receipt_date: String,
    #[serde(deserialize_with = "loose_text")]
    pub expiry_date: String,
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(max = 256))]
    pub manufacturer: String,
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(max = 256))]
    pub standard: String,
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(max = 1000))]
    pub methodology: String,
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(max = 256))]
    pub storage_location: String,
    #[serde(deserialize_with = "loose_text")]
    #[validate(length(max = 2000))]
    pub notes: String,
    #[serde(deserialize_with = "loose_text")]
    pub package_control: String,
}

/// Form field names, in the order the add panel lays them out.
pub const FIELD_NAMES: [&str; 13] = [
    "name",
    "quantity",
    "unit",
    "grade",
    "manufacturer",
    "manufactureDate",
    "receiptDate",
    "expiryDate",
    "standard",
    "packageControl",
    "methodology",
    "storageLocation",
    "notes",
];

impl ReagentInput {
    /// Mutable access to a field by its form name.
    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        let slot = match field {
            "name" => &mut self.name,
            "quantity" => &mut self.quantity,
            "unit" => &mut self.unit,
            "grade" | "frequency" => &mut self.grade,
            "manufacturer" => &mut self.manufacturer,
            "manufactureDate" => &mut self.manufacture_date,
            "receiptDate" => &mut self.receipt_date,
            "expiryDate" => &mut self.expiry_date,
            "standard" => &mut self.standard,
            "packageControl" => &mut self.package_control,
            "methodology" => &mut self.methodology,
            "storageLocation" => &mut self.storage_location,
            "notes" => &mut self.notes,
            _ => return None,
        };
        Some(slot)
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Something in the payload that was accepted anyway but probably isn't what the user meant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestWarning {
    MissingName,
    QuantityNotNumeric { raw: String },
    QuantityTrailingInput { raw: String },
    QuantityNegative { raw: String },
    QuantityOutOfRange { raw: String },
    UnknownUnit { raw: String },
    UnknownGrade { raw: String },
    UnknownPackageControl { raw: String },
    UnparsableDate { field: &'static str, raw: String },
    ExpiryBeforeManufacture { manufacture: String, expiry: String },
    ReceiptBeforeManufacture { manufacture: String, receipt: String },
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "name is empty"),
            Self::QuantityNotNumeric { raw } => {
                write!(f, "quantity {:?} is not a number, stored as 0", raw)
            }
            Self::QuantityTrailingInput { raw } => {
                write!(f, "quantity {:?} has trailing characters, leading digits kept", raw)
            }
            Self::QuantityNegative { raw } => {
                write!(f, "quantity {:?} is negative, stored as 0", raw)
            }
            Self::QuantityOutOfRange { raw } => {
                write!(f, "quantity {:?} is too large, stored as 0", raw)
            }
            Self::UnknownUnit { raw } => write!(f, "unit {:?} is not a known unit", raw),
            Self::UnknownGrade { raw } => write!(f, "grade {:?} is not a known grade", raw),
            Self::UnknownPackageControl { raw } => {
                write!(f, "package control {:?} is not a known state", raw)
            }
            Self::UnparsableDate { field, raw } => {
                write!(f, "{} {:?} is not a YYYY-MM-DD date", field, raw)
            }
            Self::ExpiryBeforeManufacture {
                manufacture,
                expiry,
            } => write!(
                f,
                "expiry date {} is before manufacture date {}",
                expiry, manufacture
            ),
            Self::ReceiptBeforeManufacture {
                manufacture,
                receipt,
            } => write!(
                f,
                "receipt date {} is before manufacture date {}",
                receipt, manufacture
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    pub record: ReagentRecord,
    pub warnings: Vec<IngestWarning>,
}

impl IngestOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Turns form payloads into typed records.
///
/// The lenient path never fails: bad quantities become 0 and everything else is
/// stored verbatim, with a warning for each thing that looked wrong. The strict
/// path refuses any payload that produced a warning or breaks a length limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordIngestor;

impl RecordIngestor {
    pub fn new() -> Self {
        Self
    }

    pub fn ingest(&self, id: u64, input: &ReagentInput) -> IngestOutcome {
        let mut warnings = Vec::new();

        if input.name.trim().is_empty() {
            warnings.push(IngestWarning::MissingName);
        }

        let quantity = coerce_quantity(&input.quantity, &mut warnings);

        if !input.unit.is_empty() && input.unit.parse::<Unit>().is_err() {
            warnings.push(IngestWarning::UnknownUnit {
                raw: input.unit.clone(),
            });
        }
        if !input.grade.is_empty() && input.grade.parse::<Grade>().is_err() {
            warnings.push(IngestWarning::UnknownGrade {
                raw: input.grade.clone(),
            });
        }
        if !input.package_control.is_empty()
            && input.package_control.parse::<PackageControl>().is_err()
        {
            warnings.push(IngestWarning::UnknownPackageControl {
                raw: input.package_control.clone(),
            });
        }

        let manufactured = check_date("manufactureDate", &input.manufacture_date, &mut warnings);
        let received = check_date("receiptDate", &input.receipt_date, &mut warnings);
        let expires = check_date("expiryDate", &input.expiry_date, &mut warnings);

        if let (Some(made), Some(exp)) = (manufactured, expires) {
            if exp < made {
                warnings.push(IngestWarning::ExpiryBeforeManufacture {
                    manufacture: input.manufacture_date.clone(),
                    expiry: input.expiry_date.clone(),
                });
            }
        }
        if let (Some(made), Some(rec)) = (manufactured, received) {
            if rec < made {
                warnings.push(IngestWarning::ReceiptBeforeManufacture {
                    manufacture: input.manufacture_date.clone(),
                    receipt: input.receipt_date.clone(),
                });
            }
        }

        for warning in &warnings {
            warn!(id, %warning, "reagent input accepted with warning");
        }

        IngestOutcome {
            record: ReagentRecord {
                id,
                name: input.name.clone(),
                quantity,
                unit: input.unit.clone(),
                grade: input.grade.clone(),
                manufacture_date: input.manufacture_date.clone(),
                receipt_date: input.receipt_date.clone(),
                expiry_date: input.expiry_date.clone(),
                manufacturer: input.manufacturer.clone(),
                standard: input.standard.clone(),
                methodology: input.methodology.clone(),
                storage_location: input.storage_location.clone(),
                notes: input.notes.clone(),
                package_control: input.package_control.clone(),
            },
            warnings,
        }
    }

    pub fn ingest_strict(
        &self,
        id: u64,
        input: &ReagentInput,
    ) -> Result<ReagentRecord, ServiceError> {
        input.validate()?;
        self.ingest(id, input).into_clean()
    }

    /// Assigns the store's next id, ingests leniently and appends.
    pub fn ingest_into(&self, store: &mut ReagentStore, input: &ReagentInput) -> IngestOutcome {
        let outcome = self.ingest(store.next_id(), input);
        store.add(outcome.record.clone());
        outcome
    }

    /// Strict counterpart of [`ingest_into`](Self::ingest_into). A rejected payload
    /// leaves the store untouched.
    pub fn ingest_into_strict(
        &self,
        store: &mut ReagentStore,
        input: &ReagentInput,
    ) -> Result<ReagentRecord, ServiceError> {
        let record = self.ingest_strict(store.next_id(), input)?;
        store.try_add(record.clone())?;
        Ok(record)
    }
}

impl IngestOutcome {
    /// The record, or a validation error listing every warning.
    pub fn into_clean(self) -> Result<ReagentRecord, ServiceError> {
        if self.is_clean() {
            return Ok(self.record);
        }
        let messages: Vec<String> = self.warnings.iter().map(|w| w.to_string()).collect();
        Err(ServiceError::ValidationError(messages.join("; ")))
    }
}

/// Reads a JSON array of form payloads from a file.
pub fn read_payloads(path: &Path) -> Result<Vec<ReagentInput>, ServiceError> {
    let raw = fs::read_to_string(path)?;
    let payloads = serde_json::from_str(&raw)?;
    Ok(payloads)
}

fn check_date(
    field: &'static str,
    raw: &str,
    warnings: &mut Vec<IngestWarning>,
) -> Option<chrono::NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warnings.push(IngestWarning::UnparsableDate {
            field,
            raw: raw.to_string(),
        });
    }
    parsed
}

/// Integer prefix of `raw`: optional leading whitespace and sign, then digits.
/// `"12abc"` reads as 12, `"abc"` and `""` read as nothing.
pub fn parse_leading_int(raw: &str) -> Option<(i64, bool)> {
    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    let complete = rest[end..].trim().is_empty();
    Some((if negative { -value } else { value }, complete))
}

fn coerce_quantity(raw: &str, warnings: &mut Vec<IngestWarning>) -> u32 {
    let digits_only = {
        let s = raw.trim_start();
        let s = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
        !s.is_empty() && s.chars().take_while(|c| c.is_ascii_digit()).count() > 0
    };

    match parse_leading_int(raw) {
        None if digits_only => {
            warnings.push(IngestWarning::QuantityOutOfRange {
                raw: raw.to_string(),
            });
            0
        }
        None => {
            warnings.push(IngestWarning::QuantityNotNumeric {
                raw: raw.to_string(),
            });
            0
        }
        Some((value, complete)) => {
            if !complete {
                warnings.push(IngestWarning::QuantityTrailingInput {
                    raw: raw.to_string(),
                });
            }
            if value < 0 {
                warnings.push(IngestWarning::QuantityNegative {
                    raw: raw.to_string(),
                });
                return 0;
            }
            match u32::try_from(value) {
                Ok(quantity) => quantity,
                Err(_) => {
                    warnings.push(IngestWarning::QuantityOutOfRange {
                        raw: raw.to_string(),
                    });
                    0
                }
            }
        }
    }
}
