use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Date format used by every date column (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One inventory entry for a chemical substance.
///
/// Enumerated columns (`unit`, `grade`, `package_control`) are stored exactly as
/// they were entered. Use the typed accessors to interpret them; a value outside
/// the known set is kept and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentRecord {
    pub id: u64,
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    #[serde(alias = "frequency")]
    pub grade: String,
    pub manufacture_date: String,
    pub receipt_date: String,
    pub expiry_date: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub standard: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub storage_location: String,
    #[serde(default)]
    pub notes: String,
    pub package_control: String,
}

impl ReagentRecord {
    pub fn unit_kind(&self) -> Option<Unit> {
        self.unit.parse().ok()
    }

    pub fn grade_kind(&self) -> Option<Grade> {
        self.grade.parse().ok()
    }

    pub fn package_control_kind(&self) -> Option<PackageControl> {
        self.package_control.parse().ok()
    }

    pub fn expiry(&self) -> Option<NaiveDate> {
        parse_date(&self.expiry_date)
    }

    pub fn manufactured_on(&self) -> Option<NaiveDate> {
        parse_date(&self.manufacture_date)
    }

    pub fn received_on(&self) -> Option<NaiveDate> {
        parse_date(&self.receipt_date)
    }

    /// Case-insensitive substring match on name or manufacturer.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.manufacturer.to_lowercase().contains(needle)
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(to_string = "liter", serialize = "литр")]
    Liter,
    #[strum(to_string = "kg", serialize = "кг")]
    Kg,
    #[strum(to_string = "g", serialize = "г")]
    G,
    #[strum(to_string = "ml", serialize = "мл")]
    Ml,
    #[strum(to_string = "piece", serialize = "шт")]
    Piece,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Liter => "литр",
            Self::Kg => "кг",
            Self::G => "г",
            Self::Ml => "мл",
            Self::Piece => "шт",
        }
    }
}

/// Chemical purity classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Grade {
    #[serde(rename = "XCh")]
    #[strum(to_string = "XCh", serialize = "Х.Ч")]
    ChemicallyPure,
    #[serde(rename = "ChDA")]
    #[strum(to_string = "ChDA", serialize = "Ч.Д.А")]
    PureForAnalysis,
    #[serde(rename = "Ch")]
    #[strum(to_string = "Ch", serialize = "Ч")]
    Pure,
    #[serde(rename = "TCh")]
    #[strum(to_string = "TCh", serialize = "Т.Ч")]
    TechnicallyPure,
}

impl Grade {
    /// Short badge label shown in the classification column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChemicallyPure => "Х.Ч",
            Self::PureForAnalysis => "Ч.Д.А",
            Self::Pure => "Ч",
            Self::TechnicallyPure => "Т.Ч",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ChemicallyPure => "химически чистый",
            Self::PureForAnalysis => "чистый для анализа",
            Self::Pure => "чистый",
            Self::TechnicallyPure => "технически чистый",
        }
    }
}

/// Inspection status of the container on receipt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum PackageControl {
    #[strum(to_string = "intact", serialize = "Не нарушена")]
    Intact,
    #[strum(to_string = "breached", serialize = "Нарушена")]
    Breached,
    #[strum(to_string = "needs-inspection", serialize = "Требует проверки")]
    NeedsInspection,
}

impl PackageControl {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intact => "Не нарушена",
            Self::Breached => "Нарушена",
            Self::NeedsInspection => "Требует проверки",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn record(name: &str, manufacturer: &str) -> ReagentRecord {
        ReagentRecord {
            id: 1,
            name: name.to_string(),
            quantity: 1,
            unit: "литр".to_string(),
            grade: "Х.Ч".to_string(),
            manufacture_date: "2021-03-05".to_string(),
            receipt_date: "2021-04-01".to_string(),
            expiry_date: "2021-09-05".to_string(),
            manufacturer: manufacturer.to_string(),
            standard: String::new(),
            methodology: String::new(),
            storage_location: String::new(),
            notes: String::new(),
            package_control: "Не нарушена".to_string(),
        }
    }

    #[test]
    fn enums_parse_from_code_and_label() {
        for unit in Unit::iter() {
            assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
            assert_eq!(unit.label().parse::<Unit>().unwrap(), unit);
        }
        for grade in Grade::iter() {
            assert_eq!(grade.as_ref().parse::<Grade>().unwrap(), grade);
            assert_eq!(grade.label().parse::<Grade>().unwrap(), grade);
        }
        for control in PackageControl::iter() {
            assert_eq!(control.to_string().parse::<PackageControl>().unwrap(), control);
            assert_eq!(control.label().parse::<PackageControl>().unwrap(), control);
        }
    }

    #[test]
    fn unknown_enum_values_are_kept_verbatim() {
        let mut r = record("Ацетон", "");
        r.unit = "bucket".to_string();
        r.grade = "food grade".to_string();
        assert_eq!(r.unit_kind(), None);
        assert_eq!(r.grade_kind(), None);
        assert_eq!(r.unit, "bucket");
        assert_eq!(r.package_control_kind(), Some(PackageControl::Intact));
    }

    #[test]
    fn typed_dates() {
        let r = record("HNO3", "");
        assert_eq!(r.expiry(), NaiveDate::from_ymd_opt(2021, 9, 5));
        assert_eq!(r.manufactured_on(), NaiveDate::from_ymd_opt(2021, 3, 5));

        let mut broken = r.clone();
        broken.expiry_date = "05.09.2021".to_string();
        assert_eq!(broken.expiry(), None);
    }

    #[test]
    fn matches_name_or_manufacturer() {
        let r = record("Азотная кислота HNO3", "Сигма Тек");
        assert!(r.matches_lowercase("hno3"));
        assert!(r.matches_lowercase("азотная"));
        assert!(r.matches_lowercase("сигма"));
        assert!(r.matches_lowercase(""));
        assert!(!r.matches_lowercase("h2so4"));
    }

    #[test]
    fn deserializes_legacy_frequency_key() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Серная кислота H2SO4",
            "quantity": 2,
            "unit": "литр",
            "frequency": "Ч.Д.А",
            "manufactureDate": "2025-01-01",
            "receiptDate": "2025-01-01",
            "expiryDate": "2025-07-01",
            "packageControl": "Нарушена"
        });
        let r: ReagentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(r.grade_kind(), Some(Grade::PureForAnalysis));
        assert_eq!(r.package_control_kind(), Some(PackageControl::Breached));
        assert!(r.notes.is_empty());
    }
}
