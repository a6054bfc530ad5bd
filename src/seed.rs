//! Demonstration records a fresh session starts with.

use crate::{
    models::ReagentRecord,
    services::reagent_store::{IdPolicy, ReagentStore},
};

fn demo(id: u64, name: &str, dates: (&str, &str, &str), notes: &str) -> ReagentRecord {
    let (manufacture_date, receipt_date, expiry_date) = dates;
    ReagentRecord {
        id,
        name: name.to_string(),
        quantity: 1,
        unit: "литр".to_string(),
        grade: "Х.Ч".to_string(),
        manufacture_date: manufacture_date.to_string(),
        receipt_date: receipt_date.to_string(),
        expiry_date: expiry_date.to_string(),
        manufacturer: String::new(),
        standard: String::new(),
        methodology: String::new(),
        storage_location: String::new(),
        notes: notes.to_string(),
        package_control: "Не нарушена".to_string(),
    }
}

pub fn demo_records() -> Vec<ReagentRecord> {
    vec![
        demo(
            1,
            "Азотная кислота HNO3",
            ("2021-03-05", "2021-04-01", "2021-09-05"),
            "1 литр",
        ),
        demo(
            2,
            "Серная кислота H2SO4",
            ("2025-01-01", "2025-01-01", "2025-07-01"),
            "литр",
        ),
        demo(
            3,
            "Серная кислота H2SO4",
            ("2025-01-01", "2025-01-01", "2025-07-01"),
            "литр",
        ),
    ]
}

pub fn seeded_store(policy: IdPolicy) -> ReagentStore {
    let mut store = ReagentStore::with_policy(policy);
    store.extend(demo_records());
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_continue_from_three() {
        let store = seeded_store(IdPolicy::CountPlusOne);
        assert_eq!(store.len(), 3);
        assert_eq!(store.next_id(), 4);
        assert_eq!(seeded_store(IdPolicy::Monotonic).next_id(), 4);
    }

    #[test]
    fn demo_records_are_well_formed() {
        for record in demo_records() {
            assert!(record.expiry().is_some());
            assert!(record.unit_kind().is_some());
            assert!(record.grade_kind().is_some());
            assert!(record.package_control_kind().is_some());
        }
    }
}
