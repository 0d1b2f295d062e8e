//! Dossier number generation.
//!
//! Format: `ANA-<YYYYMMDD>-<NNN>`, where `NNN` is the count of cases created
//! on that day plus one. Generation and the save that commits the number
//! happen under the same `&Store` borrow, but nothing stops two processes
//! from handing out the same number.

use chrono::NaiveDate;

use crate::models::CaseRecord;

pub const DOSSIER_PREFIX: &str = "ANA";

pub fn format_dossier_number(day: NaiveDate, counter: u32) -> String {
    format!("{}-{}-{:03}", DOSSIER_PREFIX, day.format("%Y%m%d"), counter)
}

/// Next dossier number for a case created on `today`.
///
/// If the day-count based number is already taken (clock moved backwards,
/// hand-edited table) the counter advances until it is free.
pub fn next_dossier_number(cases: &[CaseRecord], today: NaiveDate) -> String {
    let same_day = cases
        .iter()
        .filter(|case| case.created_at.date() == today)
        .count() as u32;

    let mut counter = same_day + 1;
    loop {
        let candidate = format_dossier_number(today, counter);
        if !cases.iter().any(|case| case.dossier_number == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseStatus;
    use std::collections::HashSet;

    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_case(id: u32, dossier: &str, created: NaiveDate) -> CaseRecord {
        let ts = created.and_hms_opt(11, 0, 0).unwrap();
        CaseRecord {
            id,
            dossier_number: dossier.into(),
            last_name: "N".into(),
            first_name: "P".into(),
            phone: "1".into(),
            collection_date: created,
            reception_date: created,
            diagnostic: "d".into(),
            status: CaseStatus::Pending,
            picked_up: false,
            comment: String::new(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_first_number_of_the_day() {
        assert_eq!(next_dossier_number(&[], day(2024, 1, 1)), "ANA-20240101-001");
    }

    #[test]
    fn test_counts_only_same_day() {
        let cases = vec![
            make_case(1, "ANA-20231231-001", day(2023, 12, 31)),
            make_case(2, "ANA-20240101-001", day(2024, 1, 1)),
            make_case(3, "ANA-20240101-002", day(2024, 1, 1)),
        ];
        assert_eq!(next_dossier_number(&cases, day(2024, 1, 1)), "ANA-20240101-003");
        assert_eq!(next_dossier_number(&cases, day(2024, 1, 2)), "ANA-20240102-001");
    }

    #[test]
    fn test_skips_taken_number() {
        // Created yesterday but numbered for today: the day count says 001.
        let cases = vec![make_case(1, "ANA-20240101-001", day(2023, 12, 31))];
        assert_eq!(next_dossier_number(&cases, day(2024, 1, 1)), "ANA-20240101-002");
    }

    #[test]
    fn test_counter_widens_past_999() {
        assert_eq!(format_dossier_number(day(2024, 1, 1), 1000), "ANA-20240101-1000");
    }

    proptest! {
        #[test]
        fn prop_sequential_numbers_are_distinct(n in 1usize..60) {
            let today = day(2024, 5, 17);
            let mut cases = Vec::new();
            for i in 0..n {
                let number = next_dossier_number(&cases, today);
                prop_assert_eq!(&number, &format_dossier_number(today, i as u32 + 1));
                cases.push(make_case(i as u32 + 1, &number, today));
            }
            let numbers: HashSet<_> = cases.iter().map(|c| c.dossier_number.as_str()).collect();
            prop_assert_eq!(numbers.len(), n);
        }
    }
}
