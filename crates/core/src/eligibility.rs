//! Collector eligibility and first-fit assignment.

use chrono::NaiveDate;

use crate::entity::{Appointment, Collector};
use crate::error::{DeskError, Result};

/// Whether `collector` is already booked on exactly `date`.
pub fn is_booked_on(collector: &Collector, date: NaiveDate, appointments: &[Appointment]) -> bool {
    appointments
        .iter()
        .any(|a| a.collector_id == collector.id && a.date == date)
}

/// A collector qualifies when `seniority >= 2 * fear_factor` and they have no
/// appointment on `date` yet.
pub fn is_collector_eligible(
    collector: &Collector,
    date: NaiveDate,
    fear_factor: f64,
    appointments: &[Appointment],
) -> bool {
    f64::from(collector.seniority) >= 2.0 * fear_factor && !is_booked_on(collector, date, appointments)
}

/// First-fit selection: the first eligible collector in iteration order wins.
/// No ranking or load balancing is attempted.
pub fn select_collector<'a>(
    collectors: &'a [Collector],
    date: NaiveDate,
    fear_factor: f64,
    appointments: &[Appointment],
) -> Result<&'a Collector> {
    collectors
        .iter()
        .find(|c| is_collector_eligible(c, date, fear_factor, appointments))
        .ok_or(DeskError::NoEligibleCollector { date })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(id: &str, seniority: u8) -> Collector {
        Collector {
            id: id.to_string(),
            name: format!("Collector {id}"),
            seniority,
        }
    }

    fn appointment(collector_id: &str, date: NaiveDate) -> Appointment {
        Appointment {
            id: format!("ap-{collector_id}"),
            date,
            student_id: "s1".to_string(),
            collector_id: collector_id.to_string(),
            debt_id: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn senior_enough_and_free_is_eligible() {
        assert!(is_collector_eligible(&collector("c1", 4), day("2025-01-01"), 2.0, &[]));
    }

    #[test]
    fn seniority_below_double_fear_is_ineligible() {
        assert!(!is_collector_eligible(&collector("c1", 2), day("2025-01-01"), 2.0, &[]));
    }

    #[test]
    fn fractional_fear_factor_compares_exactly() {
        assert!(is_collector_eligible(&collector("c1", 3), day("2025-01-01"), 1.5, &[]));
        assert!(!is_collector_eligible(&collector("c1", 3), day("2025-01-01"), 1.6, &[]));
    }

    #[test]
    fn booked_collector_is_never_eligible_that_day() {
        let date = day("2025-03-03");
        let booked = vec![appointment("c5", date)];
        assert!(!is_collector_eligible(&collector("c5", 10), date, 0.0, &booked));
        assert!(is_collector_eligible(&collector("c5", 10), day("2025-03-04"), 0.0, &booked));
    }

    #[test]
    fn other_collectors_bookings_do_not_matter() {
        let date = day("2025-03-03");
        let booked = vec![appointment("c3", date)];
        assert!(is_collector_eligible(&collector("c4", 4), date, 2.0, &booked));
    }

    #[test]
    fn selection_is_first_fit() {
        let collectors = vec![collector("c1", 2), collector("c5", 10), collector("c3", 4)];
        let picked = select_collector(&collectors, day("2025-01-01"), 2.0, &[]).unwrap();
        assert_eq!(picked.id, "c5");
    }

    #[test]
    fn selection_skips_booked_collectors() {
        let date = day("2025-01-01");
        let collectors = vec![collector("c3", 4), collector("c4", 4)];
        let booked = vec![appointment("c3", date)];
        let picked = select_collector(&collectors, date, 2.0, &booked).unwrap();
        assert_eq!(picked.id, "c4");
    }

    #[test]
    fn no_candidate_reports_no_eligible_collector() {
        let date = day("2025-01-01");
        let collectors = vec![collector("c1", 2)];
        let err = select_collector(&collectors, date, 5.0, &[]).unwrap_err();
        assert_eq!(err, DeskError::NoEligibleCollector { date });
    }
}
