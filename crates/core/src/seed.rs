//! Sample records the service starts with when `SEED_SAMPLE_DATA` is on.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::entity::{Appointment, Collector, Debt, Student};
use crate::interest::monthly_percent;

pub fn sample_collectors() -> Vec<Collector> {
    [
        ("c1", "Sam Kushi", 2),
        ("c2", "Emi Bykon", 2),
        ("c3", "Andrew Macks", 4),
        ("c4", "Alan Dok", 4),
        ("c5", "Peter Sdoa", 10),
        ("c6", "Michael Kon", 10),
    ]
    .into_iter()
    .map(|(id, name, seniority)| Collector {
        id: id.to_string(),
        name: name.to_string(),
        seniority,
    })
    .collect()
}

pub fn sample_students() -> Vec<Student> {
    vec![
        Student {
            id: "s1".to_string(),
            name: "John".to_string(),
            age: 18,
            sex: false,
            fear_factor: 2.0,
        },
        Student {
            id: "s2".to_string(),
            name: "Alice".to_string(),
            age: 22,
            sex: true,
            fear_factor: 1.0,
        },
    ]
}

/// Debts for the sample students. Monthly percent follows the rate rules.
pub fn sample_debts() -> Vec<Debt> {
    let students = sample_students();
    [("debt1", 0usize, 1000.0, 1040.67, (2024, 4, 20)), ("debt2", 1, 2000.0, 2081.21, (2024, 4, 22))]
        .into_iter()
        .filter_map(|(id, owner, amount, total, (y, m, d))| {
            let student = students.get(owner)?;
            let creation_date = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()?;
            Some(Debt {
                id: id.to_string(),
                student_id: student.id.clone(),
                amount,
                total_amount: total,
                monthly_percent: monthly_percent(student.age, student.sex),
                creation_date,
                last_update_date: None,
            })
        })
        .collect()
}

pub fn sample_appointments() -> Vec<Appointment> {
    NaiveDate::from_ymd_opt(2025, 3, 3)
        .map(|date| Appointment {
            id: "ap1".to_string(),
            date,
            student_id: "s1".to_string(),
            collector_id: "c3".to_string(),
            debt_id: Some("debt1".to_string()),
        })
        .into_iter()
        .collect()
}
