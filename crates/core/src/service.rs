//! [`DeskService`]: students, debts, collectors and appointments over injected
//! repositories and an injected clock.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::eligibility::select_collector;
use crate::entity::{
    generate_id, Appointment, AppointmentInput, Collector, CollectorInput, Debt, DebtInput,
    NumberInput, Student, StudentInput, MAX_SENIORITY, MIN_SENIORITY,
};
use crate::error::{DeskError, Result};
use crate::interest::{
    accrue_interest, days_between_ceil, monthly_percent, periodic_step, AccrualMode,
    PeriodicOutcome,
};
use crate::repository::{InMemoryRepository, Repository};
use crate::seed;

/// The four collections the service works on.
#[derive(Clone)]
pub struct Repositories {
    pub students: Arc<dyn Repository<Student>>,
    pub debts: Arc<dyn Repository<Debt>>,
    pub collectors: Arc<dyn Repository<Collector>>,
    pub appointments: Arc<dyn Repository<Appointment>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            students: Arc::new(InMemoryRepository::<Student>::new()),
            debts: Arc::new(InMemoryRepository::<Debt>::new()),
            collectors: Arc::new(InMemoryRepository::<Collector>::new()),
            appointments: Arc::new(InMemoryRepository::<Appointment>::new()),
        }
    }
}

/// Counts from one periodic accrual pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccrualReport {
    pub accrued: usize,
    pub skipped: usize,
}

pub struct DeskService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    /// Serializes operations that read one collection and write another.
    gate: Mutex<()>,
}

impl DeskService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            clock,
            gate: Mutex::new(()),
        }
    }

    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(Repositories::in_memory(), clock)
    }

    /// Load the bundled sample collectors, students, debts and appointment.
    /// Records whose id already exists are left alone.
    pub fn seed_sample_data(&self) {
        let mut inserted = 0usize;
        for record in seed::sample_collectors() {
            inserted += self.repos.collectors.insert(record).map(|_| 1).unwrap_or(0);
        }
        for record in seed::sample_students() {
            inserted += self.repos.students.insert(record).map(|_| 1).unwrap_or(0);
        }
        for record in seed::sample_debts() {
            inserted += self.repos.debts.insert(record).map(|_| 1).unwrap_or(0);
        }
        for record in seed::sample_appointments() {
            inserted += self.repos.appointments.insert(record).map(|_| 1).unwrap_or(0);
        }
        info!(records = inserted, "Seeded sample data");
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Students ──────────────────────────────────────────────

    pub fn list_students(&self) -> Vec<Student> {
        self.repos.students.list()
    }

    pub fn get_student(&self, id: &str) -> Result<Student> {
        self.repos
            .students
            .get(id)
            .ok_or_else(|| DeskError::StudentNotFound(id.to_string()))
    }

    pub fn create_student(&self, input: &StudentInput) -> Result<Student> {
        let student = build_student(generate_id(), input)?;
        let student = self.repos.students.insert(student)?;
        info!(id = %student.id, age = student.age, "Created student");
        Ok(student)
    }

    /// Full replace. Existing debts keep the monthly percent they were created with.
    pub fn replace_student(&self, id: &str, input: &StudentInput) -> Result<Student> {
        let student = build_student(id.to_string(), input)?;
        let student = self
            .repos
            .students
            .update(student)
            .ok_or_else(|| DeskError::StudentNotFound(id.to_string()))?;
        info!(id = %student.id, "Replaced student");
        Ok(student)
    }

    pub fn delete_student(&self, id: &str) -> Result<Student> {
        let student = self
            .repos
            .students
            .delete(id)
            .ok_or_else(|| DeskError::StudentNotFound(id.to_string()))?;
        info!(id = %student.id, "Deleted student");
        Ok(student)
    }

    // ── Collectors ────────────────────────────────────────────

    pub fn list_collectors(&self) -> Vec<Collector> {
        self.repos.collectors.list()
    }

    pub fn get_collector(&self, id: &str) -> Result<Collector> {
        self.repos
            .collectors
            .get(id)
            .ok_or_else(|| DeskError::CollectorNotFound(id.to_string()))
    }

    pub fn create_collector(&self, input: &CollectorInput) -> Result<Collector> {
        let collector = build_collector(generate_id(), input)?;
        let collector = self.repos.collectors.insert(collector)?;
        info!(id = %collector.id, seniority = collector.seniority, "Created collector");
        Ok(collector)
    }

    pub fn replace_collector(&self, id: &str, input: &CollectorInput) -> Result<Collector> {
        let collector = build_collector(id.to_string(), input)?;
        let collector = self
            .repos
            .collectors
            .update(collector)
            .ok_or_else(|| DeskError::CollectorNotFound(id.to_string()))?;
        info!(id = %collector.id, "Replaced collector");
        Ok(collector)
    }

    pub fn delete_collector(&self, id: &str) -> Result<Collector> {
        let collector = self
            .repos
            .collectors
            .delete(id)
            .ok_or_else(|| DeskError::CollectorNotFound(id.to_string()))?;
        info!(id = %collector.id, "Deleted collector");
        Ok(collector)
    }

    // ── Debts ─────────────────────────────────────────────────

    pub fn list_debts(&self) -> Vec<Debt> {
        self.repos.debts.list()
    }

    pub fn get_debt(&self, id: &str) -> Result<Debt> {
        self.repos
            .debts
            .get(id)
            .ok_or_else(|| DeskError::DebtNotFound(id.to_string()))
    }

    /// Create a debt for an existing student.
    ///
    /// The monthly percent is fixed here from the student's age and sex. When
    /// `last_update_date` lies in the future, interest is pre-accrued up to it.
    pub fn create_debt(&self, input: &DebtInput) -> Result<Debt> {
        let student = self.get_student(&input.student_id)?;
        let amount = input
            .amount
            .as_ref()
            .and_then(NumberInput::as_f64)
            .filter(|a| *a >= 0.0)
            .ok_or_else(|| DeskError::Validation("amount must be a non-negative number".into()))?;
        let target = match input.last_update_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_instant(raw)?),
            _ => None,
        };

        let now = self.now();
        let percent = monthly_percent(student.age, student.sex);
        let days = target
            .filter(|t| *t > now)
            .and_then(|t| days_between_ceil(now, t))
            .unwrap_or(0);
        let total_amount = accrue_interest(amount, percent, days, AccrualMode::Creation);
        if !total_amount.is_finite() {
            warn!(student_id = %student.id, pre_accrued_days = days, "Pre-accrual overflowed");
            return Err(DeskError::Validation("totalAmount overflow".into()));
        }

        let debt = self.repos.debts.insert(Debt {
            id: generate_id(),
            student_id: student.id,
            amount,
            total_amount,
            monthly_percent: percent,
            creation_date: now,
            last_update_date: Some(now),
        })?;
        info!(
            id = %debt.id,
            student_id = %debt.student_id,
            monthly_percent = debt.monthly_percent,
            pre_accrued_days = days,
            "Created debt"
        );
        Ok(debt)
    }

    /// Periodic accrual over every debt. Debts already accrued today are left
    /// untouched, so calling this twice on the same day is a no-op.
    pub fn accrue_debts(&self) -> (Vec<Debt>, AccrualReport) {
        let _gate = self.lock_gate();
        let now = self.now();
        let mut report = AccrualReport::default();

        for mut debt in self.repos.debts.list() {
            match periodic_step(debt.total_amount, debt.monthly_percent, debt.accrued_through(), now) {
                PeriodicOutcome::Accrued { days, total_amount } if !total_amount.is_finite() => {
                    warn!(id = %debt.id, days, "Accrual overflowed, keeping previous total");
                    report.skipped += 1;
                }
                PeriodicOutcome::Accrued { days, total_amount } => {
                    debug!(id = %debt.id, days, total_amount, "Accrued debt");
                    debt.total_amount = total_amount;
                    debt.last_update_date = Some(now);
                    if self.repos.debts.update(debt).is_some() {
                        report.accrued += 1;
                    }
                }
                PeriodicOutcome::SameDay => report.skipped += 1,
                PeriodicOutcome::Ahead => {
                    warn!(id = %debt.id, "Debt last accrued in the future, skipping");
                    report.skipped += 1;
                }
            }
        }

        (self.repos.debts.list(), report)
    }

    pub fn delete_debt(&self, id: &str) -> Result<Debt> {
        let debt = self
            .repos
            .debts
            .delete(id)
            .ok_or_else(|| DeskError::DebtNotFound(id.to_string()))?;
        info!(id = %debt.id, "Deleted debt");
        Ok(debt)
    }

    // ── Appointments ──────────────────────────────────────────

    pub fn list_appointments(&self) -> Vec<Appointment> {
        self.repos.appointments.list()
    }

    pub fn get_appointment(&self, id: &str) -> Result<Appointment> {
        self.repos
            .appointments
            .get(id)
            .ok_or_else(|| DeskError::AppointmentNotFound(id.to_string()))
    }

    /// Book the first eligible collector for a student on a date.
    pub fn create_appointment(&self, input: &AppointmentInput) -> Result<Appointment> {
        let date = parse_calendar_date(&input.date)?;
        if date < self.now().date_naive() {
            return Err(DeskError::InvalidDate(
                "Appointment date cannot be in the past".into(),
            ));
        }
        if input.student_id.trim().is_empty() {
            return Err(DeskError::Validation("studentId is required".into()));
        }
        let student = self.get_student(&input.student_id)?;
        let fear_factor = match &input.student_fear_factor {
            Some(raw) => parse_fear_factor(raw)?,
            None => student.fear_factor,
        };

        let _gate = self.lock_gate();
        let collectors = self.repos.collectors.list();
        let booked = self.repos.appointments.filter(&|a: &Appointment| a.date == date);
        let collector = select_collector(&collectors, date, fear_factor, &booked).map_err(|e| {
            warn!(%date, fear_factor, student_id = %student.id, "No eligible collector");
            e
        })?;
        let debt_id = self
            .repos
            .debts
            .find(&|d: &Debt| d.student_id == student.id)
            .map(|d| d.id);

        let appointment = self.repos.appointments.insert(Appointment {
            id: generate_id(),
            date,
            student_id: student.id.clone(),
            collector_id: collector.id.clone(),
            debt_id,
        })?;
        info!(
            id = %appointment.id,
            %date,
            collector_id = %appointment.collector_id,
            student_id = %appointment.student_id,
            "Booked appointment"
        );
        Ok(appointment)
    }

    pub fn delete_appointment(&self, id: &str) -> Result<Appointment> {
        let appointment = self
            .repos
            .appointments
            .delete(id)
            .ok_or_else(|| DeskError::AppointmentNotFound(id.to_string()))?;
        info!(id = %appointment.id, "Deleted appointment");
        Ok(appointment)
    }
}

// ── Input validation ──────────────────────────────────────────

fn build_student(id: String, input: &StudentInput) -> Result<Student> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DeskError::Validation("name is required".into()));
    }
    let age = input
        .age
        .as_ref()
        .and_then(NumberInput::as_integer)
        .and_then(|a| u32::try_from(a).ok())
        .ok_or_else(|| DeskError::Validation("Invalid age provided".into()))?;
    let fear_factor = input
        .fear_factor
        .as_ref()
        .ok_or_else(|| DeskError::Validation("Invalid fearFactor provided".into()))
        .and_then(parse_fear_factor)?;
    Ok(Student {
        id,
        name: name.to_string(),
        age,
        sex: input.sex.as_ref().map(|s| s.is_female()).unwrap_or(false),
        fear_factor,
    })
}

fn build_collector(id: String, input: &CollectorInput) -> Result<Collector> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DeskError::Validation("name is required".into()));
    }
    let seniority = input
        .seniority
        .as_ref()
        .and_then(NumberInput::as_integer)
        .filter(|s| (i64::from(MIN_SENIORITY)..=i64::from(MAX_SENIORITY)).contains(s))
        .and_then(|s| u8::try_from(s).ok())
        .ok_or_else(|| {
            DeskError::Validation(format!(
                "seniority of collector must be an integer between {MIN_SENIORITY} and {MAX_SENIORITY}"
            ))
        })?;
    Ok(Collector {
        id,
        name: name.to_string(),
        seniority,
    })
}

fn parse_fear_factor(raw: &NumberInput) -> Result<f64> {
    raw.as_f64()
        .filter(|f| *f >= 0.0)
        .ok_or_else(|| DeskError::Validation("Invalid fearFactor provided".into()))
}

/// Strict `YYYY-MM-DD`; `2025-1-1` is rejected.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|d| d.format("%Y-%m-%d").to_string() == raw)
        .ok_or_else(|| DeskError::InvalidDate("Date must be in YYYY-MM-DD format".into()))
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    parse_calendar_date(raw)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DeskError::InvalidDate(format!(
                "'{raw}' is neither an RFC 3339 timestamp nor a YYYY-MM-DD date"
            ))
        })
}
