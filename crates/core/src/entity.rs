use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type StudentId = String;
pub type DebtId = String;
pub type CollectorId = String;
pub type AppointmentId = String;

/// Lowest and highest seniority a collector may carry.
pub const MIN_SENIORITY: u8 = 2;
pub const MAX_SENIORITY: u8 = 10;

/// Generate a short record identifier (8 lowercase hex chars from a v4 UUID).
pub fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

// ── Records ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    /// `true` means female.
    pub sex: bool,
    pub fear_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: DebtId,
    pub student_id: StudentId,
    /// Principal.
    pub amount: f64,
    /// Principal plus accrued interest, full precision.
    pub total_amount: f64,
    /// Fixed at creation from the student's age and sex.
    pub monthly_percent: f64,
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub last_update_date: Option<DateTime<Utc>>,
}

impl Debt {
    /// Reference point for the next accrual pass.
    pub fn accrued_through(&self) -> DateTime<Utc> {
        self.last_update_date.unwrap_or(self.creation_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collector {
    pub id: CollectorId,
    pub name: String,
    pub seniority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub student_id: StudentId,
    pub collector_id: CollectorId,
    pub debt_id: Option<DebtId>,
}

// ── Request payloads ──────────────────────────────────────────

/// A number that may arrive as JSON number or numeric string (`"17"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberInput::Number(n) => Some(*n).filter(|n| n.is_finite()),
            NumberInput::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Whole-number view; fractional values are rejected.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() <= i64::MAX as f64)
            .map(|n| n as i64)
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

/// Sex as a boolean flag, a `0`/`1` number, or a label such as `"female"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SexInput {
    Flag(bool),
    Number(f64),
    Label(String),
}

impl SexInput {
    pub fn is_female(&self) -> bool {
        match self {
            SexInput::Flag(flag) => *flag,
            SexInput::Number(n) => *n != 0.0,
            SexInput::Label(label) => label.trim().eq_ignore_ascii_case("female"),
        }
    }
}

/// `null` reads as an empty string, which validation then rejects.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    pub age: Option<NumberInput>,
    pub sex: Option<SexInput>,
    pub fear_factor: Option<NumberInput>,
}

impl StudentInput {
    pub fn new(name: &str, age: u32, is_female: bool, fear_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            age: Some(NumberInput::Number(age as f64)),
            sex: Some(SexInput::Flag(is_female)),
            fear_factor: Some(NumberInput::Number(fear_factor)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub student_id: StudentId,
    pub amount: Option<NumberInput>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`. A future value pre-accrues interest.
    pub last_update_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectorInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    pub seniority: Option<NumberInput>,
}

impl CollectorInput {
    pub fn new(name: &str, seniority: u8) -> Self {
        Self {
            name: name.to_string(),
            seniority: Some(NumberInput::Number(seniority as f64)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentInput {
    /// Strict `YYYY-MM-DD`.
    #[serde(deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub student_id: StudentId,
    /// Overrides the student's own fear factor when present.
    pub student_fear_factor: Option<NumberInput>,
}
