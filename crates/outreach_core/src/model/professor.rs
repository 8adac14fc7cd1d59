//! Professor record domain model.
//!
//! # Responsibility
//! - Define the fixed-shape record tracked for each contacted professor.
//! - Own email normalization against the configured institution domain.
//! - Parse and render the two editable enum fields.
//!
//! # Invariants
//! - A normalized email is lowercase, trimmed, and ends with exactly one
//!   `@<domain>` suffix.
//! - `name`, `email` and `department` never change after creation.
//! - New records start as `ReplyStatus::Applied` / `Opportunity::NotHas`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Institution domain used when no other is configured.
pub const DEFAULT_EMAIL_DOMAIN: &str = "uh.edu";

/// Column labels, in order, for the persisted CSV and the XLSX export.
pub const COLUMN_LABELS: [&str; 5] = ["Name", "Email", "Department", "Status", "Opportunity"];

static LOCAL_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+$").expect("valid local part regex"));
static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+$")
        .expect("valid domain regex")
});

/// Validation errors for professor records and their editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfessorValidationError {
    /// A required text field is blank after trimming.
    EmptyField(&'static str),
    /// Email cannot be normalized into `<local>@<domain>`.
    InvalidEmail { value: String, domain: String },
    /// Configured institution domain is malformed.
    InvalidDomain(String),
    /// Value is not a known reply status label.
    UnknownStatus(String),
    /// Value is not a known opportunity label.
    UnknownOpportunity(String),
    /// Field name is not one of the editable fields.
    UnknownField(String),
    /// Column name cannot be used for sorting.
    UnknownColumn(String),
}

impl Display for ProfessorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::InvalidEmail { value, domain } => {
                write!(f, "invalid email `{value}`: expected an @{domain} address")
            }
            Self::InvalidDomain(value) => write!(f, "invalid email domain `{value}`"),
            Self::UnknownStatus(value) => {
                write!(f, "unknown status `{value}`; expected Applied|Replied")
            }
            Self::UnknownOpportunity(value) => {
                write!(f, "unknown opportunity `{value}`; expected Has|Not")
            }
            Self::UnknownField(value) => {
                write!(f, "unknown field `{value}`; expected status|opportunity")
            }
            Self::UnknownColumn(value) => write!(
                f,
                "unknown column `{value}`; expected name|email|department|status|opportunity"
            ),
        }
    }
}

impl Error for ProfessorValidationError {}

/// Institution mail domain every tracked address must belong to.
///
/// Stored lowercase and without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailDomain(String);

impl EmailDomain {
    /// Parses a domain such as `uh.edu` or `@uh.edu`.
    pub fn parse(raw: &str) -> Result<Self, ProfessorValidationError> {
        let trimmed = raw.trim();
        let normalized = trimmed
            .strip_prefix('@')
            .unwrap_or(trimmed)
            .to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ProfessorValidationError::EmptyField("email domain"));
        }
        if !DOMAIN_RE.is_match(&normalized) {
            return Err(ProfessorValidationError::InvalidDomain(trimmed.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `@<domain>` suffix appended to local parts.
    pub fn suffix(&self) -> String {
        format!("@{}", self.0)
    }

    /// Normalizes raw user input into a full institution address.
    ///
    /// Accepts a bare local part (`jdoe`) or a full address (`JDoe@UH.edu`).
    /// Repeated suffixes collapse, so `jdoe@uh.edu@uh.edu` yields
    /// `jdoe@uh.edu`.
    ///
    /// # Errors
    /// - `EmptyField("email")` when nothing remains after trimming.
    /// - `InvalidEmail` when the local part is blank, has whitespace, or
    ///   belongs to another domain.
    pub fn normalize_email(&self, raw: &str) -> Result<String, ProfessorValidationError> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ProfessorValidationError::EmptyField("email"));
        }

        let suffix = self.suffix();
        let mut local = lowered.as_str();
        while let Some(stripped) = local.strip_suffix(suffix.as_str()) {
            local = stripped.trim_end();
        }

        if !LOCAL_PART_RE.is_match(local) {
            return Err(ProfessorValidationError::InvalidEmail {
                value: raw.trim().to_string(),
                domain: self.0.clone(),
            });
        }

        Ok(format!("{local}{suffix}"))
    }
}

impl Default for EmailDomain {
    fn default() -> Self {
        Self(DEFAULT_EMAIL_DOMAIN.to_string())
    }
}

impl Display for EmailDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the professor has answered the outreach email.
///
/// Ordering follows label order, so `Applied` sorts before `Replied`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    #[default]
    Applied,
    Replied,
}

impl ReplyStatus {
    pub const ALL: [Self; 2] = [Self::Applied, Self::Replied];

    /// Display label used in tables and spreadsheet cells.
    pub fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Replied => "Replied",
        }
    }
}

impl FromStr for ReplyStatus {
    type Err = ProfessorValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match label_key(value).as_str() {
            "applied" => Ok(Self::Applied),
            "replied" => Ok(Self::Replied),
            _ => Err(ProfessorValidationError::UnknownStatus(
                value.trim().to_string(),
            )),
        }
    }
}

impl Display for ReplyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the professor has an assistantship opening.
///
/// Ordering follows label order, so `Has` sorts before `NotHas`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Opportunity {
    Has,
    #[default]
    NotHas,
}

impl Opportunity {
    pub const ALL: [Self; 2] = [Self::Has, Self::NotHas];

    /// Display label used in tables and spreadsheet cells.
    pub fn label(self) -> &'static str {
        match self {
            Self::Has => "Has",
            Self::NotHas => "Not",
        }
    }
}

impl FromStr for Opportunity {
    type Err = ProfessorValidationError;

    /// Accepts current labels plus the marker-prefixed legacy ones
    /// (`✅ Has`, `❌ Not`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match label_key(value).as_str() {
            "has" | "yes" => Ok(Self::Has),
            "not" | "nothas" | "no" => Ok(Self::NotHas),
            _ => Err(ProfessorValidationError::UnknownOpportunity(
                value.trim().to_string(),
            )),
        }
    }
}

impl Display for Opportunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Editable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Status,
    Opportunity,
}

impl FromStr for RecordField {
    type Err = ProfessorValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match label_key(value).as_str() {
            "status" => Ok(Self::Status),
            "opportunity" | "chance" => Ok(Self::Opportunity),
            _ => Err(ProfessorValidationError::UnknownField(
                value.trim().to_string(),
            )),
        }
    }
}

/// Columns a record list can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortColumn {
    #[default]
    Name,
    Email,
    Department,
    Status,
    Opportunity,
}

impl SortColumn {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Department,
        Self::Status,
        Self::Opportunity,
    ];

    /// Header label shared by the persisted CSV and the XLSX export.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Department => "Department",
            Self::Status => "Status",
            Self::Opportunity => "Opportunity",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ProfessorValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match label_key(value).as_str() {
            "name" | "professorname" => Ok(Self::Name),
            "email" | "mail" | "professormail" | "professoremail" => Ok(Self::Email),
            "department" | "professordepartment" => Ok(Self::Department),
            "status" => Ok(Self::Status),
            "opportunity" | "chance" => Ok(Self::Opportunity),
            _ => Err(ProfessorValidationError::UnknownColumn(
                value.trim().to_string(),
            )),
        }
    }
}

/// One tracked professor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorRecord {
    pub name: String,
    /// Normalized institution address; the record key.
    pub email: String,
    pub department: String,
    pub status: ReplyStatus,
    pub opportunity: Opportunity,
}

impl ProfessorRecord {
    /// Creates a record with default status fields.
    ///
    /// Does not normalize `email`; callers go through `EmailDomain`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
            status: ReplyStatus::default(),
            opportunity: Opportunity::default(),
        }
    }

    /// Cell values in `COLUMN_LABELS` order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.department.as_str(),
            self.status.label(),
            self.opportunity.label(),
        ]
    }
}

/// Folds a label to its lookup key: leading markers dropped, lowercase,
/// separators removed.
fn label_key(value: &str) -> String {
    value
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
