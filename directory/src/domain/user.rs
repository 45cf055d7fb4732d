//! User directory record model.
//!
//! Records are created only by decoding the remote directory payload and are
//! replaced wholesale on reconciliation. The same serde shape (camelCase, as
//! served by the endpoint) is used by every storage tier and the session
//! relay.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by the record newtypes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier is empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier has leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    PaddedId,
    /// Monthly income is not a `[lower, upper]` pair.
    #[error("monthly income must hold exactly two bounds, found {count}")]
    IncomeBounds { count: usize },
    /// Status string does not name a known status.
    #[error("unknown user status: {value}")]
    UnknownStatus { value: String },
}

/// Stable user identifier; the join key across every store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account status shown in the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Blacklisted,
}

impl UserStatus {
    /// Wire and display name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
            Self::Blacklisted => "Blacklisted",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Pending" => Ok(Self::Pending),
            "Blacklisted" => Ok(Self::Blacklisted),
            other => Err(UserValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Personal information block of the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub bvn: String,
    pub gender: String,
    pub marital_status: String,
    pub children: String,
    pub type_of_residence: String,
}

/// Monthly income range as served: an ordered `[lower, upper]` pair of
/// numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MonthlyIncome {
    lower: String,
    upper: String,
}

impl MonthlyIncome {
    /// Build an income range from its bounds.
    pub fn new(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Lower bound, unformatted.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Upper bound, unformatted.
    pub fn upper(&self) -> &str {
        &self.upper
    }
}

impl TryFrom<Vec<String>> for MonthlyIncome {
    type Error = UserValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let count = value.len();
        let mut bounds = value.into_iter();
        match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(lower), Some(upper), None) => Ok(Self { lower, upper }),
            _ => Err(UserValidationError::IncomeBounds { count }),
        }
    }
}

impl From<MonthlyIncome> for Vec<String> {
    fn from(value: MonthlyIncome) -> Self {
        vec![value.lower, value.upper]
    }
}

/// Currency-formatted loan repayment amount, e.g. `₦50,000.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanRepayment(String);

impl LoanRepayment {
    /// Wrap a formatted amount.
    pub fn new(formatted: impl Into<String>) -> Self {
        Self(formatted.into())
    }

    /// The amount exactly as served.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Amount in minor units (kobo), ignoring the currency symbol and
    /// grouping separators. Digits past the second decimal place are dropped.
    ///
    /// Returns `None` when the string holds no parseable amount.
    pub fn minor_units(&self) -> Option<u64> {
        let numeric: String = self
            .0
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let (whole, fraction) = numeric.split_once('.').unwrap_or((numeric.as_str(), ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return None;
        }

        let whole_units: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let cents: u64 = fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(2)
            .collect::<String>()
            .parse()
            .ok()?;
        whole_units.checked_mul(100)?.checked_add(cents)
    }

    /// Whether a non-zero repayment is due.
    pub fn is_outstanding(&self) -> bool {
        self.minor_units().is_some_and(|units| units > 0)
    }
}

/// Education and employment block of the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationAndEmployment {
    pub level_of_education: String,
    pub employment_status: String,
    pub sector_of_employment: String,
    pub duration_of_employment: String,
    pub office_email: String,
    pub monthly_income: MonthlyIncome,
    pub loan_repayment: LoanRepayment,
}

/// Social handles block of the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
}

/// Guarantor block of the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guarantor {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub relationship: String,
}

/// Field values for building a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecordDraft {
    pub id: UserId,
    pub organization: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub date_joined: DateTime<Utc>,
    pub status: UserStatus,
    pub personal_information: PersonalInformation,
    pub education_and_employment: EducationAndEmployment,
    pub socials: Socials,
    pub guarantor: Guarantor,
}

/// One user of the loan platform.
///
/// ## Invariants
/// - `id` never changes after construction; there is no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: UserId,
    organization: String,
    username: String,
    email: String,
    phone_number: String,
    date_joined: DateTime<Utc>,
    status: UserStatus,
    personal_information: PersonalInformation,
    education_and_employment: EducationAndEmployment,
    socials: Socials,
    guarantor: Guarantor,
}

impl UserRecord {
    /// Build a record from validated parts.
    pub fn new(draft: UserRecordDraft) -> Self {
        let UserRecordDraft {
            id,
            organization,
            username,
            email,
            phone_number,
            date_joined,
            status,
            personal_information,
            education_and_employment,
            socials,
            guarantor,
        } = draft;
        Self {
            id,
            organization,
            username,
            email,
            phone_number,
            date_joined,
            status,
            personal_information,
            education_and_employment,
            socials,
            guarantor,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Organization the user belongs to.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Display username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone number.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Timestamp the user joined the platform.
    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    /// UTC calendar day the user joined.
    pub fn joined_on(&self) -> NaiveDate {
        self.date_joined.date_naive()
    }

    /// Current account status.
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Personal information block.
    pub fn personal_information(&self) -> &PersonalInformation {
        &self.personal_information
    }

    /// Education and employment block.
    pub fn education_and_employment(&self) -> &EducationAndEmployment {
        &self.education_and_employment
    }

    /// Social handles block.
    pub fn socials(&self) -> &Socials {
        &self.socials
    }

    /// Guarantor block.
    pub fn guarantor(&self) -> &Guarantor {
        &self.guarantor
    }

    /// Whether the record counts towards the "Users With Loans" tile.
    pub fn has_outstanding_loan(&self) -> bool {
        self.education_and_employment.loan_repayment.is_outstanding()
    }
}
