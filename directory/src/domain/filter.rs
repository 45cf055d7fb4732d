//! Sparse filter criteria for the directory table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{UserRecord, UserStatus};

/// Optional predicates combined with logical AND.
///
/// An absent field places no constraint on records. Blank strings count as
/// absent, so clearing a text box in the filter form removes that predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact organization match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Case-insensitive username substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Case-insensitive email substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Exact status match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Calendar day the user joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact organization match.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Require `username` as a case-insensitive substring.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Require `email` as a case-insensitive substring.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Require `phone_number` as a substring.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Require an exact status match.
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require the user to have joined on `date_joined` (UTC).
    pub fn with_date_joined(mut self, date_joined: NaiveDate) -> Self {
        self.date_joined = Some(date_joined);
        self
    }

    /// Whether no predicate is present.
    pub fn is_empty(&self) -> bool {
        present(self.organization.as_ref()).is_none()
            && present(self.username.as_ref()).is_none()
            && present(self.email.as_ref()).is_none()
            && present(self.phone_number.as_ref()).is_none()
            && self.status.is_none()
            && self.date_joined.is_none()
    }

    /// Overlay `update` on these criteria; fields present in `update` win.
    pub fn merge(self, update: Self) -> Self {
        Self {
            organization: update.organization.or(self.organization),
            username: update.username.or(self.username),
            email: update.email.or(self.email),
            phone_number: update.phone_number.or(self.phone_number),
            status: update.status.or(self.status),
            date_joined: update.date_joined.or(self.date_joined),
        }
    }

    /// Whether `record` satisfies every present predicate.
    pub fn matches(&self, record: &UserRecord) -> bool {
        present(self.organization.as_ref()).is_none_or(|org| record.organization() == org)
            && present(self.username.as_ref())
                .is_none_or(|needle| contains_ignore_case(record.username(), needle))
            && present(self.email.as_ref())
                .is_none_or(|needle| contains_ignore_case(record.email(), needle))
            && present(self.phone_number.as_ref())
                .is_none_or(|needle| record.phone_number().contains(needle))
            && self.status.is_none_or(|status| record.status() == status)
            && self.date_joined.is_none_or(|day| record.joined_on() == day)
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|text| !text.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
