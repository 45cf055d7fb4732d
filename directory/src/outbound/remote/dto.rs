//! DTOs for decoding the remote user directory payload.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Nested blocks share the domain serde shape.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    EducationAndEmployment, Guarantor, PersonalInformation, Socials, UserId, UserRecord,
    UserRecordDraft, UserStatus,
};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%b %d, %Y %I:%M %p"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) id: String,
    pub(super) organization: String,
    pub(super) username: String,
    pub(super) email: String,
    pub(super) phone_number: String,
    pub(super) date_joined: String,
    pub(super) status: String,
    pub(super) personal_information: PersonalInformation,
    pub(super) education_and_employment: EducationAndEmployment,
    pub(super) socials: Socials,
    pub(super) guarantor: Guarantor,
}

pub(super) fn into_domain_records(users: Vec<UserDto>) -> Result<Vec<UserRecord>, String> {
    users.into_iter().map(UserDto::into_domain).collect()
}

impl UserDto {
    fn into_domain(self) -> Result<UserRecord, String> {
        let id = UserId::new(self.id.as_str())
            .map_err(|error| format!("user {:?}: {error}", self.id))?;
        let status: UserStatus = self
            .status
            .parse()
            .map_err(|error| format!("user {id}: {error}"))?;
        let date_joined = parse_date_joined(&self.date_joined).ok_or_else(|| {
            format!("user {id}: unrecognised dateJoined {:?}", self.date_joined)
        })?;

        Ok(UserRecord::new(UserRecordDraft {
            id,
            organization: self.organization,
            username: self.username,
            email: self.email,
            phone_number: self.phone_number,
            date_joined,
            status,
            personal_information: self.personal_information,
            education_and_employment: self.education_and_employment,
            socials: self.socials,
            guarantor: self.guarantor,
        }))
    }
}

/// Parse the join timestamp in any of the forms the endpoint has served.
///
/// Offset-less forms are read as UTC.
pub(super) fn parse_date_joined(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rfc3339("2023-06-15T10:30:00Z", "2023-06-15T10:30:00+00:00")]
    #[case::offset("2023-06-15T23:30:00-02:00", "2023-06-16T01:30:00+00:00")]
    #[case::space_separated("2020-05-15 10:00:00", "2020-05-15T10:00:00+00:00")]
    #[case::date_only("2020-05-15", "2020-05-15T00:00:00+00:00")]
    #[case::display("May 15, 2020 10:00 AM", "2020-05-15T10:00:00+00:00")]
    #[case::display_pm("Apr 30, 2020 10:00 PM", "2020-04-30T22:00:00+00:00")]
    fn parses_known_date_forms(#[case] raw: &str, #[case] expected: &str) {
        let parsed = parse_date_joined(raw).expect("date should parse");
        assert_eq!(parsed.to_rfc3339(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::garbage("yesterday")]
    #[case::bad_day("2020-02-31")]
    fn rejects_unknown_date_forms(#[case] raw: &str) {
        assert_eq!(parse_date_joined(raw), None);
    }
}
