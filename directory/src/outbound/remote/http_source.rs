//! Reqwest-backed remote user directory adapter.
//!
//! This adapter owns transport details only: the single GET request, HTTP
//! error mapping and JSON decoding into domain records. It does not retry
//! and sets no timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{UserDto, into_domain_records};
use crate::domain::UserRecord;
use crate::domain::ports::{UserDirectorySource, UserDirectorySourceError};

const DEFAULT_USER_AGENT: &str = concat!("user-directory/", env!("CARGO_PKG_VERSION"));

/// Remote source performing one HTTP GET against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpUserDirectorySource {
    client: Client,
    endpoint: Url,
}

impl HttpUserDirectorySource {
    /// Build an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Build an adapter around an existing client.
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserDirectorySource for HttpUserDirectorySource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, UserDirectorySourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let records = parse_users(body.as_ref())?;
        debug!(endpoint = %self.endpoint, count = records.len(), "fetched user directory");
        Ok(records)
    }
}

fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, UserDirectorySourceError> {
    let decoded: Vec<UserDto> = serde_json::from_slice(body).map_err(|error| {
        UserDirectorySourceError::malformed_response(format!(
            "invalid user directory JSON payload: {error}"
        ))
    })?;
    into_domain_records(decoded).map_err(UserDirectorySourceError::malformed_response)
}

fn map_transport_error(error: reqwest::Error) -> UserDirectorySourceError {
    UserDirectorySourceError::remote_unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectorySourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    UserDirectorySourceError::remote_rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    const ONE_USER: &str = r#"[{
        "id": "1",
        "organization": "Lendsqr",
        "username": "Adedeji",
        "email": "adedeji@lendsqr.com",
        "phoneNumber": "08078903721",
        "dateJoined": "2020-05-15T10:00:00Z",
        "status": "Active",
        "personalInformation": {
            "fullName": "Grace Effiom",
            "phoneNumber": "07060780922",
            "email": "grace@gmail.com",
            "bvn": "07060780922",
            "gender": "Female",
            "maritalStatus": "Single",
            "children": "None",
            "typeOfResidence": "Parent's Apartment"
        },
        "educationAndEmployment": {
            "levelOfEducation": "B.Sc",
            "employmentStatus": "Employed",
            "sectorOfEmployment": "FinTech",
            "durationOfEmployment": "2 years",
            "officeEmail": "grace@lendsqr.com",
            "monthlyIncome": ["200000.00", "400000.00"],
            "loanRepayment": "₦40,000.00"
        },
        "socials": {
            "twitter": "@grace_effiom",
            "facebook": "Grace Effiom",
            "instagram": "@grace_effiom"
        },
        "guarantor": {
            "fullName": "Debby Ogana",
            "phoneNumber": "07060780922",
            "email": "debby@gmail.com",
            "relationship": "Sister"
        }
    }]"#;

    #[test]
    fn parses_payload_into_domain_records() {
        let records = parse_users(ONE_USER.as_bytes()).expect("payload should decode");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id().as_str(), "1");
        assert_eq!(record.socials().twitter, "@grace_effiom");
        assert_eq!(
            record.education_and_employment().monthly_income.upper(),
            "400000.00"
        );
        assert!(record.has_outstanding_loan());
    }

    #[rstest]
    #[case::not_json("<html>")]
    #[case::not_an_array(r#"{"users": []}"#)]
    #[case::missing_fields(r#"[{"id": "1"}]"#)]
    fn rejects_undecodable_payloads(#[case] body: &str) {
        let error = parse_users(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(
            error,
            UserDirectorySourceError::MalformedResponse { .. }
        ));
    }

    #[rstest]
    #[case::unknown_status("\"Active\"", "\"Frozen\"")]
    #[case::bad_date("\"2020-05-15T10:00:00Z\"", "\"someday\"")]
    #[case::blank_id("\"id\": \"1\"", "\"id\": \"\"")]
    fn one_bad_record_fails_the_payload(#[case] from: &str, #[case] to: &str) {
        let body = ONE_USER.replacen(from, to, 1);

        let error = parse_users(body.as_bytes()).expect_err("mapping should fail");
        assert!(matches!(
            error,
            UserDirectorySourceError::MalformedResponse { .. }
        ));
    }

    #[test]
    fn empty_array_is_an_empty_directory() {
        assert_eq!(parse_users(b"[]"), Ok(Vec::new()));
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, b"".as_slice(), "Not Found")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, b"  upstream\n  down ".as_slice(), "upstream down")]
    fn maps_statuses_to_rejections(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected_message: &str,
    ) {
        let error = map_status_error(status, body);
        assert_eq!(
            error,
            UserDirectorySourceError::remote_rejected(status.as_u16(), expected_message)
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let preview = body_preview("x".repeat(400).as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
