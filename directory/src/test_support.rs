//! Test utilities for the user-directory crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::ports::{
    KeyValueStore, KeyValueStoreError, UserDirectorySource, UserDirectorySourceError, UserStore,
    UserStoreError,
};
use crate::domain::{
    EducationAndEmployment, Guarantor, LoanRepayment, MonthlyIncome, PersonalInformation, Socials,
    UserId, UserRecord, UserRecordDraft, UserStatus,
};

/// Builder for believable user records with overridable fields.
#[derive(Debug, Clone)]
pub struct UserFixture {
    id: String,
    organization: String,
    username: String,
    email: String,
    phone: String,
    status: UserStatus,
    joined: (i32, u32, u32),
    loan: String,
}

impl UserFixture {
    /// Start a record with identifier `id` and defaults derived from it.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            organization: "Lendsqr".to_owned(),
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            phone: format!("0807890{id:0>4}"),
            status: UserStatus::Active,
            joined: (2023, 1, 1),
            loan: "₦0.00".to_owned(),
        }
    }

    pub fn organization(mut self, organization: &str) -> Self {
        organization.clone_into(&mut self.organization);
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        username.clone_into(&mut self.username);
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        email.clone_into(&mut self.email);
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        phone.clone_into(&mut self.phone);
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn joined(mut self, year: i32, month: u32, day: u32) -> Self {
        self.joined = (year, month, day);
        self
    }

    pub fn loan(mut self, loan: &str) -> Self {
        loan.clone_into(&mut self.loan);
        self
    }

    /// Build the record, panicking on an invalid identifier or date.
    pub fn build(self) -> UserRecord {
        let id = UserId::new(self.id.as_str())
            .unwrap_or_else(|err| panic!("fixture user id must be valid: {err}"));
        let (year, month, day) = self.joined;
        let date_joined: DateTime<Utc> = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or_else(|| panic!("fixture join date must be valid: {year}-{month}-{day}"));

        UserRecord::new(UserRecordDraft {
            id,
            organization: self.organization,
            username: self.username.clone(),
            email: self.email.clone(),
            phone_number: self.phone.clone(),
            date_joined,
            status: self.status,
            personal_information: PersonalInformation {
                full_name: format!("{} Fixture", self.username),
                phone_number: self.phone,
                email: self.email,
                bvn: "07060780922".to_owned(),
                gender: "Female".to_owned(),
                marital_status: "Single".to_owned(),
                children: "None".to_owned(),
                type_of_residence: "Parent's Apartment".to_owned(),
            },
            education_and_employment: EducationAndEmployment {
                level_of_education: "B.Sc".to_owned(),
                employment_status: "Employed".to_owned(),
                sector_of_employment: "FinTech".to_owned(),
                duration_of_employment: "2 years".to_owned(),
                office_email: "office@example.com".to_owned(),
                monthly_income: MonthlyIncome::new("200000", "400000"),
                loan_repayment: LoanRepayment::new(self.loan),
            },
            socials: Socials {
                twitter: format!("@{}", self.username),
                facebook: self.username.clone(),
                instagram: format!("@{}", self.username),
            },
            guarantor: Guarantor {
                full_name: "Debby Ogana".to_owned(),
                phone_number: "07060780922".to_owned(),
                email: "debby@example.com".to_owned(),
                relationship: "Sister".to_owned(),
            },
        })
    }
}

/// Remote source replaying scripted results, one per call.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    scripted: Mutex<VecDeque<Result<Vec<UserRecord>, UserDirectorySourceError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    /// Replay `scripted` in order; calls past the end report the remote as
    /// unavailable.
    pub fn new(scripted: Vec<Result<Vec<UserRecord>, UserDirectorySourceError>>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectorySource for ScriptedSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, UserDirectorySourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(UserDirectorySourceError::remote_unavailable(
                    "source script exhausted",
                ))
            })
    }
}

/// Storage tier holding records in memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: Mutex<Vec<UserRecord>>,
    writes: AtomicUsize,
}

impl MemoryUserStore {
    /// Start with `records` already stored.
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            writes: AtomicUsize::new(0),
        }
    }

    /// Records currently stored.
    pub fn stored(&self) -> Vec<UserRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `write_all` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        Ok(self.stored())
    }

    async fn write_all(&self, records: &[UserRecord]) -> Result<(), UserStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records.to_vec();
        Ok(())
    }

    async fn read_one(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self
            .stored()
            .into_iter()
            .find(|record| record.id() == id))
    }
}

/// Storage tier whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        Err(UserStoreError::unavailable("forced failure"))
    }

    async fn write_all(&self, _records: &[UserRecord]) -> Result<(), UserStoreError> {
        Err(UserStoreError::unavailable("forced failure"))
    }

    async fn read_one(&self, _id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        Err(UserStoreError::unavailable("forced failure"))
    }
}

/// Key-value backend whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingKeyValueStore;

impl KeyValueStore for FailingKeyValueStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Err(KeyValueStoreError::backend("storage disabled"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::backend("storage disabled"))
    }

    fn remove_item(&self, _key: &str) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::backend("storage disabled"))
    }

    fn keys(&self) -> Result<Vec<String>, KeyValueStoreError> {
        Err(KeyValueStoreError::backend("storage disabled"))
    }
}
