//! Domain types, services and ports of the user directory.
//!
//! Public surface:
//! - `UserRecord` and its nested blocks: one user as served by the remote
//!   directory.
//! - `DurableStore`: tiered persistence that never surfaces storage errors.
//! - `DirectoryCache`: reconciles the durable store with the remote source
//!   and publishes `DirectoryState`.
//! - `query`: filtering and pagination over a `DirectorySnapshot`.
//! - `SessionRelay` and `UserDetailsLoader`: details-view handoff.
//! - `DashboardState`: table state driving the query engine.

pub mod dashboard;
pub mod directory_cache;
pub mod durable_store;
pub mod filter;
pub mod ports;
pub mod query;
pub mod session_relay;
pub mod snapshot;
pub mod user;
pub mod user_details;

pub use self::dashboard::{DashboardState, DashboardView, detail_route};
pub use self::directory_cache::{DirectoryCache, DirectoryState, LOAD_FAILURE_MESSAGE};
pub use self::durable_store::{DurableStore, FALLBACK_ORGANIZATIONS};
pub use self::filter::FilterCriteria;
pub use self::query::UserPage;
pub use self::session_relay::{RELAY_KEY_PREFIX, SessionRelay, relay_key};
pub use self::snapshot::{DirectorySnapshot, SummaryCounts};
pub use self::user::{
    EducationAndEmployment, Guarantor, LoanRepayment, MonthlyIncome, PersonalInformation, Socials,
    UserId, UserRecord, UserRecordDraft, UserStatus, UserValidationError,
};
pub use self::user_details::{UserDetailsError, UserDetailsLoader};
