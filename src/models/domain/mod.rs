pub mod category;
pub mod question;
pub mod report;
pub mod response;
pub mod user;
pub use category::{Category, Section, Subsection};
pub use question::Question;
pub use report::ReportModel;
pub use response::Response;
pub use user::User;

/// Version stamped on every newly written question and response document.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Documents written before versioning carry no `schema_version` field.
pub(crate) fn legacy_schema_version() -> u32 {
    1
}
