pub mod catalog_service;
pub mod mailer;
pub mod report_renderer;
pub mod report_service;
pub mod response_service;

pub use catalog_service::CatalogService;
pub use mailer::{HttpMailTransport, MailTransport};
pub use report_renderer::{HtmlReportRenderer, ReportRenderer};
pub use report_service::ReportService;
pub use response_service::ResponseService;
