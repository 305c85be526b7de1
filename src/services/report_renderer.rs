use std::fmt::Write as _;

use crate::models::domain::ReportModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub subject: String,
    pub html: String,
}

/// Turns a report model into a document ready to mail.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &ReportModel) -> RenderedReport;
}

/// Plain HTML layout: a summary block followed by one table per category.
/// Report strings arrive sanitized and are written without escaping.
pub struct HtmlReportRenderer {
    subject: String,
}

impl HtmlReportRenderer {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, report: &ReportModel) -> RenderedReport {
        let mut html = String::with_capacity(2048);

        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<html><body><div class=\"container\">\
             <h1>Survey Report for {email}</h1>\
             <div class=\"summary\">\
             <p>Gained Marks: <strong>{score}</strong></p>\
             <p>Total Marks: <strong>{possible}</strong></p>\
             <p>Percentage: <strong>{percentage}%</strong></p>\
             </div>",
            email = report.user_email,
            score = report.total_score,
            possible = report.total_possible,
            percentage = report.percentage_display(),
        );

        for category in &report.categories {
            let _ = write!(
                html,
                "<section class=\"category\"><h3>{name}</h3><p>Score: {score} / {total}</p>\
                 <table><thead><tr><th>Question</th><th>Answer</th>\
                 <th>Correct Answer</th><th>Score</th></tr></thead><tbody>",
                name = category.name,
                score = category.score,
                total = category.total,
            );
            for entry in &category.questions {
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    entry.question, entry.answer, entry.correct_option, entry.score
                );
            }
            html.push_str("</tbody></table></section>");
        }

        html.push_str("</div></body></html>");

        RenderedReport {
            subject: self.subject.clone(),
            html,
        }
    }
}
