#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{Category, Question, Response},
        dto::request::SubmitResponseRequest,
    };

    pub fn category(name: &str) -> Category {
        Category::new(name)
    }

    /// "2 + 2?" with options "3" and "4", answer key "4".
    pub fn question_in(category_id: &str, max_score: Option<f64>) -> Question {
        let mut question = Question::new(
            "2 + 2?",
            vec!["3".to_string(), "4".to_string()],
            category_id,
        );
        question.correct_option = Some("4".to_string());
        question.max_score = max_score;
        question
    }

    pub fn response_for(user_id: &str, question_id: &str, answer: &str, score: f64) -> Response {
        Response::new(user_id, question_id, answer, score, false, None)
    }

    /// A complete first-attempt submission scored 8.
    pub fn submission(user_id: &str, question_id: &str, answer: &str) -> SubmitResponseRequest {
        SubmitResponseRequest {
            user_id: Some(user_id.to_string()),
            question_id: Some(question_id.to_string()),
            answer: Some(answer.to_string()),
            score: Some(8.0),
            reattempt: None,
            file_url: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, test_helpers::assert_error_status};
    use actix_web::http::StatusCode;

    #[test]
    fn fixture_question_accepts_its_answer_key() {
        let question = question_in("cat-1", Some(10.0));
        let key = question.correct_option.clone().unwrap();
        assert!(question.accepts_answer(&key));
        assert!(question.check_invariants().is_ok());
    }

    #[test]
    fn fixture_submission_is_complete() {
        let valid = submission("user-1", "q-1", "4").into_submission().unwrap();
        assert_eq!(valid.score, 8.0);
        assert!(!valid.reattempt);
    }

    #[test]
    fn error_status_helper_accepts_4xx() {
        assert_error_status(StatusCode::CONFLICT);
    }
}
