use std::collections::HashSet;

use crate::{content::QuizQuestion, error::AppError};

pub struct QuizStatus<'a> {
    pub next: Option<&'a QuizQuestion>,
    pub remaining: usize,
    pub total: usize,
}

/// Rotate to the first question the session has not yet answered
/// correctly. Questions keep their authored order, so a visitor always
/// sees the earliest open question next.
pub fn next_question<'a>(
    questions: &'a [QuizQuestion],
    correct_ids: &HashSet<String>,
) -> QuizStatus<'a> {
    let remaining: Vec<&QuizQuestion> = questions
        .iter()
        .filter(|question| !correct_ids.contains(question.id))
        .collect();

    QuizStatus {
        next: remaining.first().copied(),
        remaining: remaining.len(),
        total: questions.len(),
    }
}

/// Missing and empty payload fields are rejected alike, with the same
/// message for every field the endpoint requires.
pub fn required(value: Option<String>, message: &'static str) -> Result<String, AppError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::BadRequest(message)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::{next_question, required};
    use crate::content::QuizQuestion;

    fn question(id: &'static str) -> QuizQuestion {
        QuizQuestion {
            id,
            prompt: "?",
            options: BTreeMap::from([("a", "yes"), ("b", "no")]),
            correct: "a",
            help: None,
        }
    }

    #[test]
    fn rotates_to_first_open_question() {
        let questions = vec![question("q1"), question("q2"), question("q3")];

        let status = next_question(&questions, &HashSet::new());
        assert_eq!(status.next.unwrap().id, "q1");
        assert_eq!(status.remaining, 3);
        assert_eq!(status.total, 3);

        let correct = HashSet::from(["q1".to_string()]);
        let status = next_question(&questions, &correct);
        assert_eq!(status.next.unwrap().id, "q2");
        assert_eq!(status.remaining, 2);
    }

    #[test]
    fn all_correct_means_completed() {
        let questions = vec![question("q1"), question("q2")];
        let correct = HashSet::from(["q1".to_string(), "q2".to_string()]);

        let status = next_question(&questions, &correct);
        assert!(status.next.is_none());
        assert_eq!(status.remaining, 0);
        assert_eq!(status.total, 2);
    }

    #[test]
    fn no_questions_is_already_complete() {
        let status = next_question(&[], &HashSet::new());

        assert!(status.next.is_none());
        assert_eq!(status.total, 0);
    }

    #[test]
    fn required_rejects_missing_and_empty() {
        assert_eq!(required(Some("abc".into()), "msg").unwrap(), "abc");
        assert!(required(Some(String::new()), "msg").is_err());
        assert!(required(None, "msg").is_err());
    }
}
