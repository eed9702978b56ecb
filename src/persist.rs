//! Persistence hand-off
//!
//! Maps extracted questions onto the Test → Question → Answer row layout
//! and passes them to a `QuestionStore`. The storage engine lives outside
//! this crate.

use serde::{Deserialize, Serialize};

use crate::document::{AnswerOption, QuestionRecord, ResultSet};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRow {
    pub content: String,
    pub right_answer: bool,
}

/// One question row and the answer rows that belong to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRow {
    pub test_id: i64,
    pub content: String,
    pub answers: Vec<AnswerRow>,
}

/// Storage collaborator receiving imported rows
pub trait QuestionStore {
    /// Store the rows and return how many questions were written
    fn insert_questions(&mut self, rows: Vec<QuestionRow>) -> Result<usize>;
}

/// Derive one question row per record and one answer row per option
pub fn build_rows(test_id: i64, questions: &[QuestionRecord]) -> Vec<QuestionRow> {
    questions
        .iter()
        .map(|question| QuestionRow {
            test_id,
            content: question.text.clone(),
            answers: question
                .options
                .iter()
                .map(|option| AnswerRow {
                    content: option.text.clone(),
                    right_answer: is_correct_option(
                        option,
                        &question.options,
                        question.correct_answer.as_deref(),
                    ),
                })
                .collect(),
        })
        .collect()
}

/// Hand a result set to the store under the given test
pub fn persist_result<S: QuestionStore + ?Sized>(
    store: &mut S,
    test_id: i64,
    result: &ResultSet,
) -> Result<usize> {
    if result.is_empty() {
        return Ok(0);
    }
    store.insert_questions(build_rows(test_id, &result.questions))
}

/// Whether the stated answer selects this option
///
/// Option numbers take precedence: the answer is compared with option
/// texts only when it names no option number. Failing both, a run of
/// single-digit option numbers ("134") selects each of them.
pub fn is_correct_option(
    option: &AnswerOption,
    options: &[AnswerOption],
    correct_answer: Option<&str>,
) -> bool {
    let Some(answer) = correct_answer.map(str::trim).filter(|a| !a.is_empty()) else {
        return false;
    };

    let names_number = |o: &AnswerOption| answer == o.number.to_string();
    if options.iter().any(names_number) {
        return names_number(option);
    }
    if options.iter().any(|o| o.text == answer) {
        return option.text == answer;
    }

    let single_digit_options = options.iter().all(|o| o.number < 10);
    single_digit_options
        && answer.len() > 1
        && answer.chars().all(|c| c.is_ascii_digit())
        && answer.chars().any(|c| c.to_digit(10) == Some(option.number))
}
