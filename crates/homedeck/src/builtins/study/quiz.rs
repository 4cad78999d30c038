//! Quiz maker: build a question bank, then grade an answer sheet.

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::storage::docs::{QuizBank, QuizQuestion};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "quiz-maker";

pub const MIN_OPTIONS: usize = 2;

pub fn add_question(
    bank: &mut QuizBank,
    question: &str,
    options: Vec<String>,
    answer_index: usize,
) -> CoreResult<QuizQuestion> {
    let question = question.trim();
    if question.is_empty() {
        return Err(CoreError::InvalidInput("question is empty".to_string()));
    }
    if options.len() < MIN_OPTIONS {
        return Err(CoreError::InvalidInput(format!(
            "at least {MIN_OPTIONS} options are required"
        )));
    }
    if options.iter().any(|option| option.trim().is_empty()) {
        return Err(CoreError::InvalidInput("option text is empty".to_string()));
    }
    if answer_index >= options.len() {
        return Err(CoreError::InvalidInput(format!(
            "answer index {answer_index} out of range"
        )));
    }
    let entry = QuizQuestion {
        id: Uuid::new_v4().to_string(),
        question: question.to_string(),
        options,
        answer_index,
    };
    bank.questions.push(entry.clone());
    Ok(entry)
}

pub fn remove_question(bank: &mut QuizBank, id: &str) -> CoreResult<()> {
    let before = bank.questions.len();
    bank.questions.retain(|q| q.id != id);
    if bank.questions.len() == before {
        return Err(CoreError::NotFound(format!("question {id}")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub per_question: Vec<bool>,
    pub score: usize,
    pub total: usize,
}

/// Grade an answer sheet against the bank, position by position.
pub fn grade(bank: &QuizBank, answers: &[usize]) -> CoreResult<GradeReport> {
    if answers.len() != bank.questions.len() {
        return Err(CoreError::InvalidInput(format!(
            "expected {} answers, got {}",
            bank.questions.len(),
            answers.len()
        )));
    }
    let per_question: Vec<bool> = bank
        .questions
        .iter()
        .zip(answers.iter())
        .map(|(q, &a)| q.answer_index == a)
        .collect();
    let score = per_question.iter().filter(|&&ok| ok).count();
    Ok(GradeReport {
        score,
        total: per_question.len(),
        per_question,
    })
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Quiz Maker".to_string(),
        icon: "❓".to_string(),
        keywords: vec!["questions".into(), "test".into(), "exam".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "question": {"type": "string"},
                "options": {"type": "array"},
                "answerIndex": {"type": "integer"},
                "id": {"type": "string"},
                "answers": {"type": "array"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "list" => {
                    let questions = &ctx.docs.quiz().questions;
                    Ok(json!({ "questions": questions, "count": questions.len() }))
                }
                "add" => {
                    let question = args.get("question").and_then(|v| v.as_str()).unwrap_or("");
                    let options: Vec<String> = args
                        .get("options")
                        .and_then(|v| v.as_array())
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                                .collect()
                        })
                        .unwrap_or_default();
                    let answer_index = args
                        .get("answerIndex")
                        .and_then(|v| v.as_u64())
                        .unwrap_or(0) as usize;
                    let entry = add_question(ctx.docs.quiz_mut(), question, options, answer_index)?;
                    Ok(json!({ "question": entry }))
                }
                "delete" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    remove_question(ctx.docs.quiz_mut(), id)?;
                    Ok(json!({ "deleted": true }))
                }
                "grade" => {
                    let answers: Vec<usize> = args
                        .get("answers")
                        .and_then(|v| v.as_array())
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|v| v.as_u64().map(|n| n as usize))
                                .collect()
                        })
                        .unwrap_or_default();
                    let report = grade(ctx.docs.quiz(), &answers)?;
                    serde_json::to_value(&report)
                        .map_err(|e| CoreError::Internal(format!("grade serialize error: {e}")))
                }
                other => Err(CoreError::InvalidInput(format!("unknown quiz op: {other}"))),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_validates_fields() {
        let mut bank = QuizBank::default();
        assert!(add_question(&mut bank, "", options(&["a", "b"]), 0).is_err());
        assert!(add_question(&mut bank, "q", options(&["only"]), 0).is_err());
        assert!(add_question(&mut bank, "q", options(&["a", " "]), 0).is_err());
        assert!(add_question(&mut bank, "q", options(&["a", "b"]), 2).is_err());
        assert!(add_question(&mut bank, "q", options(&["a", "b"]), 1).is_ok());
    }

    #[test]
    fn grade_scores_per_question() {
        let mut bank = QuizBank::default();
        add_question(&mut bank, "1+1?", options(&["1", "2"]), 1).unwrap();
        add_question(&mut bank, "2*3?", options(&["6", "8"]), 0).unwrap();

        let report = grade(&bank, &[1, 1]).unwrap();
        assert_eq!(report.per_question, vec![true, false]);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
    }

    #[test]
    fn grade_requires_full_answer_sheet() {
        let mut bank = QuizBank::default();
        add_question(&mut bank, "q", options(&["a", "b"]), 0).unwrap();
        assert!(grade(&bank, &[]).is_err());
        assert!(grade(&bank, &[0, 1]).is_err());
    }

    #[test]
    fn remove_question_by_id() {
        let mut bank = QuizBank::default();
        let q = add_question(&mut bank, "q", options(&["a", "b"]), 0).unwrap();
        remove_question(&mut bank, &q.id).unwrap();
        assert!(bank.questions.is_empty());
        assert!(remove_question(&mut bank, &q.id).is_err());
    }
}
