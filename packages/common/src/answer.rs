use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::{Question, QuestionType};

/// A raw answer value as sent by the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    #[schema(value_type = f64)]
    Number(serde_json::Number),
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::Choices(v) => v.iter().all(|c| c.trim().is_empty()),
        }
    }

    /// Flatten to a single display string (list items joined with ", ").
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Choices(v) => v.join(", "),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub answer: AnswerValue,
}

/// Check a set of answers against the questions they respond to.
///
/// Answers to questions outside `questions` are rejected, as are repeated answers.
/// Optional questions may be skipped or left blank.
pub fn validate_answers(questions: &[Question], answers: &[Answer]) -> Result<(), ValidationError> {
    let known: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    let mut by_id: HashMap<&str, &AnswerValue> = HashMap::with_capacity(answers.len());
    for answer in answers {
        if !known.contains(answer.question_id.as_str()) {
            return Err(ValidationError::UnknownQuestion(answer.question_id.clone()));
        }
        if by_id
            .insert(answer.question_id.as_str(), &answer.answer)
            .is_some()
        {
            return Err(ValidationError::DuplicateAnswer(answer.question_id.clone()));
        }
    }

    for question in questions {
        match by_id.get(question.id.as_str()) {
            Some(value) if !value.is_blank() => validate_value(question, value)?,
            _ if question.required => {
                return Err(ValidationError::RequiredAnswerMissing(
                    question.question.clone(),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_value(question: &Question, value: &AnswerValue) -> Result<(), ValidationError> {
    match question.kind {
        QuestionType::Mcq => {
            let picked: Vec<String> = match value {
                AnswerValue::Choices(v) => v.iter().map(|c| c.trim().to_string()).collect(),
                other => vec![other.display().trim().to_string()],
            };
            for choice in picked {
                if !question.options.iter().any(|o| *o == choice) {
                    return Err(ValidationError::InvalidOption {
                        question: question.question.clone(),
                        answer: choice,
                    });
                }
            }
            Ok(())
        }
        QuestionType::Text | QuestionType::Textarea => {
            if matches!(value, AnswerValue::Choices(_)) {
                return Err(ValidationError::UnexpectedList(question.question.clone()));
            }
            let len = value.display().trim().chars().count() as u32;
            if let Some(min) = question.min_length
                && len < min
            {
                return Err(ValidationError::AnswerTooShort {
                    question: question.question.clone(),
                    min,
                });
            }
            if let Some(max) = question.max_length
                && len > max
            {
                return Err(ValidationError::AnswerTooLong {
                    question: question.question.clone(),
                    max,
                });
            }
            Ok(())
        }
        QuestionType::Number => match value {
            AnswerValue::Number(_) => Ok(()),
            AnswerValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(()),
                _ => Err(ValidationError::NotANumber(question.question.clone())),
            },
            AnswerValue::Choices(_) => Err(ValidationError::UnexpectedList(
                question.question.clone(),
            )),
        },
    }
}
