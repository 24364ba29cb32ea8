// src/models/quiz_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Number of option slots on the creation form.
pub const FORM_OPTION_SLOTS: usize = 3;

/// One selectable choice.
/// The label travels under the key `text`, both in storage and in AI output.
/// Missing keys decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    #[serde(default)]
    pub value: String,
    #[serde(rename = "text", default)]
    pub label: String,
}

/// A code-naming question, with its options already decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizItem {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// Snippet containing the placeholder marker.
    pub code: String,

    /// Ordered choices; the stored JSON array order is preserved.
    pub options: Vec<QuizOption>,

    /// Must equal one option's `value` for the item to be answerable.
    pub answer: String,
    pub is_public: bool,
    pub user_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Raw shape of a `functions` row. `options` is still JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct QuizItemRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub options: String,
    pub answer: String,
    pub is_public: bool,
    pub user_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<QuizItemRow> for QuizItem {
    type Error = AppError;

    fn try_from(row: QuizItemRow) -> Result<Self, Self::Error> {
        let options: Vec<QuizOption> = serde_json::from_str(&row.options).map_err(|e| {
            AppError::InternalServerError(format!(
                "malformed options for function {}: {}",
                row.id, e
            ))
        })?;

        Ok(QuizItem {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            code: row.code,
            options,
            answer: row.answer,
            is_public: row.is_public,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert payload for a new quiz item.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = validate_answer_in_options))]
pub struct NewQuizItem {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters."))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, message = "Code must not be empty."))]
    pub code: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<QuizOption>,
    #[validate(length(min = 1, max = 255, message = "Answer must be between 1 and 255 characters."))]
    pub answer: String,
    pub is_public: bool,
}

impl NewQuizItem {
    /// Encodes the options the way the `options` column stores them.
    pub fn options_json(&self) -> Result<String, AppError> {
        serde_json::to_string(&self.options)
            .map_err(|e| AppError::InternalServerError(format!("failed to encode options: {}", e)))
    }
}

fn validate_options(options: &[QuizOption]) -> Result<(), ValidationError> {
    if options.is_empty() {
        return Err(ValidationError::new("options_cannot_be_empty"));
    }
    if options.len() > FORM_OPTION_SLOTS {
        return Err(ValidationError::new("too_many_options"));
    }
    Ok(())
}

fn validate_answer_in_options(item: &NewQuizItem) -> Result<(), ValidationError> {
    if item.options.iter().any(|o| o.value == item.answer) {
        Ok(())
    } else {
        Err(ValidationError::new("answer_not_in_options")
            .with_message("Answer must match one of the option values.".into()))
    }
}

/// Form body posted to `POST /functions`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuizForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub answer: String,
    pub option1_value: Option<String>,
    pub option1_text: Option<String>,
    pub option2_value: Option<String>,
    pub option2_text: Option<String>,
    pub option3_value: Option<String>,
    pub option3_text: Option<String>,
    /// HTML checkbox; present ("on") when ticked.
    pub is_public: Option<String>,
}

impl CreateQuizForm {
    /// Collects the option slots in order, skipping any whose value is empty.
    pub fn into_new_item(self) -> NewQuizItem {
        let slots = [
            (self.option1_value, self.option1_text),
            (self.option2_value, self.option2_text),
            (self.option3_value, self.option3_text),
        ];

        let options = slots
            .into_iter()
            .filter_map(|(value, text)| match value {
                Some(value) if !value.is_empty() => Some(QuizOption {
                    value,
                    label: text.unwrap_or_default(),
                }),
                _ => None,
            })
            .collect();

        NewQuizItem {
            title: self.title,
            description: self.description,
            code: self.code,
            options,
            answer: self.answer,
            is_public: self.is_public.is_some(),
        }
    }
}

/// A quiz item as produced by the generative model, before any persistence.
///
/// Absent fields decode to empty values; only non-JSON or wrongly typed
/// output is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedQuiz {
    pub title: String,
    pub description: String,
    pub code: String,
    pub options: Vec<QuizOption>,
    pub answer: String,
}
