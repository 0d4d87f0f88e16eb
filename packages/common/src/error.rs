use thiserror::Error;

/// Reasons a registration form, or a piece of it, is rejected.
///
/// The `Display` text is what the client shows to the registrant, so it is
/// phrased for humans rather than for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({field} is missing)")]
    MissingField { field: &'static str },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("This event requires exactly {expected} members")]
    TeamSizeMismatch { expected: usize, actual: usize },

    #[error("Each team member must have a unique {field}")]
    DuplicateMember { field: &'static str },

    #[error("This event expects a {expected} registration")]
    EventTypeMismatch { expected: &'static str },

    #[error("Participant details are required")]
    MissingParticipant,

    #[error("Please select at least one team")]
    NoTeamSelected,

    #[error("Only one team may be selected for this event")]
    MultipleTeamsNotAllowed,

    #[error("Team '{0}' was selected more than once")]
    DuplicateTeamSelection(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Answers were given for team '{0}' which was not selected")]
    AnswersForUnselectedTeam(String),

    #[error("Unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("Question '{0}' was answered more than once")]
    DuplicateAnswer(String),

    #[error("Please answer: {0}")]
    RequiredAnswerMissing(String),

    #[error("'{answer}' is not a valid option for: {question}")]
    InvalidOption { question: String, answer: String },

    #[error("Answer must be at least {min} characters: {question}")]
    AnswerTooShort { question: String, min: u32 },

    #[error("Answer must be at most {max} characters: {question}")]
    AnswerTooLong { question: String, max: u32 },

    #[error("Answer must be a number: {0}")]
    NotANumber(String),

    #[error("Answer must be a single value: {0}")]
    UnexpectedList(String),
}
