pub mod answer;
pub mod error;
pub mod event;
pub mod member;
pub mod submission;
pub mod wizard;

pub use answer::{Answer, AnswerValue};
pub use error::ValidationError;
pub use event::{EventConfigError, EventForm, EventType, Question, QuestionType, Team};
pub use member::MemberData;
pub use submission::{
    Application, ParticipantData, RegistrationSubmission, TeamAnswers, validate_submission,
};
pub use wizard::{FormStep, RegistrationWizard, WizardError};
