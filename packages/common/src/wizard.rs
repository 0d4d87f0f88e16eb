//! Step-by-step registration form.
//!
//! The wizard owns a draft of the submission and walks the registrant through
//! the pages the selected event needs. Every forward move validates the page
//! being left; a rejected move leaves the wizard where it was.

use thiserror::Error;

use crate::answer::{Answer, validate_answers};
use crate::error::ValidationError;
use crate::event::{EventForm, EventType};
use crate::member::{MemberData, validate_members};
use crate::submission::{
    ParticipantData, RegistrationSubmission, TeamAnswers, answers_for_team, validate_submission,
    validate_team_selection,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormStep {
    EventSelection,
    /// Details of the team member at this index.
    Member(usize),
    /// Details of a recruitment applicant.
    Participant,
    CommonQuestions,
    TeamSelection,
    /// Questions of the selected team at this index of the selection.
    TeamQuestions(usize),
    Review,
    Submitting,
    Success,
    /// The server rejected the submission; the draft is kept for a retry.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Please select an event")]
    NoEventSelected,
    #[error("Action not available at step {0:?}")]
    NotAllowed(FormStep),
    #[error("No such form page")]
    OutOfRange,
}

#[derive(Clone, Debug, Default)]
struct Draft {
    members: Vec<MemberData>,
    participant: MemberData,
    common_answers: Vec<Answer>,
    selected_teams: Vec<String>,
    team_answers: Vec<TeamAnswers>,
}

#[derive(Clone, Debug)]
pub struct RegistrationWizard {
    step: FormStep,
    event: Option<(i32, EventForm)>,
    draft: Draft,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self {
            step: FormStep::EventSelection,
            event: None,
            draft: Draft::default(),
        }
    }

    pub fn step(&self) -> &FormStep {
        &self.step
    }

    pub fn event_id(&self) -> Option<i32> {
        self.event.as_ref().map(|(id, _)| *id)
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        match self.step {
            FormStep::Submitting | FormStep::Success => {
                Err(WizardError::NotAllowed(self.step.clone()))
            }
            _ => Ok(()),
        }
    }

    fn form(&self) -> Result<&EventForm, WizardError> {
        self.event
            .as_ref()
            .map(|(_, form)| form)
            .ok_or(WizardError::NoEventSelected)
    }

    /// Pick the event to register for. Any previous draft is discarded.
    pub fn select_event(&mut self, event_id: i32, form: EventForm) -> Result<(), WizardError> {
        if self.step == FormStep::Submitting {
            return Err(WizardError::NotAllowed(self.step.clone()));
        }
        self.draft = Draft {
            members: vec![MemberData::default(); form.member_count()],
            ..Draft::default()
        };
        self.event = Some((event_id, form));
        self.step = FormStep::EventSelection;
        Ok(())
    }

    pub fn set_member(&mut self, index: usize, member: MemberData) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let slot = self
            .draft
            .members
            .get_mut(index)
            .ok_or(WizardError::OutOfRange)?;
        *slot = member;
        Ok(())
    }

    pub fn set_participant(&mut self, member: MemberData) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.participant = member;
        Ok(())
    }

    pub fn set_common_answers(&mut self, answers: Vec<Answer>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.common_answers = answers;
        Ok(())
    }

    /// Replace the team choice. A changed choice made past the selection page
    /// sends the wizard back to it, since the team question pages move with it.
    pub fn select_teams(&mut self, team_ids: Vec<String>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if team_ids == self.draft.selected_teams {
            return Ok(());
        }
        self.draft.selected_teams = team_ids;
        if matches!(
            self.step,
            FormStep::TeamQuestions(_) | FormStep::Review | FormStep::Failed(_)
        ) {
            self.step = FormStep::TeamSelection;
        }
        Ok(())
    }

    pub fn set_team_answers(
        &mut self,
        team_id: &str,
        answers: Vec<Answer>,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        match self
            .draft
            .team_answers
            .iter_mut()
            .find(|ta| ta.team_id == team_id)
        {
            Some(entry) => entry.answers = answers,
            None => self.draft.team_answers.push(TeamAnswers {
                team_id: team_id.to_string(),
                answers,
            }),
        }
        Ok(())
    }

    /// Ordered pages for the selected event and the current team choice.
    fn pages(&self) -> Vec<FormStep> {
        let mut pages = vec![FormStep::EventSelection];
        let Some((_, form)) = &self.event else {
            return pages;
        };

        match form.event_type {
            EventType::TeamRegistration => {
                pages.extend((0..form.member_count()).map(FormStep::Member));
            }
            EventType::Recruitment => pages.push(FormStep::Participant),
        }
        if !form.common_questions.is_empty() {
            pages.push(FormStep::CommonQuestions);
        }
        if form.event_type == EventType::Recruitment {
            pages.push(FormStep::TeamSelection);
            for (i, id) in self.draft.selected_teams.iter().enumerate() {
                if form.team(id).is_some_and(|t| !t.questions.is_empty()) {
                    pages.push(FormStep::TeamQuestions(i));
                }
            }
        }
        pages.push(FormStep::Review);
        pages
    }

    fn validate_current(&mut self) -> Result<(), WizardError> {
        let step = self.step.clone();
        let form = self.form()?;
        match step {
            FormStep::EventSelection => Ok(()),
            FormStep::Member(i) => {
                let filled = self
                    .draft
                    .members
                    .get(..=i)
                    .ok_or(WizardError::OutOfRange)?;
                Ok(validate_members(filled)?)
            }
            FormStep::Participant => Ok(self.draft.participant.validate()?),
            FormStep::CommonQuestions => Ok(validate_answers(
                &form.common_questions,
                &self.draft.common_answers,
            )?),
            FormStep::TeamSelection => {
                validate_team_selection(form, &self.draft.selected_teams)?;
                let selected = self.draft.selected_teams.clone();
                self.draft
                    .team_answers
                    .retain(|ta| selected.contains(&ta.team_id));
                Ok(())
            }
            FormStep::TeamQuestions(i) => {
                let team_id = self
                    .draft
                    .selected_teams
                    .get(i)
                    .ok_or(WizardError::OutOfRange)?;
                let team = form
                    .team(team_id)
                    .ok_or_else(|| ValidationError::UnknownTeam(team_id.clone()))?;
                Ok(validate_answers(
                    &team.questions,
                    answers_for_team(&self.draft.team_answers, team_id),
                )?)
            }
            other => Err(WizardError::NotAllowed(other)),
        }
    }

    /// Validate the current page and move to the next one.
    pub fn advance(&mut self) -> Result<&FormStep, WizardError> {
        self.form()?;
        self.validate_current()?;
        let pages = self.pages();
        let pos = pages
            .iter()
            .position(|p| *p == self.step)
            .ok_or_else(|| WizardError::NotAllowed(self.step.clone()))?;
        let next = pages
            .get(pos + 1)
            .cloned()
            .ok_or_else(|| WizardError::NotAllowed(self.step.clone()))?;
        self.step = next;
        Ok(&self.step)
    }

    /// Go back one page without validating.
    pub fn back(&mut self) -> Result<&FormStep, WizardError> {
        let pages = self.pages();
        let pos = pages
            .iter()
            .position(|p| *p == self.step)
            .ok_or_else(|| WizardError::NotAllowed(self.step.clone()))?;
        if pos > 0 {
            self.step = pages[pos - 1].clone();
        }
        Ok(&self.step)
    }

    fn build_submission(&self, event_id: i32, form: &EventForm) -> RegistrationSubmission {
        match form.event_type {
            EventType::TeamRegistration => RegistrationSubmission {
                event_id,
                event_type: EventType::TeamRegistration,
                members: Some(self.draft.members.clone()),
                participant: None,
                common_answers: self.draft.common_answers.clone(),
            },
            EventType::Recruitment => RegistrationSubmission {
                event_id,
                event_type: EventType::Recruitment,
                members: None,
                participant: Some(ParticipantData {
                    member: self.draft.participant.clone(),
                    selected_teams: self.draft.selected_teams.clone(),
                    common_answers: self.draft.common_answers.clone(),
                    team_answers: self.draft.team_answers.clone(),
                }),
                common_answers: Vec::new(),
            },
        }
    }

    /// Leave the review page and hand out the payload to send.
    pub fn begin_submit(&mut self) -> Result<RegistrationSubmission, WizardError> {
        if self.step != FormStep::Review {
            return Err(WizardError::NotAllowed(self.step.clone()));
        }
        let (event_id, form) = self.event.as_ref().ok_or(WizardError::NoEventSelected)?;
        let submission = self.build_submission(*event_id, form);
        validate_submission(form, &submission)?;
        self.step = FormStep::Submitting;
        Ok(submission)
    }

    /// Record the server's verdict. Success clears the form; failure keeps it.
    pub fn finish(&mut self, outcome: Result<(), String>) -> Result<&FormStep, WizardError> {
        if self.step != FormStep::Submitting {
            return Err(WizardError::NotAllowed(self.step.clone()));
        }
        match outcome {
            Ok(()) => {
                self.event = None;
                self.draft = Draft::default();
                self.step = FormStep::Success;
            }
            Err(message) => self.step = FormStep::Failed(message),
        }
        Ok(&self.step)
    }

    /// Return to the review page after a failed submission.
    pub fn retry(&mut self) -> Result<&FormStep, WizardError> {
        match self.step {
            FormStep::Failed(_) => {
                self.step = FormStep::Review;
                Ok(&self.step)
            }
            _ => Err(WizardError::NotAllowed(self.step.clone())),
        }
    }

    /// Start a fresh registration after a successful one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
