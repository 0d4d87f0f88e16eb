use common::{Answer, EventForm, EventType};

use super::xlsx::{Cell, Sheet};
use crate::models::registration::RegistrationResponse;

pub const SHEET_NAME: &str = "Registrations";
pub const FILE_NAME: &str = "registrations.xlsx";

/// Flatten one registration into a spreadsheet row.
///
/// `form` is the configuration of the registration's event, used to resolve
/// team names and question texts; ids are used as-is when it is absent.
pub fn registration_row(
    reg: &RegistrationResponse,
    form: Option<&EventForm>,
) -> Vec<(String, Cell)> {
    let mut row: Vec<(String, Cell)> = vec![
        ("Team ID".into(), Cell::Number(reg.id.into())),
        ("Event".into(), reg.event.name.as_str().into()),
        (
            "Registration Date".into(),
            reg.created_at.format("%Y-%m-%d").to_string().into(),
        ),
        ("Team Size".into(), Cell::Number(reg.members.len() as i64)),
    ];

    for (i, m) in reg.members.iter().enumerate() {
        let n = i + 1;
        row.push((format!("Member {n} Name"), m.name.as_str().into()));
        row.push((
            format!("Member {n} Reg Number"),
            m.registration_number.as_str().into(),
        ));
        row.push((format!("Member {n} Email"), m.official_email.as_str().into()));
        row.push((format!("Member {n} Phone"), m.phone_number.as_str().into()));
        row.push((format!("Member {n} Year"), m.year.as_str().into()));
        row.push((format!("Member {n} Branch"), m.branch.as_str().into()));
    }

    if reg.event_type == EventType::Recruitment {
        let names: Vec<&str> = reg
            .selected_teams
            .iter()
            .map(|id| {
                form.and_then(|f| f.team(id))
                    .map(|t| t.name.as_str())
                    .unwrap_or(id.as_str())
            })
            .collect();
        row.push(("Selected Teams".into(), names.join(", ").into()));
    }

    for a in &reg.common_answers {
        let label = common_question_label(form, &a.question_id);
        push_answer(&mut row, label, a);
    }
    for ta in &reg.team_answers {
        let team = form.and_then(|f| f.team(&ta.team_id));
        let team_name = team.map(|t| t.name.as_str()).unwrap_or(ta.team_id.as_str());
        for a in &ta.answers {
            let text = team
                .and_then(|t| t.questions.iter().find(|q| q.id == a.question_id))
                .map(|q| q.question.as_str())
                .unwrap_or(a.question_id.as_str());
            push_answer(&mut row, format!("{team_name}: {text}"), a);
        }
    }
    row
}

/// Question texts are not unique, so a label already used in this row gets
/// the question id appended.
fn push_answer(row: &mut Vec<(String, Cell)>, label: String, answer: &Answer) {
    let label = if row.iter().any(|(h, _)| *h == label) {
        format!("{label} ({})", answer.question_id)
    } else {
        label
    };
    row.push((label, answer.answer.display().into()));
}

fn common_question_label(form: Option<&EventForm>, question_id: &str) -> String {
    form.and_then(|f| f.common_questions.iter().find(|q| q.id == question_id))
        .map(|q| q.question.clone())
        .unwrap_or_else(|| question_id.to_string())
}

/// Lay out registrations as the export sheet.
pub fn registrations_sheet<'a, F>(registrations: &[RegistrationResponse], form_of: F) -> Sheet
where
    F: Fn(i32) -> Option<&'a EventForm>,
{
    let mut sheet = Sheet::new();
    for reg in registrations {
        sheet.push_row(registration_row(reg, form_of(reg.event.id)));
    }
    sheet
}
