use thiserror::Error;

use crate::api::errors::ApiError;
use crate::db::models::{Exam, User};

/// Everything a request can be gated on. Every handler that touches exam
/// records goes through [`authorize`] with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ViewAllExams,
    CreateExam,
    ViewExam,
    UpdateExam,
    DeleteExam,
}

impl Action {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Action::ViewAllExams => "view-all-exams",
            Action::CreateExam => "create-exam",
            Action::ViewExam => "view-exam",
            Action::UpdateExam => "update-exam",
            Action::DeleteExam => "delete-exam",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum GateError {
    #[error("access denied")]
    Denied,
    #[error("no policy defined for {}", .0.as_str())]
    Undefined(Action),
}

pub(crate) type Predicate = fn(&User, Option<&Exam>) -> bool;

/// The full policy table. An action absent from this table is denied for
/// everyone, loudly, via [`GateError::Undefined`].
pub(crate) const POLICIES: &[(Action, Predicate)] = &[
    (Action::ViewAllExams, admin_only),
    (Action::CreateExam, admin_only),
    (Action::ViewExam, owner_or_admin),
    (Action::UpdateExam, owner_only),
    (Action::DeleteExam, owner_or_admin),
];

pub(crate) fn authorize(action: Action, user: &User, exam: Option<&Exam>) -> Result<(), GateError> {
    evaluate(POLICIES, action, user, exam)
}

pub(crate) fn evaluate(
    policies: &[(Action, Predicate)],
    action: Action,
    user: &User,
    exam: Option<&Exam>,
) -> Result<(), GateError> {
    let Some((_, predicate)) = policies.iter().find(|(candidate, _)| *candidate == action) else {
        return Err(GateError::Undefined(action));
    };

    if predicate(user, exam) {
        Ok(())
    } else {
        Err(GateError::Denied)
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        if let GateError::Undefined(action) = err {
            tracing::error!(action = action.as_str(), "No policy defined for action");
        }
        ApiError::not_found()
    }
}

fn admin_only(user: &User, _exam: Option<&Exam>) -> bool {
    user.role.is_administrator()
}

fn owner_or_admin(user: &User, exam: Option<&Exam>) -> bool {
    match exam {
        Some(exam) => exam.candidate_id == user.id || user.role.is_administrator(),
        None => false,
    }
}

// Administrators deliberately get no shortcut here: a booking may only be
// amended by the candidate it belongs to.
fn owner_only(user: &User, exam: Option<&Exam>) -> bool {
    matches!(exam, Some(exam) if exam.candidate_id == user.id)
}
