mod create;
mod list;
mod manage;

pub(super) use create::create_exam;
pub(super) use list::{list_exams, search_exams};
pub(super) use manage::{delete_exam, get_exam, update_exam};
