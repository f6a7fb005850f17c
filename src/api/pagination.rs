use serde::Serialize;

use crate::schemas::exam::ExamResource;

#[derive(Debug, Serialize)]
pub(crate) struct PageLinks {
    pub(crate) first: String,
    pub(crate) last: String,
    pub(crate) prev: Option<String>,
    pub(crate) next: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageMeta {
    pub(crate) current_page: i64,
    pub(crate) from: Option<i64>,
    pub(crate) last_page: i64,
    pub(crate) per_page: i64,
    pub(crate) to: Option<i64>,
    pub(crate) total: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamPage {
    pub(crate) exams: Vec<ExamResource>,
    pub(crate) links: PageLinks,
    pub(crate) meta: PageMeta,
}

pub(crate) fn page_meta(total: i64, page: i64, per_page: i64, count: usize) -> PageMeta {
    let last_page = last_page(total, per_page);
    let (from, to) = if count > 0 {
        let first = (page - 1) * per_page + 1;
        (Some(first), Some(first + count as i64 - 1))
    } else {
        (None, None)
    };

    PageMeta { current_page: page, from, last_page, per_page, to, total }
}

pub(crate) fn page_links(path: &str, page: i64, last_page: i64) -> PageLinks {
    PageLinks {
        first: format!("{path}?page=1"),
        last: format!("{path}?page={last_page}"),
        prev: (page > 1).then(|| format!("{path}?page={}", page - 1)),
        next: (page < last_page).then(|| format!("{path}?page={}", page + 1)),
    }
}

fn last_page(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page.max(1)
}
