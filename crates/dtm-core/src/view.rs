//! View projector: search, sort, and paging over the canonical rows.
//!
//! The projection is recomputed on every call and borrows from the rows; it
//! owns nothing and is never cached.

use std::cmp::Ordering;
use std::fmt;

use dtm_model::{CellValue, PAGE_SIZE, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// Transient view settings. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    search: String,
    sort: Option<SortSpec>,
    page: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the search query and go back to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Header click: unsorted, ascending, descending, unsorted again.
    ///
    /// A column other than the current sort column starts at ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(SortSpec {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortSpec {
                column: current,
                direction: SortDirection::Descending,
            }),
            Some(SortSpec {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortSpec {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        tracing::debug!(column, sort = ?self.sort, "toggled sort");
    }

    /// Filter, sort, then slice out the current page.
    pub fn project<'a>(&self, rows: &'a [Row]) -> Projection<'a> {
        let query = self.search.to_lowercase();
        let mut matched: Vec<&Row> = rows
            .iter()
            .filter(|row| matches_query(row, &query))
            .collect();

        if let Some(sort) = &self.sort {
            let compare = |a: &&Row, b: &&Row| {
                let ordering = compare_rows(a, b, &sort.column);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            };
            merge_sort(&mut matched, &compare);
        }

        let filtered_count = matched.len();
        let rows = matched
            .into_iter()
            .skip(self.page.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect();

        Projection {
            rows,
            filtered_count,
            page: self.page,
            page_count: filtered_count.div_ceil(PAGE_SIZE),
        }
    }
}

/// The page of rows to display plus paging information.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    pub rows: Vec<&'a Row>,
    /// Rows passing the search filter, across all pages.
    pub filtered_count: usize,
    pub page: usize,
    pub page_count: usize,
}

/// True when any field's text contains `query`. `query` must already be
/// lower-cased; an empty query matches everything.
pub fn matches_query(row: &Row, query: &str) -> bool {
    query.is_empty()
        || row
            .fields()
            .any(|(_, value)| value.to_string().to_lowercase().contains(query))
}

/// Compare two rows on one column.
///
/// Numbers compare numerically when both sides are numbers, anything else
/// compares as lower-cased text. A missing value on either side compares
/// equal, which leaves such pairs in their original order.
pub fn compare_rows(a: &Row, b: &Row, column: &str) -> Ordering {
    let (Some(left), Some(right)) = (a.get(column), b.get(column)) else {
        return Ordering::Equal;
    };
    match (left.as_ref(), right.as_ref()) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (x, y) => x.to_string().to_lowercase().cmp(&y.to_string().to_lowercase()),
    }
}

/// Stable merge sort.
///
/// `compare_rows` is not a total order (missing values are equal to
/// everything), which the std sorts are allowed to reject.
fn merge_sort<T: Copy>(items: &mut [T], compare: &impl Fn(&T, &T) -> Ordering) {
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], compare);
    merge_sort(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(items.len());
    let (mut left, mut right) = (0, mid);
    while left < mid && right < items.len() {
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right]);
            right += 1;
        } else {
            merged.push(items[left]);
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..]);
    items.copy_from_slice(&merged);
}
