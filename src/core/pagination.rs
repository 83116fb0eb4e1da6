use crate::models::record::TimeRecord;

/// Rows-per-page choices offered by `list --limit`.
pub const LIMIT_OPTIONS: [usize; 7] = [10, 20, 30, 40, 50, 100, 200];

pub struct Page<'a> {
    pub items: Vec<&'a TimeRecord>,
    pub page: usize,
    pub limit: usize,
    /// Closed records across all pages.
    pub total: usize,
}

impl Page<'_> {
    pub fn page_count(&self) -> usize {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pages start at 1; anything lower is page 1.
pub fn clamp_page(page: i64) -> usize {
    page.max(1) as usize
}

/// `items[(page-1)*limit .. page*limit]`, bounded by the slice length.
pub fn paginate<T>(items: &[T], page: usize, limit: usize) -> &[T] {
    let (start, end) = if page > 1 {
        ((page - 1).saturating_mul(limit), page.saturating_mul(limit))
    } else {
        (0, limit)
    };

    let end = end.min(items.len());
    let start = start.min(end);
    &items[start..end]
}

pub fn is_valid_limit(limit: usize) -> bool {
    LIMIT_OPTIONS.contains(&limit)
}
