//! Pagination helpers

/// `ceil(total / limit)`, with a zero limit treated as a single page
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit > 0 {
        total.div_ceil(u64::from(limit)) as u32
    } else {
        1
    }
}

/// Page/limit pair after clamping, with the matching skip offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Resolve optional query values. `page` is at least 1; `limit` falls back
    /// to `default_limit` and is clamped to `1..=max_limit`.
    pub fn resolve(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}
