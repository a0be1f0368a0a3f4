/// Pagination state for list endpoints.
///
/// Owns the explicit loading flag so a screen cannot double-fetch:
/// [`Pager::begin`] refuses to hand out a page number while a load is in
/// flight or after the final page has arrived. Pages are 1-based.
#[derive(Debug, Clone)]
pub struct Pager {
    page: u32,
    per_page: u32,
    loading: bool,
    done: bool,
}

impl Pager {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            loading: false,
            done: false,
        }
    }

    /// Claim the next page number, or `None` if a load is already running
    /// or everything has been fetched.
    pub fn begin(&mut self) -> Option<u32> {
        if self.loading || self.done {
            return None;
        }
        self.loading = true;
        Some(self.page + 1)
    }

    /// Record a completed page. A short page marks the pager done.
    pub fn complete(&mut self, received: usize) {
        self.loading = false;
        self.page += 1;
        if (received as u32) < self.per_page {
            self.done = true;
        }
    }

    /// Release the guard after a failed load without advancing.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Query pairs for the given page, in the shape list endpoints expect.
    pub fn query(&self, page: u32) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}
