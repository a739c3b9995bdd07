//! Pagination cursor.

/// Position marker for sequential page fetches.
///
/// Advances only after a non-empty page has been merged; rewinds only via
/// [`reset`](PageCursor::reset) (pull-to-refresh or a query change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self { page: 0, page_size }
    }

    pub fn advance(&mut self) {
        self.page += 1;
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advance_and_reset() {
        let mut cursor = PageCursor::new(20);
        assert_eq!(cursor.page, 0);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.page, 2);
        cursor.reset();
        assert_eq!(cursor.page, 0);
        assert_eq!(cursor.page_size, 20);
    }
}
