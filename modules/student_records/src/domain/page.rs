use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Selectable rows-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    Hundred,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported page size {0} (expected one of 5, 10, 25, 100)")]
pub struct InvalidPageSize(pub usize);

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Hundred,
    ];

    pub const fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(rows: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.get() == rows)
            .ok_or(InvalidPageSize(rows))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Zero-based page index over a collection sliced into `size`-row pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    page: usize,
    size: PageSize,
}

impl PageWindow {
    pub fn new(size: PageSize) -> Self {
        Self { page: 0, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Index of the first row of the current page (may lie past `len`).
    pub fn start(&self) -> usize {
        self.page * self.size.get()
    }

    /// Rows of a `len`-long collection that the current page shows.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.start().min(len);
        let end = (self.start() + self.size.get()).min(len);
        start..end
    }

    pub fn row_count(&self, len: usize) -> usize {
        self.range(len).len()
    }

    /// Number of pages needed for `len` rows; zero rows still make one page.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.size.get()).max(1)
    }

    /// `max(0, ceil(len / size) - 1)`.
    pub fn last_page(&self, len: usize) -> usize {
        self.page_count(len) - 1
    }

    /// Move to `page`, never past the last page of `len` rows.
    pub fn set_page(&mut self, page: usize, len: usize) {
        self.page = page.min(self.last_page(len));
    }

    /// Change the page size; the window returns to the first page.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 0;
    }

    pub fn go_to_last(&mut self, len: usize) {
        self.page = self.last_page(len);
    }

    /// Pull the index back onto the last page if the collection shrank
    /// beneath it. Returns `true` when the index moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = self.last_page(len);
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }
}
