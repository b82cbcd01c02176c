use serde::Serialize;

use crate::domain::page::Page;
use crate::domain::types::PageNumber;

/// Page numbers shown in the pager: a window of `window_size` pages centred
/// on the current page and clamped at both ends.
///
/// With the default window of five this is `[1..5]` for pages 1-3,
/// `[total-4..total]` for the last three pages and `[current-2..current+2]`
/// in between. Lists with no more pages than the window show every page.
pub fn visible_page_window(current_page: usize, total_pages: usize, window_size: usize) -> Vec<usize> {
    if total_pages <= window_size {
        return (1..=total_pages).collect();
    }

    let half = window_size / 2;

    let start = if current_page <= half + 1 {
        1
    } else if current_page >= total_pages - half {
        total_pages - window_size + 1
    } else {
        current_page - half
    };

    (start..start + window_size).collect()
}

/// Descending sequence number of the row at zero-based `index` on `page`.
///
/// The value can drop to zero or below when the total shrank between the
/// count and the page fetch.
pub fn display_rank(total_items: u64, page: PageNumber, page_size: usize, index: usize) -> i64 {
    let offset = (page.get() as u64 - 1) * page_size as u64 + index as u64;
    total_items as i64 - offset as i64
}

/// Row paired with its display rank.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedRow<T> {
    pub rank: i64,
    #[serde(flatten)]
    pub row: T,
}

/// Display-ready table page: ranked rows and the pager window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<RankedRow<T>>,
    pub pages: Vec<usize>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: u64,
}

impl<T: Clone> Paginated<T> {
    pub fn new(page: &Page<T>, window_size: usize) -> Self {
        let items = page
            .ranked()
            .map(|(rank, row)| RankedRow {
                rank,
                row: row.clone(),
            })
            .collect();

        Self {
            items,
            pages: visible_page_window(page.page_number.get(), page.total_pages, window_size),
            page: page.page_number.get(),
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PAGE_WINDOW;

    #[test]
    fn small_lists_show_every_page() {
        for total in 0..=DEFAULT_PAGE_WINDOW {
            for current in 1..=total.max(1) {
                assert_eq!(
                    visible_page_window(current, total, DEFAULT_PAGE_WINDOW),
                    (1..=total).collect::<Vec<_>>()
                );
            }
        }
    }

    #[test]
    fn window_is_pinned_to_start() {
        for current in 1..=3 {
            assert_eq!(visible_page_window(current, 12, 5), vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn window_is_pinned_to_end() {
        for current in 10..=12 {
            assert_eq!(visible_page_window(current, 12, 5), vec![8, 9, 10, 11, 12]);
        }
    }

    #[test]
    fn window_is_centred_in_the_middle() {
        assert_eq!(visible_page_window(6, 12, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(visible_page_window(4, 12, 5), vec![2, 3, 4, 5, 6]);
        assert_eq!(visible_page_window(9, 12, 5), vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn window_always_has_window_size_pages_when_list_is_longer() {
        for total in 6..40 {
            for current in 1..=total {
                let pages = visible_page_window(current, total, 5);
                assert_eq!(pages.len(), 5);
                assert!(pages.contains(&current));
                assert!(pages[0] >= 1 && pages[4] <= total);
            }
        }
    }

    #[test]
    fn rank_counts_down_from_total() {
        let page = PageNumber::new(2).unwrap();
        assert_eq!(display_rank(25, page, 10, 0), 15);
        assert_eq!(display_rank(25, PageNumber::FIRST, 10, 0), 25);
        assert_eq!(display_rank(25, PageNumber::new(3).unwrap(), 10, 4), 1);
    }

    #[test]
    fn paginated_view_ranks_rows() {
        let page = Page::new(vec!["x", "y"], PageNumber::new(3).unwrap(), 10, 22);
        let view = Paginated::new(&page, 5);

        assert_eq!(view.page, 3);
        assert_eq!(view.pages, vec![1, 2, 3]);
        let ranks: Vec<i64> = view.items.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![2, 1]);
    }
}
