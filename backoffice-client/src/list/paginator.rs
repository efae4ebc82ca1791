//! Page window computation
//!
//! Pure function from `(total_pages, current_page, max_visible)` to the
//! tokens a paginator shows. With more pages than buttons the first and last
//! pages are always present, a contiguous window surrounds the current page
//! and ellipses stand in for the hidden ranges:
//!
//! ```text
//! (20, 10, 7) -> 1 … 9 10 11 … 20
//! (20,  2, 7) -> 1 2 3 4 5 … 20
//! (20, 19, 7) -> 1 … 16 17 18 19 20
//! ```

use serde::Serialize;

/// Smallest width that fits first, ellipsis, current, ellipsis, last
pub const MIN_VISIBLE: usize = 5;

/// One paginator slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

impl PageToken {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageToken::Page(n) => Some(*n),
            PageToken::Ellipsis => None,
        }
    }
}

/// Clamp `page` to `[1, total_pages]` (1 when there are no pages)
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Compute the paginator tokens
///
/// Returns exactly `max_visible` tokens when `total_pages > max_visible`, and
/// never two ellipses in a row. `max_visible` below [`MIN_VISIBLE`] is raised
/// to it.
pub fn page_window(total_pages: u32, current_page: u32, max_visible: usize) -> Vec<PageToken> {
    if total_pages == 0 {
        return Vec::new();
    }
    let max_visible = u32::try_from(max_visible.max(MIN_VISIBLE)).unwrap_or(u32::MAX);
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let current = clamp_page(current_page, total_pages);
    // Window size when both ellipses are shown
    let inner = max_visible - 4;
    let start = current.saturating_sub((inner - 1) / 2);
    let end = start + inner - 1;

    let mut tokens = Vec::with_capacity(max_visible as usize);
    if start <= 3 {
        // Near the beginning: 1..=(max-2) … last
        tokens.extend((1..=max_visible - 2).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total_pages));
    } else if end >= total_pages - 2 {
        // Near the end: 1 … (last-max+3)..=last
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        tokens.extend((total_pages + 3 - max_visible..=total_pages).map(PageToken::Page));
    } else {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        tokens.extend((start..=end).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total_pages));
    }
    tokens
}
