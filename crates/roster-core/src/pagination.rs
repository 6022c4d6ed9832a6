//! Cursor pagination over a newest-first scan.
//!
//! The store is asked for one row more than the page size. That extra row, if
//! it arrives, is not returned; its id becomes the cursor of the next page
//! (cursors are inclusive, so it will lead that page). The page is then
//! flipped so callers see it oldest-first.

use serde::Serialize;

/// One page of results plus the token that resumes the scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items:       Vec<T>,
  /// Absent once the end of the sequence is reached.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_cursor: Option<String>,
}

/// How many rows to request from the store for a page of `limit` items.
pub fn fetch_size(limit: usize) -> usize { limit + 1 }

/// Shape `rows` (as returned by a newest-first scan of [`fetch_size`] rows)
/// into a page of at most `limit` items.
pub fn paginate<T>(
  mut rows: Vec<T>,
  limit: usize,
  cursor_of: impl FnOnce(&T) -> String,
) -> Page<T> {
  let mut next_cursor = None;
  if rows.len() > limit {
    rows.truncate(fetch_size(limit));
    next_cursor = rows.pop().as_ref().map(cursor_of);
  }
  rows.reverse();
  Page {
    items: rows,
    next_cursor,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ids(n: u32) -> Vec<u32> {
    // Newest-first, as the store returns them.
    (1..=n).rev().collect()
  }

  #[test]
  fn empty_input_gives_empty_page() {
    let page = paginate(Vec::<u32>::new(), 50, u32::to_string);
    assert!(page.items.is_empty());
    assert_eq!(page.next_cursor, None);
  }

  #[test]
  fn short_scan_has_no_cursor() {
    let page = paginate(ids(3), 5, u32::to_string);
    assert_eq!(page.items, vec![1, 2, 3]);
    assert_eq!(page.next_cursor, None);
  }

  #[test]
  fn exact_fit_has_no_cursor() {
    let page = paginate(ids(2), 2, u32::to_string);
    assert_eq!(page.items, vec![1, 2]);
    assert_eq!(page.next_cursor, None);
  }

  #[test]
  fn extra_row_becomes_cursor() {
    let page = paginate(ids(3), 2, u32::to_string);
    assert_eq!(page.items, vec![2, 3]);
    assert_eq!(page.next_cursor.as_deref(), Some("1"));
  }

  #[test]
  fn oversized_scan_is_trimmed() {
    // [10, 9, ..., 1]; only [10, 9, 8] belong to a limit-2 fetch.
    let page = paginate(ids(10), 2, u32::to_string);
    assert_eq!(page.items, vec![9, 10]);
    assert_eq!(page.next_cursor.as_deref(), Some("8"));
  }

  #[test]
  fn absent_cursor_is_omitted_on_the_wire() {
    let page: Page<u32> = Page { items: Vec::new(), next_cursor: None };
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json, serde_json::json!({ "items": [] }));

    let page = paginate(ids(2), 1, u32::to_string);
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json, serde_json::json!({ "items": [2], "nextCursor": "1" }));
  }
}
