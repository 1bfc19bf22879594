//! Window calculation.
//!
//! Turns Relay pagination arguments into the `first=`/`rows=` terms of the
//! legacy filter string. Bounds are applied the way the Relay reference
//! algorithm does: `after` and `before` cut the range, `first` trims it from
//! the back, then `last` trims it from the front.

use crate::error::{PaginationError, PaginationResult};
use crate::models::{FIRST_KEYWORD, FilterTermString, ROWS_KEYWORD};
use crate::ports::{Pagination, Window};

use super::cursor::decode_cursor;

/// Which end of the range the page is anchored to.
///
/// Only affects the order in which the window terms are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirection {
    /// Anchored at the start (`first`, `after`).
    Forward,
    /// Anchored at the end (`last`).
    Backward,
}

/// Resolve pagination arguments into a window.
///
/// Returns `None` when no bound and no size was supplied, meaning the filter
/// should pass through untouched.
pub fn resolve_window(
    pagination: &Pagination,
) -> PaginationResult<Option<(Window, WindowDirection)>> {
    if pagination.is_unbounded() {
        return Ok(None);
    }

    let first = non_negative("first", pagination.first)?;
    let last = non_negative("last", pagination.last)?;
    let after = pagination.after.as_ref().map(decode_cursor).transpose()?;
    let before = pagination.before.as_ref().map(decode_cursor).transpose()?;

    let mut start = after.map_or(0, |index| index.saturating_add(1));
    // `before` is exclusive. A `before` at or behind `after` yields an empty window.
    let mut end = before.map(|index| index.max(start));

    if let Some(first) = first {
        let capped = start.saturating_add(first);
        end = Some(end.map_or(capped, |end| end.min(capped)));
    }

    // With only `after` to anchor it, `last` sizes a page read forward from the cursor.
    let mut last = last;
    if end.is_none() && after.is_some() {
        if let Some(size) = last.take() {
            end = Some(start.saturating_add(size));
        }
    }

    let Some(end) = end else {
        let reason = if last.is_some() {
            "`last` requires a `before` cursor or `first`"
        } else {
            "`first` or `last` is required when paginating with `after`"
        };
        return Err(PaginationError::InvalidPaginationArgument(reason.to_string()));
    };

    let direction = match last {
        Some(last) => {
            start = start.max(end.saturating_sub(last));
            WindowDirection::Backward
        }
        None => WindowDirection::Forward,
    };

    Ok(Some((
        Window {
            offset: start,
            limit: end - start,
        },
        direction,
    )))
}

/// Compute the filter string that fetches the requested page.
///
/// Residual `first=`/`rows=` terms of the incoming filter are replaced. When
/// no pagination argument is given the filter is returned as is.
pub fn apply_window(
    filter: &FilterTermString,
    pagination: &Pagination,
) -> PaginationResult<FilterTermString> {
    let Some((window, direction)) = resolve_window(pagination)? else {
        return Ok(filter.clone());
    };

    let stripped = filter.remove_term(ROWS_KEYWORD).remove_term(FIRST_KEYWORD);
    // The protocol counts rows from 1.
    let first_row = window.offset.saturating_add(1);

    let windowed = match direction {
        WindowDirection::Forward => stripped
            .add_term(FIRST_KEYWORD, first_row)
            .add_term(ROWS_KEYWORD, window.limit),
        WindowDirection::Backward => stripped
            .add_term(ROWS_KEYWORD, window.limit)
            .add_term(FIRST_KEYWORD, first_row),
    };

    Ok(windowed)
}

fn non_negative(name: &str, value: Option<i32>) -> PaginationResult<Option<u64>> {
    value
        .map(|v| {
            u64::try_from(v).map_err(|_| {
                PaginationError::InvalidPaginationArgument(format!(
                    "`{name}` must be non-negative, got {v}"
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::encode_cursor;
    use crate::ports::Cursor;

    fn args(
        first: Option<i32>,
        after: Option<u64>,
        last: Option<i32>,
        before: Option<u64>,
    ) -> Pagination {
        Pagination {
            first,
            after: after.map(|i| encode_cursor("task", i)),
            last,
            before: before.map(|i| encode_cursor("task", i)),
        }
    }

    fn window(pagination: &Pagination) -> Window {
        resolve_window(pagination).unwrap().unwrap().0
    }

    #[test]
    fn test_forward_window() {
        let filter = apply_window(&FilterTermString::new(""), &args(Some(5), Some(10), None, None));
        assert_eq!(filter.unwrap().as_str(), "first=12 rows=5");
    }

    #[test]
    fn test_backward_window_replaces_residual_terms() {
        let filter = apply_window(
            &FilterTermString::new("lorem rows=5 first=1"),
            &args(None, None, Some(10), Some(123)),
        );
        assert_eq!(filter.unwrap().as_str(), "lorem rows=10 first=114");
    }

    #[test]
    fn test_after_with_last_reads_forward() {
        let pagination = args(None, Some(10), Some(5), None);
        assert_eq!(window(&pagination), Window { offset: 11, limit: 5 });

        let filter = apply_window(&FilterTermString::new("rows=100"), &pagination);
        assert_eq!(filter.unwrap().as_str(), "first=12 rows=5");
    }

    #[test]
    fn test_first_only_starts_at_beginning() {
        let filter = apply_window(
            &FilterTermString::new("name~openvas rows=100"),
            &args(Some(20), None, None, None),
        );
        assert_eq!(filter.unwrap().as_str(), "name~openvas first=1 rows=20");
    }

    #[test]
    fn test_unfiltered_when_no_arguments() {
        let original = FilterTermString::new("lorem rows=5 first=1");
        let filter = apply_window(&original, &Pagination::default()).unwrap();
        assert_eq!(filter, original);

        let unset = FilterTermString::from_optional(None);
        assert_eq!(apply_window(&unset, &Pagination::default()).unwrap().as_str(), "");
    }

    // Test critique: before - last négatif => la fenêtre rétrécit, pas d'erreur
    #[test]
    fn test_backward_window_clamps_at_zero() {
        let w = window(&args(None, None, Some(10), Some(4)));
        assert_eq!(w, Window { offset: 0, limit: 4 });

        let filter =
            apply_window(&FilterTermString::default(), &args(None, None, Some(10), Some(4)));
        assert_eq!(filter.unwrap().as_str(), "rows=4 first=1");
    }

    #[test]
    fn test_bidirectional_window() {
        // after=10, before=20 bounds [11, 20); first=5 keeps [11, 16); last=2 keeps [14, 16)
        let w = window(&args(Some(5), Some(10), Some(2), Some(20)));
        assert_eq!(w, Window { offset: 14, limit: 2 });

        // first larger than the bounded range is capped by before
        let w = window(&args(Some(50), Some(10), None, Some(20)));
        assert_eq!(w, Window { offset: 11, limit: 9 });
    }

    #[test]
    fn test_cursor_range_without_sizes() {
        let w = window(&args(None, Some(3), None, Some(8)));
        assert_eq!(w, Window { offset: 4, limit: 4 });

        // before at or before after gives an empty window
        let w = window(&args(None, Some(8), None, Some(3)));
        assert_eq!(w, Window { offset: 9, limit: 0 });
    }

    #[test]
    fn test_before_only() {
        let w = window(&args(None, None, None, Some(7)));
        assert_eq!(w, Window { offset: 0, limit: 7 });
    }

    #[test]
    fn test_first_and_last_without_cursors() {
        let w = window(&args(Some(10), None, Some(3), None));
        assert_eq!(w, Window { offset: 7, limit: 3 });
    }

    #[test]
    fn test_zero_sized_window() {
        let filter = apply_window(&FilterTermString::default(), &args(Some(0), None, None, None));
        assert_eq!(filter.unwrap().as_str(), "first=1 rows=0");
    }

    #[test]
    fn test_negative_sizes_are_rejected() {
        for pagination in [
            args(Some(-1), None, None, None),
            args(None, None, Some(-5), Some(10)),
        ] {
            let err = apply_window(&FilterTermString::default(), &pagination).unwrap_err();
            assert!(matches!(err, PaginationError::InvalidPaginationArgument(_)));
        }
    }

    #[test]
    fn test_missing_size_is_rejected() {
        let err = resolve_window(&args(None, Some(10), None, None)).unwrap_err();
        assert!(err.to_string().contains("is required when paginating with `after`"));

        let err = resolve_window(&args(None, None, Some(10), None)).unwrap_err();
        assert!(err.to_string().contains("`last` requires"));
    }

    #[test]
    fn test_corrupted_cursor_is_rejected() {
        let pagination = Pagination {
            first: Some(10),
            after: Some(Cursor {
                value: "garbage!".into(),
            }),
            ..Default::default()
        };
        let err = apply_window(&FilterTermString::default(), &pagination).unwrap_err();
        assert!(matches!(err, PaginationError::InvalidCursor(_)));
    }
}
