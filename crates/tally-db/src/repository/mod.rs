//! # Repositories
//!
//! One repository per table. Each exposes inherent methods returning
//! [`DbResult`](crate::error::DbResult) and implements the matching
//! `tally-engine` store port on top of them.
//!
//! Every read filters `deleted_at IS NULL`; every list is ordered by id.

pub mod customer;
pub mod item;
pub mod transaction;

use tally_core::Page;

/// `(limit, offset)` for a `LIMIT ? OFFSET ?` clause. SQLite reads a
/// negative limit as "no limit".
pub(crate) fn bounds(page: Page) -> (i64, i64) {
    let limit = if page.limit == 0 {
        -1
    } else {
        i64::from(page.limit)
    };
    (limit, i64::from(page.offset))
}
