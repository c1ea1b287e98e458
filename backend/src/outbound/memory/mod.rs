//! In-process store adapters.
//!
//! Each store keeps its records in insertion order behind a `Mutex`, which
//! gives the creation ordering the ports promise without a clock tiebreak.
//! A poisoned lock surfaces as the port's `Query` error instead of a panic.

use std::sync::{Mutex, MutexGuard};

mod comment_store;
mod member_store;
mod project_store;
mod tryout_store;

pub use comment_store::InMemoryCommentRepository;
pub use member_store::InMemoryMemberRepository;
pub use project_store::InMemoryProjectRepository;
pub use tryout_store::InMemoryTryoutRepository;

fn lock<'a, T>(records: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, String> {
    records
        .lock()
        .map_err(|_| format!("{store} store lock poisoned"))
}

/// Replace the record matching `is_same` or append `record`.
fn upsert<T>(records: &mut Vec<T>, record: T, is_same: impl Fn(&T) -> bool) {
    match records.iter_mut().find(|existing| is_same(existing)) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}
