use std::sync::atomic::{AtomicU64, Ordering};

/// Returns a process-unique connection id. The id doubles as the player id for the
/// lifetime of the socket, so it is never reused.
pub fn next_connection_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}
