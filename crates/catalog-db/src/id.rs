//! # Product Id Generation
//!
//! Assigns sortable [`ProductId`]s at insert time.
//!
//! ```text
//! ┌──────────────┬──────────────────────┬──────────────┐
//! │ Utc::now()   │ uuid v4 bytes [0..5] │ AtomicU32++  │
//! │ seconds (4B) │ once per generator   │ low 24 bits  │
//! └──────────────┴──────────────────────┴──────────────┘
//! ```
//!
//! Within one process and one second the counter keeps ids strictly
//! increasing, which is what makes "inserted later" sort later in practice.

use std::sync::atomic::{AtomicU32, Ordering};

use catalog_core::ProductId;
use chrono::Utc;
use uuid::Uuid;

/// Counter values are masked to 24 bits.
const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Issues product ids for one database handle.
#[derive(Debug)]
pub struct IdGenerator {
    process: [u8; 5],
    counter: AtomicU32,
}

impl IdGenerator {
    /// Creates a generator with a random process tag and counter start.
    ///
    /// The counter starts in the lower half of its range so a burst of
    /// inserts within one second cannot wrap it.
    pub fn new() -> Self {
        let random = Uuid::new_v4();
        let bytes = random.as_bytes();

        let mut process = [0u8; 5];
        process.copy_from_slice(&bytes[..5]);
        let start = u32::from_be_bytes([0, bytes[5], bytes[6], bytes[7]]) & (COUNTER_MASK >> 1);

        IdGenerator {
            process,
            counter: AtomicU32::new(start),
        }
    }

    /// Returns the next id.
    pub fn next_id(&self) -> ProductId {
        let counter = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        ProductId::from_parts(seconds, self.process, counter)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_valid_and_increasing() {
        let generator = IdGenerator::new();
        let ids: Vec<ProductId> = (0..1000).map(|_| generator.next_id()).collect();

        for id in &ids {
            assert!(ProductId::is_valid(id.as_str()));
        }
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_timestamp_prefix_is_now() {
        let id = IdGenerator::new().next_id();
        let now = Utc::now().timestamp() as u32;
        assert!(now - id.timestamp_secs() <= 1);
    }
}
