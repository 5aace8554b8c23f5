//! Last-issued-wins ordering for region refreshes.
//!
//! Every refresh takes a [`Ticket`] before it sends its request. When the
//! response arrives, it is rendered only if no newer ticket was issued for
//! the same region in the meantime. Superseded requests still complete;
//! their results are simply not rendered.

use std::sync::atomic::{AtomicU64, Ordering};

use cloudpanel_view::Region;

/// Proof of which refresh of a region was issued when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// Region being refreshed.
    pub region: Region,
    /// Issue order within the region, starting at 1.
    pub generation: u64,
}

/// Per-region generation counters.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    file_list: AtomicU64,
    shared_list: AtomicU64,
    quota: AtomicU64,
}

impl RefreshSequencer {
    /// Creates a sequencer with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, region: Region) -> &AtomicU64 {
        match region {
            Region::FileList => &self.file_list,
            Region::SharedList => &self.shared_list,
            Region::Quota => &self.quota,
        }
    }

    /// Issue the next ticket for `region`.
    pub fn issue(&self, region: Region) -> Ticket {
        let generation = self.counter(region).fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { region, generation }
    }

    /// Whether `ticket` is still the newest for its region.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counter(ticket.region).load(Ordering::SeqCst) == ticket.generation
    }

    /// Newest generation issued for `region`, zero if none.
    pub fn latest(&self, region: Region) -> u64 {
        self.counter(region).load(Ordering::SeqCst)
    }
}
