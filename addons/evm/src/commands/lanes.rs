use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use alloy::primitives::Address;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One FIFO lane per sender address.
///
/// A lane is held from signing-context construction until the node has
/// accepted (or rejected) the transaction, so two submissions from the same
/// sender never observe the same pending nonce. Waiters are served in the
/// order they queued; dropping a waiting future leaves the queue untouched.
#[derive(Clone, Default)]
pub struct SenderLanes {
    lanes: Arc<Mutex<HashMap<Address, Arc<AsyncMutex<()>>>>>,
}

pub struct LaneGuard {
    sender: Address,
    _guard: OwnedMutexGuard<()>,
}

impl LaneGuard {
    pub fn sender(&self) -> Address {
        self.sender
    }
}

impl SenderLanes {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, sender: Address) -> LaneGuard {
        let lane = {
            let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
            // held or awaited lanes have a second owner
            lanes.retain(|_, lane| Arc::strong_count(lane) > 1);
            lanes.entry(sender).or_default().clone()
        };
        LaneGuard { sender, _guard: lane.lock_owned().await }
    }

    /// Senders with a lane currently held or awaited, plus any idle lanes not
    /// yet pruned by the next `acquire`.
    pub fn tracked_senders(&self) -> usize {
        self.lanes.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_busy(&self, sender: &Address) -> bool {
        let lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        lanes.get(sender).map(|lane| lane.try_lock().is_err()).unwrap_or(false)
    }
}
