use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};
use cubed_mesh_cpu::MeshJob;

/// Scheduling tier. Normal work is always acquired and drained before low.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Normal,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Normal, Tier::Low];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub tier: Tier,
    pub index: usize,
}

type Slot = Mutex<Option<Arc<MeshJob>>>;

/// Fixed set of job slots shared by the main thread (producer and consumer of results)
/// and the single worker (runs jobs).
///
/// A slot is free when it holds no job. It is filled by [`JobSlotPool::install`] and
/// emptied by [`JobSlotPool::clear`] once the job has finished and its output was taken.
pub struct JobSlotPool {
    normal: Box<[Slot]>,
    low: Box<[Slot]>,
    doorbell_tx: Sender<()>,
    doorbell_rx: Receiver<()>,
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Arc<MeshJob>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl JobSlotPool {
    pub fn new(slots_per_tier: usize) -> Self {
        let make = || (0..slots_per_tier).map(|_| Mutex::new(None)).collect::<Box<[Slot]>>();
        // One pending ring is enough: the worker rescans every slot when woken.
        let (doorbell_tx, doorbell_rx) = bounded(1);
        Self {
            normal: make(),
            low: make(),
            doorbell_tx,
            doorbell_rx,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.normal.len()
    }

    fn tier(&self, tier: Tier) -> &[Slot] {
        match tier {
            Tier::Normal => &self.normal,
            Tier::Low => &self.low,
        }
    }

    fn slot(&self, id: SlotId) -> &Slot {
        &self.tier(id.tier)[id.index]
    }

    /// First free slot of `tier`, or `None` when the tier is exhausted.
    pub fn acquire(&self, tier: Tier) -> Option<SlotId> {
        self.tier(tier)
            .iter()
            .position(|s| lock(s).is_none())
            .map(|index| SlotId { tier, index })
    }

    /// Puts `job` into a slot previously returned by [`JobSlotPool::acquire`] and rings
    /// the worker.
    pub fn install(&self, id: SlotId, job: Arc<MeshJob>) {
        {
            let mut slot = lock(self.slot(id));
            debug_assert!(slot.is_none(), "installing into occupied slot {id:?}");
            *slot = Some(job);
        }
        self.wake();
    }

    /// Rings the doorbell so a thread blocked in [`JobSlotPool::wait_for_work`] returns.
    pub fn wake(&self) {
        // A full doorbell already guarantees a wake-up.
        let _ = self.doorbell_tx.try_send(());
    }

    /// Next job that has not finished yet, normal tier first. Slots currently locked by
    /// the main thread are skipped rather than waited on.
    pub fn poll_next_unfinished(&self) -> Option<(SlotId, Arc<MeshJob>)> {
        for tier in Tier::ALL {
            for (index, slot) in self.tier(tier).iter().enumerate() {
                let guard = match slot.try_lock() {
                    Ok(g) => g,
                    Err(TryLockError::Poisoned(p)) => p.into_inner(),
                    Err(TryLockError::WouldBlock) => continue,
                };
                if let Some(job) = guard.as_ref() {
                    if !job.finished() {
                        return Some((SlotId { tier, index }, Arc::clone(job)));
                    }
                }
            }
        }
        None
    }

    /// Runs one pending job on the calling thread. Returns false when nothing was pending.
    pub fn run_next(&self) -> bool {
        match self.poll_next_unfinished() {
            Some((_, job)) => {
                job.run();
                true
            }
            None => false,
        }
    }

    /// Blocks until a job is installed or `timeout` elapses.
    pub fn wait_for_work(&self, timeout: Duration) {
        let _ = self.doorbell_rx.recv_timeout(timeout);
    }

    /// The job in `id` if it has finished.
    pub fn finished_job(&self, id: SlotId) -> Option<Arc<MeshJob>> {
        lock(self.slot(id)).as_ref().filter(|job| job.finished()).cloned()
    }

    /// Frees a slot. Only finished jobs may be cleared.
    pub fn clear(&self, id: SlotId) {
        let mut slot = lock(self.slot(id));
        debug_assert!(
            slot.as_ref().is_none_or(|job| job.finished()),
            "clearing slot {id:?} with a running job"
        );
        *slot = None;
    }

    pub fn slot_ids(&self, tier: Tier) -> impl Iterator<Item = SlotId> {
        (0..self.tier(tier).len()).map(move |index| SlotId { tier, index })
    }

    /// Number of occupied slots in `tier`, finished or not.
    pub fn occupied(&self, tier: Tier) -> usize {
        self.tier(tier).iter().filter(|s| lock(s).is_some()).count()
    }
}
