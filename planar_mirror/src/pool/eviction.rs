/// Deferred eviction of pool-generated instances.
///
/// A task is armed when an instance is cloned, due when its TTL would
/// elapse. At the due time the owner re-checks the usage record: an
/// instance used in the meantime gets a new task instead of being
/// destroyed.

use std::time::Duration;
use crate::mirror::MirrorKey;
use crate::target::RenderTargetKey;
use crate::viewpoint::ViewpointKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PooledResource {
    Viewpoint(ViewpointKey),
    RenderTarget(RenderTargetKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionTask {
    /// Mirror whose pool holds the resource
    pub owner: MirrorKey,
    pub resource: PooledResource,
    /// Frame-clock time of the check
    pub due: Duration,
}

impl EvictionTask {
    /// Same task, re-armed for `due`.
    pub fn rearmed(self, due: Duration) -> Self {
        Self { due, ..self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvictionQueue {
    tasks: Vec<EvictionTask>,
}

impl EvictionQueue {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn schedule(&mut self, task: EvictionTask) {
        self.tasks.push(task);
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<EvictionTask> {
        let mut due = Vec::new();
        self.tasks.retain(|task| {
            if task.due <= now {
                due.push(*task);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| task.due);
        due
    }

    /// Cancel every task of `owner`. Returns the number cancelled.
    pub fn cancel_owner(&mut self, owner: MirrorKey) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != owner);
        before - self.tasks.len()
    }

    /// Cancel the task for `resource`. Returns `true` if one was pending.
    pub fn cancel_resource(&mut self, resource: PooledResource) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.resource != resource);
        before != self.tasks.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
#[path = "eviction_tests.rs"]
mod tests;
