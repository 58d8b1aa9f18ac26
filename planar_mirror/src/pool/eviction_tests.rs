use slotmap::SlotMap;
use std::time::Duration;
use crate::mirror::MirrorKey;
use crate::target::RenderTargetKey;
use crate::viewpoint::ViewpointKey;
use super::*;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

struct Fixture {
    mirrors: SlotMap<MirrorKey, ()>,
    viewpoints: SlotMap<ViewpointKey, ()>,
    targets: SlotMap<RenderTargetKey, ()>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            mirrors: SlotMap::with_key(),
            viewpoints: SlotMap::with_key(),
            targets: SlotMap::with_key(),
        }
    }
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn test_new_queue_is_empty() {
    let queue = EvictionQueue::new();
    assert!(queue.is_empty());
    assert!(queue.next_due().is_none());
}

#[test]
fn test_take_due_returns_only_due_tasks_in_order() {
    let mut f = Fixture::new();
    let owner = f.mirrors.insert(());
    let mut queue = EvictionQueue::new();

    let late = EvictionTask { owner, resource: PooledResource::Viewpoint(f.viewpoints.insert(())), due: secs(20) };
    let second = EvictionTask { owner, resource: PooledResource::RenderTarget(f.targets.insert(())), due: secs(10) };
    let first = EvictionTask { owner, resource: PooledResource::Viewpoint(f.viewpoints.insert(())), due: secs(5) };
    queue.schedule(late);
    queue.schedule(second);
    queue.schedule(first);

    assert_eq!(queue.next_due(), Some(secs(5)));

    let due = queue.take_due(secs(10));
    assert_eq!(due, vec![first, second]);
    assert_eq!(queue.len(), 1);
    assert!(queue.take_due(secs(19)).is_empty());
    assert_eq!(queue.take_due(secs(20)), vec![late]);
}

#[test]
fn test_rearmed_task_keeps_identity() {
    let mut f = Fixture::new();
    let task = EvictionTask {
        owner: f.mirrors.insert(()),
        resource: PooledResource::Viewpoint(f.viewpoints.insert(())),
        due: secs(10),
    };
    let rearmed = task.rearmed(secs(18));

    assert_eq!(rearmed.owner, task.owner);
    assert_eq!(rearmed.resource, task.resource);
    assert_eq!(rearmed.due, secs(18));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancel_owner() {
    let mut f = Fixture::new();
    let a = f.mirrors.insert(());
    let b = f.mirrors.insert(());
    let mut queue = EvictionQueue::new();
    queue.schedule(EvictionTask { owner: a, resource: PooledResource::Viewpoint(f.viewpoints.insert(())), due: secs(1) });
    queue.schedule(EvictionTask { owner: a, resource: PooledResource::RenderTarget(f.targets.insert(())), due: secs(1) });
    queue.schedule(EvictionTask { owner: b, resource: PooledResource::Viewpoint(f.viewpoints.insert(())), due: secs(1) });

    assert_eq!(queue.cancel_owner(a), 2);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.take_due(secs(1))[0].owner, b);
}

#[test]
fn test_cancel_resource() {
    let mut f = Fixture::new();
    let owner = f.mirrors.insert(());
    let target = PooledResource::RenderTarget(f.targets.insert(()));
    let mut queue = EvictionQueue::new();
    queue.schedule(EvictionTask { owner, resource: target, due: secs(3) });

    assert!(queue.cancel_resource(target));
    assert!(!queue.cancel_resource(target));
    assert!(queue.is_empty());
}
