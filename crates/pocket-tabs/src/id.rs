//! Tab identity generation

use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Supplies globally unique identifiers for new tabs.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids `tab-0`, `tab-1`, ... for tests and scripted hosts
#[derive(Debug, Default)]
pub struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("tab-{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}
