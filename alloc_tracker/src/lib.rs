//! A global allocator that records the allocations made while a closure runs.
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOCATOR: AllocTracker = AllocTracker::new();
//!
//! let (_, events) = ALLOCATOR.record(|| Vec::<u8>::with_capacity(8));
//! assert_eq!(alloc_tracker::allocations(&events), 1);
//! ```

use std::alloc::{
    GlobalAlloc,
    Layout,
    System,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use parking_lot::{
    const_fair_mutex,
    FairMutex,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Alloc { addr: usize, size: usize },
    Freed { addr: usize, size: usize },
}

impl Event {
    pub fn delta(&self) -> isize {
        match self {
            Self::Alloc { size, .. } => *size as isize,
            Self::Freed { size, .. } => -(*size as isize),
        }
    }
}

/// Number of [`Event::Alloc`]s in `events`.
pub fn allocations(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::Alloc { .. }))
        .count()
}

/// Bytes allocated minus bytes freed.
pub fn net_bytes(events: &[Event]) -> isize {
    events.iter().map(Event::delta).sum()
}

pub struct AllocTracker {
    log: FairMutex<Vec<Event>>,
    recording: AtomicBool,
}

impl AllocTracker {
    pub const fn new() -> Self {
        Self {
            log: const_fair_mutex(Vec::new()),
            recording: AtomicBool::new(false),
        }
    }

    /// Runs `f`, returning its result and every allocation event that happened meanwhile, on any
    /// thread.
    pub fn record<R>(&self, f: impl FnOnce() -> R) -> (R, Vec<Event>) {
        self.log.lock().clear();

        self.recording.store(true, Ordering::SeqCst);
        let result = f();
        self.recording.store(false, Ordering::SeqCst);

        let events = std::mem::take(&mut *self.log.lock());
        (result, events)
    }

    fn log_event(&self, event: Event) {
        // pushing onto the log might allocate itself, which must not be recorded
        if self.recording.swap(false, Ordering::SeqCst) {
            self.log.lock().push(event);
            self.recording.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for AllocTracker {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for AllocTracker {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        self.log_event(Event::Alloc {
            addr: ptr as usize,
            size: layout.size(),
        });
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.log_event(Event::Freed {
            addr: ptr as usize,
            size: layout.size(),
        });
        System.dealloc(ptr, layout)
    }
}
