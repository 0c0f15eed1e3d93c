use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use term_fx::core::effects::ConwayLife;
use term_fx::core::Effect;
use term_fx::term::{ScreenBuffer, VirtualTerminal};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn life_step_and_flush_are_allocation_free_after_warmup() {
    let (w, h) = (80, 24);
    let mut life = ConwayLife::new();
    life.reset(w, h, 42);
    let mut buf = ScreenBuffer::new(w, h);
    let mut term = VirtualTerminal::new(w, h);

    // Warm-up (first flush is a full repaint).
    life.step(&mut buf, 100, 0).unwrap();
    buf.flush(&mut term).unwrap();

    let mut ok = true;
    let allocs = with_alloc_counting(|| {
        for frame in 1..200 {
            ok &= life.step(&mut buf, 100, frame).is_ok();
            ok &= buf.flush(&mut term).is_ok();
        }
    });

    assert!(ok);
    assert!(allocs == 0);
}
