use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use tracing::trace;

/// Routes every pointer event to one owner while a gesture is in progress,
/// wherever the pointer is.
///
/// Clones share the same slot: the event pump checks [`is_captured`] while
/// the control surface holds the [`CaptureGuard`].
///
/// [`is_captured`]: PointerCapture::is_captured
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    captured: Arc<AtomicBool>,
    acquisitions: Arc<AtomicU64>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Acquire)
    }

    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Takes the capture, or `None` if another guard still holds it.
    pub fn acquire(&self) -> Option<CaptureGuard> {
        self.captured
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        trace!("pointer capture acquired");

        Some(CaptureGuard {
            captured: self.captured.clone(),
        })
    }
}

/// Releases the capture when dropped.
#[derive(Debug)]
pub struct CaptureGuard {
    captured: Arc<AtomicBool>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.captured.store(false, Ordering::Release);
        trace!("pointer capture released");
    }
}
