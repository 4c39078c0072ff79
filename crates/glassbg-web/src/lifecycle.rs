//! Page lifecycle decisions for the browser loop. Nothing here touches the
//! DOM, so it builds and tests on the host.

use std::fmt::Debug;

/// What `pagehide` does to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Page entered the back/forward cache and may be shown again.
    Keep,
    /// Page is being unloaded.
    Dispose,
}

impl PageHide {
    pub fn for_event(persisted: bool) -> Self {
        if persisted {
            PageHide::Keep
        } else {
            PageHide::Dispose
        }
    }
}

/// Whether the next animation frame was scheduled. `None` means there was no
/// window to ask.
pub fn frame_requested<E: Debug>(request: Option<Result<i32, E>>) -> bool {
    match request {
        Some(Ok(_)) => true,
        Some(Err(e)) => {
            log::warn!("[frame] requestAnimationFrame failed: {e:?}; animation loop stopped");
            false
        }
        None => {
            log::warn!("[frame] no window; animation loop stopped");
            false
        }
    }
}
