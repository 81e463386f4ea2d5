//! Field of view sampling policies, and the capture signal that one of them listens to.
//!
//! Some platforms temporarily change the rendering field of view while recording the screen. A
//! window sized from the live field of view would jump in and out while a recording starts and
//! stops, so [`CaptureAwareFieldOfView`] holds the last sample taken before the capture began.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

/// Decides which field of view a [`FollowWindow`](super::component::FollowWindow) uses to compute
/// its view distance. Selected once, when the window is constructed.
pub trait FieldOfViewSource: Debug + Send + Sync + 'static {
    /// Given this frame's live field of view in degrees, return the one to use.
    fn sample(&mut self, live_fov_degrees: f32) -> f32;
}

/// Always uses the live field of view. Used on platforms without a capture signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveFieldOfView;

impl FieldOfViewSource for LiveFieldOfView {
    fn sample(&mut self, live_fov_degrees: f32) -> f32 {
        live_fov_degrees
    }
}

/// Uses the live field of view, except while the platform is capturing video. During a capture
/// the last sample taken before the capture started is reused, and it is not refreshed until the
/// capture ends.
#[derive(Debug, Clone)]
pub struct CaptureAwareFieldOfView {
    signal: CaptureSignal,
    previous: Option<f32>,
}

impl CaptureAwareFieldOfView {
    /// Subscribe to `signal`. The subscription lasts as long as this source is alive.
    pub fn new(signal: CaptureSignal) -> Self {
        Self {
            signal,
            previous: None,
        }
    }
}

impl FieldOfViewSource for CaptureAwareFieldOfView {
    fn sample(&mut self, live_fov_degrees: f32) -> f32 {
        if self.signal.is_capturing() {
            // Nothing to hold if the capture was already running when we subscribed.
            *self.previous.get_or_insert(live_fov_degrees)
        } else {
            self.previous = Some(live_fov_degrees);
            live_fov_degrees
        }
    }
}

/// A shared "is the platform recording video" flag.
///
/// Clone this into platform capture callbacks; they may run on any thread. The plugin inserts one
/// as a resource, and [`CaptureStateChanged`] events are written into it.
#[derive(Debug, Default, Clone, Resource)]
pub struct CaptureSignal(Arc<AtomicBool>);

impl CaptureSignal {
    /// Record whether the platform is currently capturing video.
    pub fn set_capturing(&self, capturing: bool) {
        self.0.store(capturing, Ordering::Release);
    }

    /// Is the platform currently capturing video?
    pub fn is_capturing(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// How many handles to this signal exist, including this one. Each live
    /// [`CaptureAwareFieldOfView`] holds one.
    pub fn subscribers(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

/// Send this event when the platform starts or stops capturing video, for hosts that deliver the
/// capture state on the main thread.
#[derive(Debug, Clone, Copy, Event)]
pub struct CaptureStateChanged {
    /// Is the platform capturing video now?
    pub capturing: bool,
}

impl CaptureStateChanged {
    pub(crate) fn receive(mut events: EventReader<Self>, signal: Res<CaptureSignal>) {
        for event in events.read() {
            debug!("Capture state changed, capturing: {}", event.capturing);
            signal.set_capturing(event.capturing);
        }
    }
}
