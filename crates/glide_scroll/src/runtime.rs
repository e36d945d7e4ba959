//! Scroll runtime
//!
//! Owns every instance, the shared pause flag, the timer queue, the
//! animation scheduler and the polling loop. The embedding forwards native
//! events with [`Runtime::handle_event`] and calls [`Runtime::tick`] once per
//! animation frame.
//!
//! # Example
//!
//! ```rust
//! use glide_core::clock::VirtualClock;
//! use glide_scroll::{
//!     HeadlessConfig, HeadlessHost, InputEvent, NotificationKind, Runtime, ScrollDuration,
//!     ScrollTarget, Settings,
//! };
//!
//! let clock = VirtualClock::new();
//! let mut runtime = Runtime::new(clock.clone());
//! let host = HeadlessHost::new(HeadlessConfig::new(400.0, 1000.0, 400.0, 200.0));
//! let id = runtime.create(host, Settings::default()).unwrap();
//!
//! runtime
//!     .on(id, NotificationKind::ScrollReachBottom, |event| {
//!         assert_eq!(event.detail.v.percent, 100.0);
//!     })
//!     .unwrap();
//!
//! runtime
//!     .scroll_to(id, ScrollTarget::Keep, ScrollTarget::End, ScrollDuration::Instant, false)
//!     .unwrap();
//! // a document reports the jump as a native scroll event
//! runtime.handle_event(id, InputEvent::Scroll).unwrap();
//!
//! // settles after the scroll-stop delay
//! runtime.advance(&clock, 400.0);
//! assert_eq!(runtime.snapshot(id).unwrap().scroll_top, 800.0);
//! ```

use glide_animation::{AnimationScheduler, ScrollDuration};
use glide_core::clock::{Clock, VirtualClock, FRAME_INTERVAL_MS};
use glide_core::{TimerId, TimerQueue};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::axis::{Axis, AxisState};
use crate::error::{Result, ScrollError};
use crate::host::{ElementTarget, ScrollHost};
use crate::instance::{Instance, SizeCheck};
use crate::notify::{NotificationKind, ScrollEvent, ScrollSnapshot};
use crate::phase::ScrollPhase;
use crate::request::{EdgeDelta, InputEvent, ScrollTarget};
use crate::settings::{GlobalSettings, Settings};

new_key_type! {
    /// Handle to a scroll instance
    pub struct InstanceId;
}

/// Payload of a pending timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    ScrollStop(InstanceId),
    Poll,
}

/// Work deferred to the next frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameTask {
    RestoreScrollEvents(InstanceId),
}

impl FrameTask {
    fn instance(&self) -> InstanceId {
        match self {
            FrameTask::RestoreScrollEvents(id) => *id,
        }
    }
}

/// State shared by all instances of a runtime
pub(crate) struct RuntimeContext {
    clock: Box<dyn Clock>,
    pub global: GlobalSettings,
    pub timers: TimerQueue<TimerKind>,
    pub animations: AnimationScheduler<InstanceId>,
    pub frame_tasks: Vec<FrameTask>,
    /// Set while any instance scrolls; suspends polling
    pub paused: bool,
}

impl RuntimeContext {
    pub fn now(&self) -> f64 {
        self.clock.now_ms()
    }
}

/// Registry and scheduler for scroll instances
pub struct Runtime<H> {
    instances: SlotMap<InstanceId, Instance<H>>,
    /// Instances re-measured by the polling loop, in registration order
    polled: Vec<InstanceId>,
    poll_timer: Option<TimerId>,
    ctx: RuntimeContext,
}

impl<H: ScrollHost> Runtime<H> {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_settings(clock, GlobalSettings::default())
    }

    pub fn with_settings(clock: impl Clock + 'static, global: GlobalSettings) -> Self {
        Self {
            instances: SlotMap::with_key(),
            polled: Vec::new(),
            poll_timer: None,
            ctx: RuntimeContext {
                clock: Box::new(clock),
                global,
                timers: TimerQueue::new(),
                animations: AnimationScheduler::new(),
                frame_tasks: Vec::new(),
                paused: false,
            },
        }
    }

    pub fn global_settings(&self) -> &GlobalSettings {
        &self.ctx.global
    }

    /// Current time of the runtime clock (ms)
    pub fn now(&self) -> f64 {
        self.ctx.now()
    }

    /// Decorate a scroll container.
    ///
    /// The container is measured right away. A container that is already
    /// detached is destroyed before this returns.
    pub fn create(&mut self, host: H, settings: Settings) -> Result<InstanceId> {
        settings.validate()?;

        let auto_update = settings.auto_update;
        let id = self
            .instances
            .insert_with_key(|id| Instance::new(id, host, settings));

        if auto_update {
            self.polled.push(id);
        }

        if let Some(instance) = self.instances.get_mut(id) {
            instance.attach();
            instance.check_scroll_size(&mut self.ctx);
        }
        tracing::debug!("created scroll instance {:?}", id);

        if self.poll_timer.is_none() {
            self.poll();
        }
        self.reap_detached();

        Ok(id)
    }

    /// Forward a native event to an instance
    pub fn handle_event(&mut self, id: InstanceId, event: InputEvent) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(ScrollError::UnknownInstance(id))?;
        let ctx = &mut self.ctx;
        tracing::trace!("{:?} <- {:?} ({})", id, event, event.event_type());

        match event {
            InputEvent::Scroll => instance.on_scroll(ctx),
            InputEvent::TouchStart => instance.on_touch_start(ctx),
            InputEvent::TouchMove => instance.on_touch_move(ctx),
            InputEvent::OverflowChanged => {
                instance.check_scroll_size(ctx);
            }
        }

        self.reap_detached();
        Ok(())
    }

    /// Scroll an instance to the given targets.
    ///
    /// With `disable_events`, scroll events are ignored until the scroll
    /// completes (the next frame for an instant scroll).
    pub fn scroll_to(
        &mut self,
        id: InstanceId,
        x: ScrollTarget,
        y: ScrollTarget,
        duration: impl Into<ScrollDuration>,
        disable_events: bool,
    ) -> Result<()> {
        let duration = duration.into();
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(ScrollError::UnknownInstance(id))?;
        instance.scroll_to(&mut self.ctx, x, y, duration, disable_events);
        self.reap_detached();
        Ok(())
    }

    /// Scroll until `target` is visible, keeping `delta` pixels of margin
    pub fn scroll_into_view(
        &mut self,
        id: InstanceId,
        target: &ElementTarget,
        duration: impl Into<ScrollDuration>,
        delta: impl Into<EdgeDelta>,
    ) -> Result<()> {
        let duration = duration.into();
        let delta = delta.into();
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(ScrollError::UnknownInstance(id))?;
        let result = instance.scroll_into_view(&mut self.ctx, target, duration, delta);
        self.reap_detached();
        result
    }

    /// Re-measure an instance now. Returns true if its size changed.
    pub fn check_scroll_size(&mut self, id: InstanceId) -> Result<bool> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(ScrollError::UnknownInstance(id))?;
        let check = instance.check_scroll_size(&mut self.ctx);
        self.reap_detached();
        Ok(check == SizeCheck::Changed)
    }

    /// Destroy an instance and release its host.
    ///
    /// Returns false if the instance was already gone.
    pub fn destroy(&mut self, id: InstanceId) -> bool {
        self.remove(id).is_some()
    }

    /// Destroy an instance and hand back its released host
    pub fn remove(&mut self, id: InstanceId) -> Option<H> {
        let mut instance = self.instances.remove(id)?;

        self.polled.retain(|polled| *polled != id);
        instance.cancel_stop_timer(&mut self.ctx);
        if self.ctx.animations.cancel_owner(id) {
            tracing::debug!("{:?} destroyed mid-animation", id);
        }
        self.ctx.frame_tasks.retain(|task| task.instance() != id);
        instance.release();

        // the removed instance can no longer settle and clear the pause
        let ctx = &self.ctx;
        if ctx.paused && !self.instances.values().any(|other| other.is_busy(ctx)) {
            self.ctx.paused = false;
            tracing::trace!("polling resumed after destroying {:?}", id);
        }

        tracing::debug!("destroyed scroll instance {:?}", id);
        Some(instance.into_host())
    }

    /// Listen for a notification of an instance
    pub fn on<F>(&mut self, id: InstanceId, kind: NotificationKind, handler: F) -> Result<()>
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.instance_mut(id)?.listen(kind, handler);
        Ok(())
    }

    pub fn snapshot(&self, id: InstanceId) -> Result<ScrollSnapshot> {
        Ok(self.instance(id)?.snapshot())
    }

    pub fn instance(&self, id: InstanceId) -> Result<&Instance<H>> {
        self.instances
            .get(id)
            .ok_or(ScrollError::UnknownInstance(id))
    }

    fn instance_mut(&mut self, id: InstanceId) -> Result<&mut Instance<H>> {
        self.instances
            .get_mut(id)
            .ok_or(ScrollError::UnknownInstance(id))
    }

    pub fn host(&self, id: InstanceId) -> Option<&H> {
        self.instances.get(id).map(Instance::host)
    }

    /// Mutable host access, e.g. to simulate user scrolling on a headless host
    pub fn host_mut(&mut self, id: InstanceId) -> Option<&mut H> {
        self.instances.get_mut(id).map(Instance::host_mut)
    }

    pub fn phase(&self, id: InstanceId) -> Option<ScrollPhase> {
        self.instances.get(id).map(Instance::phase)
    }

    pub fn axis(&self, id: InstanceId, axis: Axis) -> Option<&AxisState> {
        self.instances.get(id).map(|i| i.cache().axis(axis))
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(id)
    }

    /// Whether the polling loop will measure `id`
    pub fn is_polled(&self, id: InstanceId) -> bool {
        self.polled.contains(&id)
    }

    pub fn is_polling(&self) -> bool {
        self.poll_timer.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.paused
    }

    pub fn has_active_animations(&self) -> bool {
        self.ctx.animations.has_active_animations()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Run one frame: sample animations, run next-frame tasks, fire due timers.
    ///
    /// Returns the instances whose offsets an animation wrote. A document
    /// fires scroll events for those; other embeddings should forward an
    /// [`InputEvent::Scroll`] for each.
    pub fn tick(&mut self) -> SmallVec<[InstanceId; 4]> {
        let now = self.ctx.now();
        let mut moved = SmallVec::new();

        for (owner, frame) in self.ctx.animations.tick(now) {
            if let Some(instance) = self.instances.get_mut(owner) {
                if instance.apply_frame(&frame) {
                    moved.push(owner);
                }
            }
        }

        for task in std::mem::take(&mut self.ctx.frame_tasks) {
            match task {
                FrameTask::RestoreScrollEvents(id) => {
                    if let Some(instance) = self.instances.get_mut(id) {
                        instance.restore_scroll_events();
                    }
                }
            }
        }

        for (timer, kind) in self.ctx.timers.take_due(now) {
            match kind {
                TimerKind::ScrollStop(id) => {
                    if let Some(instance) = self.instances.get_mut(id) {
                        instance.on_stop_timer(&mut self.ctx, timer);
                    }
                }
                TimerKind::Poll => {
                    if self.poll_timer == Some(timer) {
                        self.poll_timer = None;
                        self.poll();
                    }
                }
            }
        }

        self.reap_detached();
        moved
    }

    /// Drive a virtual clock forward by `ms`, ticking once per frame.
    ///
    /// Instances moved by an animation receive a scroll event after each
    /// frame, like a document delivers after a programmatic scroll.
    pub fn advance(&mut self, clock: &VirtualClock, ms: f64) {
        let target = clock.now_ms() + ms.max(0.0);
        loop {
            let next = (clock.now_ms() + FRAME_INTERVAL_MS).min(target);
            clock.set(next);
            for id in self.tick() {
                // a detached instance was reaped during the tick
                let _ = self.handle_event(id, InputEvent::Scroll);
            }
            if next >= target {
                break;
            }
        }
    }

    /// One polling pass: re-measure registered instances and reschedule
    fn poll(&mut self) {
        if self.polled.is_empty() {
            self.poll_timer = None;
            tracing::trace!("poll loop stopped");
            return;
        }

        if !self.ctx.paused {
            for id in &self.polled {
                if let Some(instance) = self.instances.get_mut(*id) {
                    instance.check_scroll_size(&mut self.ctx);
                }
            }
        }
        self.reap_detached();

        let frequency = self.ctx.global.check_frequency;
        if frequency > 0.0 {
            let deadline = self.ctx.now() + frequency;
            self.poll_timer = Some(self.ctx.timers.schedule(deadline, TimerKind::Poll));
        }
    }

    fn reap_detached(&mut self) {
        let detached: SmallVec<[InstanceId; 4]> = self
            .instances
            .iter()
            .filter(|(_, instance)| instance.is_detached())
            .map(|(id, _)| id)
            .collect();

        for id in detached {
            tracing::debug!("{:?} left the document", id);
            self.destroy(id);
        }
    }
}
