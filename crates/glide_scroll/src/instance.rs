//! Scroll instance
//!
//! One instance decorates one scroll container. It reacts to native events
//! forwarded by the runtime, keeps the measurement cache current, renders
//! the tracks through its host and fires notifications to its listeners.
//!
//! Methods that need timers, the clock or the animation scheduler take the
//! shared [`RuntimeContext`] explicitly.

use glide_animation::{ScrollDuration, ScrollTween, TweenFrame};
use glide_core::events::event_types::{SCROLL, SCROLL_END, SETTLED};
use glide_core::fsm::StateMachine;
use glide_core::{EventDispatcher, TimerId};

use crate::axis::{Axis, TrackState};
use crate::cache::Cache;
use crate::edge::{detect_edge, EdgeCheck, EdgeMark};
use crate::error::{Result, ScrollError};
use crate::geometry::{self, AxisGeometry};
use crate::host::{ElementTarget, ScrollHost};
use crate::notify::{NotificationKind, ScrollEvent, ScrollSnapshot};
use crate::phase::ScrollPhase;
use crate::request::{EdgeDelta, ScrollTarget};
use crate::runtime::{FrameTask, InstanceId, RuntimeContext, TimerKind};
use crate::settings::Settings;

/// Outcome of a size check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeCheck {
    Unchanged,
    Changed,
    /// The container left the document; the instance must be destroyed
    Detached,
}

pub struct Instance<H> {
    id: InstanceId,
    host: H,
    settings: Settings,
    cache: Cache,
    phase: StateMachine<ScrollPhase>,
    /// Track elements were created
    tracks: bool,
    suppress_scroll_events: bool,
    stop_timer: Option<TimerId>,
    detached: bool,
    listeners: EventDispatcher<NotificationKind, ScrollEvent>,
}

impl<H: ScrollHost> Instance<H> {
    pub(crate) fn new(id: InstanceId, host: H, settings: Settings) -> Self {
        Self {
            id,
            host,
            settings,
            cache: Cache::default(),
            phase: StateMachine::new(ScrollPhase::Idle),
            tracks: false,
            suppress_scroll_events: false,
            stop_timer: None,
            detached: false,
            listeners: EventDispatcher::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub(crate) fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase.current_state()
    }

    pub fn has_tracks(&self) -> bool {
        self.tracks
    }

    /// Scroll events are ignored while a programmatic scroll asked for it
    pub fn scroll_events_suppressed(&self) -> bool {
        self.suppress_scroll_events
    }

    /// A scroll-stop timer is pending
    pub fn is_settle_pending(&self) -> bool {
        self.stop_timer.is_some()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Scrolling, waiting to settle, or animating
    pub(crate) fn is_busy(&self, ctx: &RuntimeContext) -> bool {
        self.phase() != ScrollPhase::Idle
            || self.stop_timer.is_some()
            || ctx.animations.animation_for(self.id).is_some()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot::from_cache(&self.cache)
    }

    pub(crate) fn listen<F>(&mut self, kind: NotificationKind, handler: F)
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.listeners.register(kind, handler);
    }

    /// Prepare the container: tracks, native scrollbars, touch class
    pub(crate) fn attach(&mut self) {
        if self.host.native_scrollbar_size() > 0.0 || self.settings.forced_scrollbars {
            self.host.hide_native_scrollbars();
            self.host.create_tracks(&self.settings.class_prefix);
            self.tracks = true;
        }

        if self.host.is_touch() && self.settings.fix_touch_page_bounce {
            self.host.add_class(&self.settings.class("touchfix"));
        }

        tracing::debug!(
            "attached {:?} (tracks: {}, touch: {})",
            self.id,
            self.tracks,
            self.host.is_touch()
        );
    }

    /// Re-measure the container. A change settles the instance.
    pub(crate) fn check_scroll_size(&mut self, ctx: &mut RuntimeContext) -> SizeCheck {
        let dims = self.host.dimensions();
        if self.cache.dims == Some(dims) {
            return SizeCheck::Unchanged;
        }

        if dims.scroll_height == 0.0 && dims.client_height == 0.0 && !self.host.is_attached() {
            self.detached = true;
            return SizeCheck::Detached;
        }

        let first = self.cache.dims.is_none();
        self.cache.dims = Some(dims);
        if !first {
            self.emit(NotificationKind::SizeChange);
        }

        self.scroll_stop(ctx);
        SizeCheck::Changed
    }

    /// Recompute both axes and render the tracks
    pub(crate) fn update_scrollbars(&mut self) {
        let (min, max) = self.settings.track_limits();
        let dims = self.cache.dimensions();

        let next = Axis::BOTH.map(|axis| {
            let (scroll_size, client_size) = dims.along(axis);
            geometry::calculate(self.host.scroll_offset(axis), client_size, scroll_size, min, max)
        });

        for (axis, geometry) in Axis::BOTH.into_iter().zip(next) {
            match self.cache.axis_mut(axis).sync_track(geometry.size) {
                Some(TrackState::Enabled) => {
                    if self.tracks {
                        self.host
                            .set_track_transition(axis, &self.settings.track_transitions);
                    }
                    self.host.add_class(axis.enabled_class());
                    tracing::debug!("{:?} {:?} track enabled", self.id, axis);
                }
                Some(TrackState::Disabled) => {
                    self.host.remove_class(axis.enabled_class());
                    tracing::debug!("{:?} {:?} track disabled", self.id, axis);
                }
                None => {}
            }
        }

        if self.tracks {
            for (axis, geometry) in Axis::BOTH.into_iter().zip(next) {
                if self.cache.axis(axis).last_size() != Some(geometry.size) {
                    self.host.set_track_length(axis, geometry.track_length_percent());
                }
            }

            if self.host.is_touch() {
                self.animate_tracks();
            }

            for (axis, geometry) in Axis::BOTH.into_iter().zip(next) {
                self.host
                    .set_track_translate(axis, geometry.track_translate_percent());
            }
        }

        for (axis, geometry) in Axis::BOTH.into_iter().zip(next) {
            self.cache.axis_mut(axis).set_geometry(geometry);
        }
    }

    fn animate_tracks(&mut self) {
        let transition = format!(
            "{}, transform 0.2s linear 0s",
            self.settings.track_transitions
        );
        for axis in Axis::BOTH {
            self.host.set_track_transition(axis, &transition);
        }
    }

    fn restore_track_transitions(&mut self) {
        for axis in Axis::BOTH {
            self.host
                .set_track_transition(axis, &self.settings.track_transitions);
        }
    }

    /// Run edge detection on every enabled axis
    fn check_edges(&mut self, ctx: &mut RuntimeContext, mode: EdgeCheck) {
        let dims = self.cache.dimensions();

        for axis in Axis::BOTH {
            let state = self.cache.axis(axis);
            if !state.is_enabled() {
                continue;
            }

            let (full_size, _) = dims.along(axis);
            let geometry = state.geometry();
            let Some(edge) = detect_edge(
                &geometry,
                state.last_edge,
                full_size,
                mode.ignores_last_edge(),
            ) else {
                continue;
            };

            self.cache.axis_mut(axis).last_edge = Some(edge);
            let Some(reached) = NotificationKind::reached(axis, edge) else {
                continue;
            };

            match mode {
                EdgeCheck::Final => {
                    self.emit(NotificationKind::ScrollReachEdge);
                    self.emit(reached);
                }
                EdgeCheck::Live if self.settings.fix_touch_page_bounce => {
                    self.fix_touch_bounce(ctx, axis, edge, &geometry, full_size);
                }
                EdgeCheck::Live => {}
            }
        }
    }

    /// Move the content 1px away from the edge it rests on, so the next
    /// touch scrolls the content instead of the page.
    fn fix_touch_bounce(
        &mut self,
        ctx: &mut RuntimeContext,
        axis: Axis,
        edge: EdgeMark,
        geometry: &AxisGeometry,
        full_size: f64,
    ) {
        let fixed = match edge {
            EdgeMark::End => geometry.position * full_size - 1.0,
            _ => 1.0,
        };
        tracing::trace!("{:?} {:?} touch bounce fix to {}", self.id, axis, fixed);

        let (x, y) = match axis {
            Axis::Vertical => (ScrollTarget::Keep, ScrollTarget::Offset(fixed)),
            Axis::Horizontal => (ScrollTarget::Offset(fixed), ScrollTarget::Keep),
        };
        self.scroll_to(ctx, x, y, ScrollDuration::Instant, true);
    }

    /// Scroll to the given targets, animated unless `duration` is instant
    pub(crate) fn scroll_to(
        &mut self,
        ctx: &mut RuntimeContext,
        x: ScrollTarget,
        y: ScrollTarget,
        duration: ScrollDuration,
        disable_events: bool,
    ) {
        if self.check_scroll_size(ctx) == SizeCheck::Detached {
            return;
        }

        let dims = self.cache.dimensions();
        let start_x = self.host.scroll_left();
        let start_y = self.host.scroll_top();
        let end_x = x.resolve(start_x, dims.scroll_width, dims.client_width);
        let end_y = y.resolve(start_y, dims.scroll_height, dims.client_height);

        if end_x == start_x && end_y == start_y {
            tracing::trace!("{:?} already at ({}, {})", self.id, end_x, end_y);
            return;
        }

        ctx.paused = true;
        self.suppress_scroll_events = disable_events;

        if duration.is_instant() {
            self.jump(ctx, end_x, end_y);
            ctx.frame_tasks.push(FrameTask::RestoreScrollEvents(self.id));
        } else {
            self.animate(ctx, (start_x, end_x), (start_y, end_y), duration);
        }
    }

    /// Scroll the least distance that brings `target` into view
    pub(crate) fn scroll_into_view(
        &mut self,
        ctx: &mut RuntimeContext,
        target: &ElementTarget,
        duration: ScrollDuration,
        delta: EdgeDelta,
    ) -> Result<()> {
        if self.check_scroll_size(ctx) == SizeCheck::Detached {
            return Ok(());
        }

        let element = self
            .host
            .element_rect(target)
            .ok_or_else(|| ScrollError::TargetNotFound(target.to_string()))?;
        let viewport = self.host.viewport_rect();

        let start_x = self.host.scroll_left();
        let start_y = self.host.scroll_top();

        let left_edge = start_x + element.left - viewport.left - delta.left;
        let top_edge = start_y + element.top - viewport.top - delta.top;
        let right_edge = start_x + element.left - viewport.left + element.width - viewport.width
            + delta.right;
        let bottom_edge = start_y + element.top - viewport.top + element.height - viewport.height
            + delta.bottom;

        let mut end_x = start_x;
        let mut end_y = start_y;

        if left_edge < start_x {
            end_x = left_edge;
        } else if right_edge > start_x {
            end_x = right_edge;
        }

        if top_edge < start_y {
            end_y = top_edge;
        } else if bottom_edge > start_y {
            end_y = bottom_edge;
        }

        if end_x < 0.0 {
            end_x = 0.0;
        }
        if end_y < 0.0 {
            end_y = 0.0;
        }

        if end_x == start_x && end_y == start_y {
            tracing::trace!("{:?} {} already in view", self.id, target);
            return Ok(());
        }

        ctx.paused = true;
        if duration.is_instant() {
            self.jump(ctx, end_x, end_y);
        } else {
            self.animate(ctx, (start_x, end_x), (start_y, end_y), duration);
        }
        Ok(())
    }

    fn jump(&mut self, ctx: &mut RuntimeContext, x: f64, y: f64) {
        if ctx.animations.cancel_owner(self.id) {
            tracing::debug!("{:?} instant scroll cancelled running animation", self.id);
        }
        self.host.set_scroll_left(x);
        self.host.set_scroll_top(y);
    }

    fn animate(
        &mut self,
        ctx: &mut RuntimeContext,
        x: (f64, f64),
        y: (f64, f64),
        duration: ScrollDuration,
    ) {
        let tween = ScrollTween::new(x, y, ctx.now(), duration);
        tracing::debug!(
            "{:?} animating to ({}, {}) in {:.0}ms",
            self.id,
            x.1,
            y.1,
            tween.duration_ms()
        );
        ctx.animations.start(self.id, tween);
    }

    /// Apply one animation frame. Returns true if an offset was written.
    pub(crate) fn apply_frame(&mut self, frame: &TweenFrame) -> bool {
        if let Some(y) = frame.y {
            self.host.set_scroll_top(y);
        }
        if let Some(x) = frame.x {
            self.host.set_scroll_left(x);
        }
        if frame.finished {
            self.suppress_scroll_events = false;
        }
        frame.x.is_some() || frame.y.is_some()
    }

    pub(crate) fn restore_scroll_events(&mut self) {
        self.suppress_scroll_events = false;
    }

    pub(crate) fn on_scroll(&mut self, ctx: &mut RuntimeContext) {
        if self.suppress_scroll_events {
            tracing::trace!("{:?} scroll event suppressed", self.id);
            return;
        }

        if !ctx.paused && !self.host.is_touch() {
            self.host.add_class(&self.settings.class("scrolling"));
        }
        ctx.paused = true;
        self.phase.send(SCROLL);

        let now = ctx.now();
        let interval = ctx.global.scroll_min_update_interval;
        let due = interval == 0.0
            || self
                .cache
                .scroll_now
                .map_or(true, |last| now - last >= interval);

        if due {
            if self.tracks {
                self.update_scrollbars();
            }
            self.cache.scroll_now = Some(now);
            self.restart_stop_timer(ctx);
        }
    }

    pub(crate) fn on_touch_start(&mut self, ctx: &mut RuntimeContext) {
        if !self.host.is_touch() {
            return;
        }

        self.cancel_stop_timer(ctx);

        if self.tracks {
            self.restore_track_transitions();
        }

        if self.settings.fix_touch_page_bounce {
            self.update_scrollbars();
            self.check_edges(ctx, EdgeCheck::Live);
        }
        self.cache.scroll_now = Some(ctx.now());
    }

    pub(crate) fn on_touch_move(&mut self, ctx: &mut RuntimeContext) {
        if self.host.is_touch() {
            ctx.paused = true;
        }
    }

    /// Settle: scrolling stopped for the quiet period, or a size change
    /// forced a refresh.
    pub(crate) fn scroll_stop(&mut self, ctx: &mut RuntimeContext) {
        self.cancel_stop_timer(ctx);

        if !self.host.is_touch() {
            self.host.remove_class(&self.settings.class("scrolling"));
        }
        self.phase.send(SCROLL_END);

        self.update_scrollbars();
        self.emit(NotificationKind::ScrollStop);
        self.check_edges(ctx, EdgeCheck::Final);

        ctx.paused = false;
        self.phase.send(SETTLED);
    }

    /// The scroll-stop timer fired
    pub(crate) fn on_stop_timer(&mut self, ctx: &mut RuntimeContext, timer: TimerId) {
        if self.stop_timer == Some(timer) {
            self.stop_timer = None;
            self.scroll_stop(ctx);
        }
    }

    fn restart_stop_timer(&mut self, ctx: &mut RuntimeContext) {
        self.cancel_stop_timer(ctx);
        let deadline = ctx.now() + self.settings.scroll_stop_delay;
        self.stop_timer = Some(ctx.timers.schedule(deadline, TimerKind::ScrollStop(self.id)));
    }

    pub(crate) fn cancel_stop_timer(&mut self, ctx: &mut RuntimeContext) {
        if let Some(timer) = self.stop_timer.take() {
            ctx.timers.cancel(timer);
        }
    }

    /// Tear down everything attached to the host
    pub(crate) fn release(&mut self) {
        if self.tracks {
            self.host.remove_tracks();
            self.tracks = false;
        }
        self.host.remove_class(&self.settings.class("scrolling"));
        self.host.remove_class(&self.settings.class("touchfix"));
        self.host.release();
        self.listeners.clear();
    }

    fn emit(&self, kind: NotificationKind) {
        let event = ScrollEvent {
            kind,
            detail: self.snapshot(),
        };
        let delivered = self.listeners.dispatch(&kind, &event);
        tracing::trace!("{:?} {} -> {} listener(s)", self.id, kind, delivered);
    }
}
