//! Scenario replay

use anyhow::{Context, Result};
use glide_core::clock::VirtualClock;
use glide_scroll::{
    Config, EdgeDelta, ElementTarget, HeadlessHost, InputEvent, InstanceId, NotificationKind,
    Runtime, ScrollEvent, ScrollHost, ScrollTarget,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::scenario::{Scenario, ScenarioStep, TargetValue};

/// Replay `scenario` on a fresh runtime, printing notifications to stdout
pub fn run(scenario: &Scenario, config: Config) -> Result<()> {
    let clock = VirtualClock::new();
    let mut runtime = Runtime::with_settings(clock.clone(), config.runtime);

    let id = runtime
        .create(HeadlessHost::new(scenario.host.clone()), config.instance)
        .context("Failed to create scroll instance")?;

    for kind in NotificationKind::ALL {
        // The container may already be gone if it started detached
        if runtime.on(id, kind, print_event).is_err() {
            warn!("Scroll container is detached, nothing to replay");
            return Ok(());
        }
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        debug!("step {} at {:.1}ms: {:?}", index, runtime.now(), step);
        if !runtime.contains(id) {
            warn!("Instance destroyed, skipping remaining steps");
            break;
        }
        apply(&mut runtime, &clock, id, step).with_context(|| format!("Step {} failed", index))?;
    }

    Ok(())
}

fn apply(
    runtime: &mut Runtime<HeadlessHost>,
    clock: &VirtualClock,
    id: InstanceId,
    step: &ScenarioStep,
) -> Result<()> {
    match step {
        ScenarioStep::Wait { ms } => runtime.advance(clock, *ms),
        ScenarioStep::Scroll { top, left } => {
            if let Some(host) = runtime.host_mut(id) {
                if let Some(top) = top {
                    host.set_scroll_top(*top);
                }
                if let Some(left) = left {
                    host.set_scroll_left(*left);
                }
            }
            runtime.handle_event(id, InputEvent::Scroll)?;
        }
        ScenarioStep::TouchStart => runtime.handle_event(id, InputEvent::TouchStart)?,
        ScenarioStep::TouchMove => runtime.handle_event(id, InputEvent::TouchMove)?,
        ScenarioStep::Resize {
            scroll_width,
            scroll_height,
            client_width,
            client_height,
        } => {
            if let Some(host) = runtime.host_mut(id) {
                host.resize(*scroll_width, *scroll_height, *client_width, *client_height);
            }
        }
        ScenarioStep::ScrollTo {
            x,
            y,
            duration,
            disable_events,
        } => {
            let x = target(x.as_ref())?;
            let y = target(y.as_ref())?;
            let duration = duration
                .as_ref()
                .map(|d| d.to_duration())
                .unwrap_or_default();
            runtime.scroll_to(id, x, y, duration, *disable_events)?;
            if duration.is_instant() {
                jumped(runtime, id)?;
            }
        }
        ScenarioStep::ScrollIntoView {
            selector,
            duration,
            delta,
        } => {
            let duration = duration
                .as_ref()
                .map(|d| d.to_duration())
                .unwrap_or_default();
            let delta = delta.as_ref().map(EdgeDelta::from).unwrap_or_default();
            let target = ElementTarget::Selector(selector.clone());
            runtime.scroll_into_view(id, &target, duration, delta)?;
            if duration.is_instant() {
                jumped(runtime, id)?;
            }
        }
        ScenarioStep::CheckSize => runtime.handle_event(id, InputEvent::OverflowChanged)?,
        ScenarioStep::Detach => {
            if let Some(host) = runtime.host_mut(id) {
                host.detach();
            }
        }
        ScenarioStep::Destroy => {
            runtime.destroy(id);
        }
        ScenarioStep::Snapshot => {
            let detail = runtime.snapshot(id)?;
            print_line(&SnapshotLine {
                kind: "snapshot",
                detail,
            });
        }
    }
    Ok(())
}

fn target(value: Option<&TargetValue>) -> Result<ScrollTarget> {
    value.map_or(Ok(ScrollTarget::Keep), TargetValue::to_target)
}

/// A document reports a synchronous jump with a scroll event
fn jumped(runtime: &mut Runtime<HeadlessHost>, id: InstanceId) -> Result<()> {
    if runtime.contains(id) {
        runtime.handle_event(id, InputEvent::Scroll)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SnapshotLine {
    #[serde(rename = "type")]
    kind: &'static str,
    detail: glide_scroll::ScrollSnapshot,
}

fn print_event(event: &ScrollEvent) {
    print_line(event);
}

fn print_line<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(err) => warn!("Failed to serialize output: {}", err),
    }
}
