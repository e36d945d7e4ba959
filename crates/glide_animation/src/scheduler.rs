//! Animation scheduler
//!
//! Manages all active scroll animations and samples them each frame.
//! Every animation belongs to an owner (a scroll instance); an owner has at
//! most one running animation, and starting a new one cancels the old one.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::tween::{ScrollTween, TweenFrame};

new_key_type! {
    pub struct AnimationId;
}

struct ActiveAnimation<O> {
    owner: O,
    tween: ScrollTween,
}

/// The animation scheduler that ticks all active scroll tweens
pub struct AnimationScheduler<O> {
    animations: SlotMap<AnimationId, ActiveAnimation<O>>,
    by_owner: FxHashMap<O, AnimationId>,
}

impl<O> AnimationScheduler<O>
where
    O: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            by_owner: FxHashMap::default(),
        }
    }

    /// Start an animation for `owner`, cancelling any animation it already had
    pub fn start(&mut self, owner: O, tween: ScrollTween) -> AnimationId {
        if self.cancel_owner(owner) {
            tracing::debug!("superseded running scroll animation of {:?}", owner);
        }
        let id = self.animations.insert(ActiveAnimation { owner, tween });
        self.by_owner.insert(owner, id);
        id
    }

    /// Cancel a specific animation
    pub fn cancel(&mut self, id: AnimationId) -> Option<ScrollTween> {
        let animation = self.animations.remove(id)?;
        if self.by_owner.get(&animation.owner) == Some(&id) {
            self.by_owner.remove(&animation.owner);
        }
        Some(animation.tween)
    }

    /// Cancel the running animation of `owner`. Returns true if one was running.
    pub fn cancel_owner(&mut self, owner: O) -> bool {
        match self.by_owner.remove(&owner) {
            Some(id) => self.animations.remove(id).is_some(),
            None => false,
        }
    }

    /// The running animation of `owner`, if any
    pub fn animation_for(&self, owner: O) -> Option<AnimationId> {
        self.by_owner.get(&owner).copied()
    }

    pub fn get(&self, id: AnimationId) -> Option<&ScrollTween> {
        self.animations.get(id).map(|a| &a.tween)
    }

    /// Sample every animation at `now`. Finished animations are removed
    /// after producing their final frame.
    pub fn tick(&mut self, now: f64) -> SmallVec<[(O, TweenFrame); 4]> {
        let frames: SmallVec<[(AnimationId, O, TweenFrame); 4]> = self
            .animations
            .iter()
            .map(|(id, a)| (id, a.owner, a.tween.sample(now)))
            .collect();

        for (id, _, frame) in frames.iter() {
            if frame.finished {
                self.cancel(*id);
            }
        }

        frames
            .into_iter()
            .map(|(_, owner, frame)| (owner, frame))
            .collect()
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl<O> Default for AnimationScheduler<O>
where
    O: Copy + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
