//! Declarative property tweens on their own clock.
//!
//! A tween reads its start value the first time it is rendered, then eases
//! toward its destination. Repeats and yoyo follow the usual GSAP rules.

mod easing;

pub use easing::{EaseDirection, Easing, ParseEasingError};

use slotmap::SlotMap;

use crate::core::Clock;
use crate::scene::{MaterialId, NodeId, Scene};

slotmap::new_key_type! {
    pub struct TweenId;
}

pub const DEFAULT_DURATION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Position(Axis),
    Rotation(Axis),
    Scale(Axis),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TweenTarget {
    Node { node: NodeId, property: Property },
    Uniform { material: MaterialId, name: String },
}

impl TweenTarget {
    pub fn node(node: NodeId, property: Property) -> Self {
        TweenTarget::Node { node, property }
    }

    pub fn uniform(material: MaterialId, name: impl Into<String>) -> Self {
        TweenTarget::Uniform {
            material,
            name: name.into(),
        }
    }

    fn read(&self, scene: &Scene) -> Option<f32> {
        match self {
            TweenTarget::Node { node, property } => {
                let t = &scene.node(*node)?.transform;
                let (v, axis) = match property {
                    Property::Position(a) => (t.position, a),
                    Property::Rotation(a) => (t.rotation, a),
                    Property::Scale(a) => (t.scale, a),
                };
                Some(match axis {
                    Axis::X => v.x,
                    Axis::Y => v.y,
                    Axis::Z => v.z,
                })
            }
            TweenTarget::Uniform { material, name } => scene.material(*material)?.uniform(name),
        }
    }

    fn write(&self, scene: &mut Scene, value: f32) -> bool {
        match self {
            TweenTarget::Node { node, property } => {
                let Some(node) = scene.node_mut(*node) else {
                    return false;
                };
                let t = &mut node.transform;
                let (v, axis) = match property {
                    Property::Position(a) => (&mut t.position, a),
                    Property::Rotation(a) => (&mut t.rotation, a),
                    Property::Scale(a) => (&mut t.scale, a),
                };
                match axis {
                    Axis::X => v.x = value,
                    Axis::Y => v.y = value,
                    Axis::Z => v.z = value,
                }
                true
            }
            TweenTarget::Uniform { material, name } => scene
                .material_mut(*material)
                .is_some_and(|m| m.set_uniform(name, value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Play this many extra iterations
    Count(u32),
    Infinite,
}

#[derive(Debug, Clone)]
pub struct Tween {
    target: TweenTarget,
    to: f32,
    from: Option<f32>,
    duration: f32,
    ease: Easing,
    repeat: Repeat,
    yoyo: bool,
    elapsed: f32,
}

impl Tween {
    /// Animate `target` from wherever it is on first render to `value`
    pub fn to(target: TweenTarget, value: f32) -> Self {
        Self {
            target,
            to: value,
            from: None,
            duration: DEFAULT_DURATION,
            ease: Easing::default(),
            repeat: Repeat::Count(0),
            yoyo: false,
            elapsed: 0.0,
        }
    }

    /// Like [`Tween::to`] with an explicit start value
    pub fn from_to(target: TweenTarget, from: f32, to: f32) -> Self {
        let mut tween = Self::to(target, to);
        tween.from = Some(from);
        tween
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn target(&self) -> &TweenTarget {
        &self.target
    }

    /// Play time; infinite tweens keep it within one repeat period
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Linear progress through the current iteration and whether the tween is done
    fn progress(&self) -> (f32, bool) {
        if self.duration <= 0.0 {
            return (1.0, true);
        }
        let iteration = (self.elapsed / self.duration).floor();
        if let Repeat::Count(n) = self.repeat {
            let iterations = n as f32 + 1.0;
            if iteration >= iterations {
                let ends_reversed = self.yoyo && n % 2 == 1;
                return (if ends_reversed { 0.0 } else { 1.0 }, true);
            }
        }
        let local = (self.elapsed - iteration * self.duration) / self.duration;
        let reversed = self.yoyo && (iteration as u64) % 2 == 1;
        (if reversed { 1.0 - local } else { local }, false)
    }

    pub fn is_finished(&self) -> bool {
        self.progress().1
    }

    /// Step and write the eased value. Returns false when the target is gone.
    fn render(&mut self, scene: &mut Scene, dt: f32) -> bool {
        let from = match self.from {
            Some(from) => from,
            None => match self.target.read(scene) {
                Some(current) => *self.from.insert(current),
                None => return false,
            },
        };
        self.elapsed += dt;
        if self.repeat == Repeat::Infinite && self.duration > 0.0 {
            let period = if self.yoyo { 2.0 * self.duration } else { self.duration };
            self.elapsed = self.elapsed.rem_euclid(period);
        }
        let (p, _) = self.progress();
        let value = from + (self.to - from) * self.ease.apply(p);
        self.target.write(scene, value)
    }
}

/// Frame gaps longer than this count as a stall
pub const LAG_THRESHOLD: f32 = 0.5;
/// Step substituted for a stalled frame
pub const LAG_STEP: f32 = 0.033;

/// Replace a stall (first frame after setup, hidden window) with one short step
pub fn smooth_lag(dt: f32) -> f32 {
    if dt > LAG_THRESHOLD {
        LAG_STEP
    } else {
        dt
    }
}

/// Owns the running tweens and the wall clock that drives them
#[derive(Debug, Default)]
pub struct Timeline {
    tweens: SlotMap<TweenId, Tween>,
    clock: Clock,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn kill(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id).is_some()
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance by the wall time since the previous update, smoothing over stalls
    pub fn update(&mut self, scene: &mut Scene) {
        let dt = smooth_lag(self.clock.tick());
        self.advance(scene, dt);
    }

    /// Advance every tween by `dt` seconds. Finished tweens settle on their
    /// final value and are released; tweens whose target vanished are dropped.
    pub fn advance(&mut self, scene: &mut Scene, dt: f32) {
        self.tweens.retain(|id, tween| {
            if !tween.render(scene, dt) {
                log::debug!("dropping tween {id:?}: target no longer exists");
                return false;
            }
            !tween.is_finished()
        });
    }
}
