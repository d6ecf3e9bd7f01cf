//! Animation-driven displacement ("root motion") fed into the movement tick.

use crate::{Quat, Rotator, Vec3};

/// One tick's worth of animation displacement, in the mesh's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMotion {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl RootMotion {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.translation == Vec3::zeros() && self.rotation == Quat::identity()
    }
}

impl Default for RootMotion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Something that accumulates root motion between ticks, usually an animation player.
pub trait RootMotionSource {
    /// Take everything accumulated since the last call. A second call in the same tick
    /// returns identity.
    fn consume(&mut self) -> RootMotion;
}

/// Replays a fixed list of samples, then identity. Handy for tools and tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRootMotion {
    samples: std::collections::VecDeque<RootMotion>,
}

impl ScriptedRootMotion {
    pub fn new(samples: impl IntoIterator<Item = RootMotion>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// The same sample every tick, `ticks` times.
    pub fn repeat(sample: RootMotion, ticks: usize) -> Self {
        Self::new(std::iter::repeat_n(sample, ticks))
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RootMotionSource for ScriptedRootMotion {
    fn consume(&mut self) -> RootMotion {
        self.samples.pop_front().unwrap_or_default()
    }
}

/// Decides when root motion drives the mover and hands out the samples.
pub struct RootMotionBlender {
    source: Option<Box<dyn RootMotionSource>>,
    /// Offset between the actor's facing and the animated mesh's facing.
    mesh_rotation: Rotator,
    use_root_motion: bool,
    always_use_root_motion: bool,
}

impl RootMotionBlender {
    /// `use_root_motion` drives path traversal, `always_use_root_motion` drives the mover while
    /// stationary. Without a source both are switched off.
    pub fn new(
        source: Option<Box<dyn RootMotionSource>>,
        mesh_rotation: Rotator,
        use_root_motion: bool,
        always_use_root_motion: bool,
    ) -> Self {
        let mut blender = Self {
            source,
            mesh_rotation,
            use_root_motion,
            always_use_root_motion,
        };
        if blender.source.is_none() && (use_root_motion || always_use_root_motion) {
            log::error!("root motion requested without an animation source; disabling it");
            blender.use_root_motion = false;
            blender.always_use_root_motion = false;
        }
        blender
    }

    /// A blender with no source and both flags off.
    pub fn disabled() -> Self {
        Self::new(None, Rotator::ZERO, false, false)
    }

    pub fn consume(&mut self) -> RootMotion {
        self.source
            .as_mut()
            .map(|s| s.consume())
            .unwrap_or_default()
    }

    #[inline]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    #[inline]
    pub fn use_root_motion(&self) -> bool {
        self.use_root_motion
    }

    #[inline]
    pub fn always_use_root_motion(&self) -> bool {
        self.always_use_root_motion
    }

    #[inline]
    pub fn mesh_rotation(&self) -> Rotator {
        self.mesh_rotation
    }
}

impl std::fmt::Debug for RootMotionBlender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootMotionBlender")
            .field("has_source", &self.has_source())
            .field("mesh_rotation", &self.mesh_rotation)
            .field("use_root_motion", &self.use_root_motion)
            .field("always_use_root_motion", &self.always_use_root_motion)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(x: f32) -> RootMotion {
        RootMotion::new(Vec3::new(x, 0.0, 0.0), Quat::identity())
    }

    #[test]
    fn missing_source_disables_both_flags() {
        let blender = RootMotionBlender::new(None, Rotator::ZERO, true, true);
        assert!(!blender.use_root_motion());
        assert!(!blender.always_use_root_motion());
    }

    #[test]
    fn consume_without_source_is_identity() {
        let mut blender = RootMotionBlender::disabled();
        assert!(blender.consume().is_identity());
    }

    #[test]
    fn samples_are_consumed_once() {
        let source = ScriptedRootMotion::new([step(3.0), step(5.0)]);
        let mut blender =
            RootMotionBlender::new(Some(Box::new(source)), Rotator::ZERO, true, false);

        assert!(blender.use_root_motion());
        assert_eq!(blender.consume(), step(3.0));
        assert_eq!(blender.consume(), step(5.0));
        assert!(blender.consume().is_identity());
    }

    #[test]
    fn repeat_replays_the_sample() {
        let mut source = ScriptedRootMotion::repeat(step(1.0), 2);
        assert_eq!(source.remaining(), 2);
        source.consume();
        source.consume();
        assert!(source.consume().is_identity());
    }
}
