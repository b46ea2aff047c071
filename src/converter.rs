//! Converts an articulated model into a MuJoCo-style scene description.
//!
//! The entry point is [`MoverConverter`]. Configure it with a [`ConverterConfig`],
//! then call [`MoverConverter::convert`] (random colors) or
//! [`MoverConverter::convert_with`] (caller-supplied [`ColorStrategy`]).

use crate::articulation::{Articulated, Limb, Segment};
use crate::scene::{GeomShape, SceneBody, SceneGeom};
use glam::{Vec2, Vec3, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Configuration for scene conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Name of the outer group wrapping the whole mover.
    pub root_name: String,
    /// Orientation of the outer group.
    pub root_euler: Vec3,
    /// Where the torso's first segment starts.
    pub torso_origin: Vec3,
    /// Box extents across the segment (x, y). Segments always extend along -Z.
    pub footprint: Vec2,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            root_name: "mover".to_string(),
            root_euler: Vec3::ZERO,
            torso_origin: Vec3::new(0.0, 2.0, 1.0),
            footprint: Vec2::ONE,
        }
    }
}

/// Picks the display color of each segment's geom.
pub trait ColorStrategy {
    fn color(&mut self, segment: &Segment) -> Vec4;
}

/// Uniform random RGB in `[0, 1)` with an opaque alpha.
#[derive(Debug)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of colors.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorStrategy for RandomColors {
    fn color(&mut self, _segment: &Segment) -> Vec4 {
        Vec4::new(self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen(), 1.0)
    }
}

/// The same color for every segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedColor(pub Vec4);

impl ColorStrategy for FixedColor {
    fn color(&mut self, _segment: &Segment) -> Vec4 {
        self.0
    }
}

impl<C: ColorStrategy + ?Sized> ColorStrategy for &mut C {
    fn color(&mut self, segment: &Segment) -> Vec4 {
        (**self).color(segment)
    }
}

/// Walks a limb/segment tree and emits one placement group per segment.
#[derive(Clone, Debug, Default)]
pub struct MoverConverter {
    config: ConverterConfig,
}

impl MoverConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Converts `mover` to scene text, coloring geoms randomly.
    pub fn convert(&self, mover: &impl Articulated) -> String {
        self.convert_with(mover, RandomColors::new())
    }

    /// Converts `mover` to scene text using `colors` for every geom.
    pub fn convert_with(&self, mover: &impl Articulated, colors: impl ColorStrategy) -> String {
        let scene = self.build_scene(mover, colors);
        let text = scene.to_string();
        debug!(
            root = %scene.name,
            geoms = scene.geom_count(),
            bytes = text.len(),
            "converted mover"
        );
        text
    }

    /// Builds the scene tree for `mover` without rendering it.
    ///
    /// The root group carries `root_euler`; each segment below it becomes a
    /// group positioned at the segment's midpoint.
    ///
    /// # Placement
    ///
    /// For a segment of length `L` starting at `origin`:
    /// 1. `terminus = origin - (0, 0, L)`.
    /// 2. The group and its box geom sit at `(origin + terminus) / 2`; the box
    ///    is `footprint.x × footprint.y × L`.
    /// 3. Limbs at the origin end start at `origin`, limbs at the terminus end
    ///    at `terminus`. Their groups nest inside this segment's group.
    /// 4. The next segment of the same limb is a sibling group starting at
    ///    the previous `terminus`, so a limb reads as one straight line. This
    ///    deviates from starting every segment at the limb origin; with one
    ///    segment per limb the two placements agree.
    pub fn build_scene(
        &self,
        mover: &impl Articulated,
        mut colors: impl ColorStrategy,
    ) -> SceneBody {
        let torso = mover.torso();
        debug!(
            torso = torso.name(),
            segments = torso.segment_count(),
            "converting mover"
        );
        let mut root =
            SceneBody::new(self.config.root_name.clone()).with_euler(self.config.root_euler);
        self.convert_limb(torso, self.config.torso_origin, &mut colors, &mut root.children);
        root
    }

    fn convert_limb(
        &self,
        limb: &Limb,
        mut origin: Vec3,
        colors: &mut impl ColorStrategy,
        out: &mut Vec<SceneBody>,
    ) {
        for segment in limb.segments() {
            let terminus = origin - Vec3::new(0.0, 0.0, segment.length());
            let center = (origin + terminus) / 2.0;
            let size = self.config.footprint.extend(segment.length());
            trace!(segment = segment.name(), ?center, "segment body");

            let mut body = SceneBody::new(format!("{}-body", segment.name())).with_pos(center);
            body.geoms.push(SceneGeom {
                name: format!("{}-geom", segment.name()),
                shape: GeomShape::Box,
                size,
                pos: center,
                rgba: colors.color(segment),
            });

            for child in segment.origin_limbs() {
                self.convert_limb(child, origin, colors, &mut body.children);
            }
            for child in segment.terminus_limbs() {
                self.convert_limb(child, terminus, colors, &mut body.children);
            }

            out.push(body);
            origin = terminus;
        }
    }
}
