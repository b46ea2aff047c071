//! The articulated body model: a rooted tree of rigid segments grouped into limbs.
//!
//! A [`Mover`] owns one torso [`Limb`]. Each limb owns an ordered, never-empty list
//! of [`Segment`]s, and each segment owns the limbs attached to its two ends
//! ([`SegmentEnd::Origin`] and [`SegmentEnd::Terminus`]). Ownership makes the
//! structure a tree: a limb value can only live in one place.

use crate::error::{ArticulationError, Result};
use crate::naming::{NameGenerator, UuidNames};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// One of the two attachment ends of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentEnd {
    /// The proximal end, facing the parent.
    Origin,
    /// The distal end.
    Terminus,
}

impl fmt::Display for SegmentEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Terminus => f.write_str("terminus"),
        }
    }
}

fn check_length(length: f32) -> Result<f32> {
    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(ArticulationError::InvalidLength { length })
    }
}

/// A single rigid link of fixed length.
///
/// Child limbs hang off either end. Attaching is append-only; there is no detach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRepr")]
pub struct Segment {
    length: f32,
    name: String,
    origin_limbs: Vec<Limb>,
    terminus_limbs: Vec<Limb>,
}

#[derive(Deserialize)]
struct SegmentRepr {
    length: f32,
    name: String,
    #[serde(default)]
    origin_limbs: Vec<Limb>,
    #[serde(default)]
    terminus_limbs: Vec<Limb>,
}

impl TryFrom<SegmentRepr> for Segment {
    type Error = ArticulationError;

    fn try_from(repr: SegmentRepr) -> Result<Self> {
        Ok(Self {
            length: check_length(repr.length)?,
            name: repr.name,
            origin_limbs: repr.origin_limbs,
            terminus_limbs: repr.terminus_limbs,
        })
    }
}

impl Segment {
    /// Creates a segment with an explicit name and no child limbs.
    pub fn new(length: f32, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            length: check_length(length)?,
            name: name.into(),
            origin_limbs: Vec::new(),
            terminus_limbs: Vec::new(),
        })
    }

    /// Creates a segment whose name is drawn from `names`.
    pub fn generated(length: f32, mut names: impl NameGenerator) -> Result<Self> {
        Self::new(length, names.next_name())
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends `limb` to the given end.
    ///
    /// Attaching a clone of a limb that is already present is allowed and
    /// duplicates the subtree (names included) in the emitted scene. Use
    /// [`attach_unique`](Self::attach_unique) to reject that.
    pub fn attach(&mut self, end: SegmentEnd, limb: Limb) {
        self.limbs_mut(end).push(limb);
    }

    /// Appends every limb in `limbs` to the given end, in order.
    pub fn attach_all(&mut self, end: SegmentEnd, limbs: impl IntoIterator<Item = Limb>) {
        self.limbs_mut(end).extend(limbs);
    }

    pub fn attach_to_origin(&mut self, limb: Limb) {
        self.attach(SegmentEnd::Origin, limb);
    }

    pub fn attach_to_terminus(&mut self, limb: Limb) {
        self.attach(SegmentEnd::Terminus, limb);
    }

    /// Like [`attach`](Self::attach), but fails if a limb with the same name is
    /// already attached at `end`.
    pub fn attach_unique(&mut self, end: SegmentEnd, limb: Limb) -> Result<()> {
        if self.child_limbs(end).iter().any(|l| l.name == limb.name) {
            warn!(limb = %limb.name, segment = %self.name, %end, "duplicate limb attachment rejected");
            return Err(ArticulationError::DuplicateAttachment {
                limb: limb.name,
                segment: self.name.clone(),
                end,
            });
        }
        self.attach(end, limb);
        Ok(())
    }

    /// Limbs attached at `end`, in attachment order.
    pub fn child_limbs(&self, end: SegmentEnd) -> &[Limb] {
        match end {
            SegmentEnd::Origin => &self.origin_limbs,
            SegmentEnd::Terminus => &self.terminus_limbs,
        }
    }

    pub fn origin_limbs(&self) -> &[Limb] {
        &self.origin_limbs
    }

    pub fn terminus_limbs(&self) -> &[Limb] {
        &self.terminus_limbs
    }

    /// Mutable access to a limb already attached at `end`.
    pub fn child_limb_mut(&mut self, end: SegmentEnd, index: usize) -> Option<&mut Limb> {
        self.limbs_mut(end).get_mut(index)
    }

    fn limbs_mut(&mut self, end: SegmentEnd) -> &mut Vec<Limb> {
        match end {
            SegmentEnd::Origin => &mut self.origin_limbs,
            SegmentEnd::Terminus => &mut self.terminus_limbs,
        }
    }

    fn children(&self) -> impl Iterator<Item = &Limb> {
        self.origin_limbs.iter().chain(self.terminus_limbs.iter())
    }
}

/// A named sequence of segments forming one articulated appendage.
///
/// A limb always holds at least one segment. Segments created through the limb
/// are named `"<limb>-<index>"`, which keeps names unique within the limb.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LimbRepr")]
pub struct Limb {
    name: String,
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct LimbRepr {
    name: String,
    segments: Vec<Segment>,
}

impl TryFrom<LimbRepr> for Limb {
    type Error = ArticulationError;

    fn try_from(repr: LimbRepr) -> Result<Self> {
        if repr.segments.is_empty() {
            return Err(ArticulationError::EmptyLimb { limb: repr.name });
        }
        Ok(Self {
            name: repr.name,
            segments: repr.segments,
        })
    }
}

impl Limb {
    /// Creates a limb with a random UUID name and one segment of `length`.
    pub fn new(length: f32) -> Result<Self> {
        Self::generated(length, UuidNames)
    }

    /// Creates a limb with an explicit name and one segment of `length`.
    pub fn named(length: f32, name: impl Into<String>) -> Result<Self> {
        let mut limb = Self {
            name: name.into(),
            segments: Vec::with_capacity(1),
        };
        limb.extend(length)?;
        Ok(limb)
    }

    /// Creates a limb whose name is drawn from `names`.
    pub fn generated(length: f32, mut names: impl NameGenerator) -> Result<Self> {
        Self::named(length, names.next_name())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name the next segment created by [`extend`](Self::extend) will get.
    pub fn next_segment_name(&self) -> String {
        format!("{}-{}", self.name, self.segments.len())
    }

    /// Appends an existing segment. Names are not checked against other limbs.
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Appends a new segment of `length` named by [`next_segment_name`](Self::next_segment_name).
    pub fn extend(&mut self, length: f32) -> Result<&mut Segment> {
        let segment = Segment::new(length, self.next_segment_name())?;
        self.segments.push(segment);
        let last = self.segments.len() - 1;
        Ok(&mut self.segments[last])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.segments.get_mut(index)
    }

    /// The seed segment. Always present.
    pub fn first_segment(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn first_segment_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    /// The most recently added segment. Always present.
    pub fn last_segment_mut(&mut self) -> &mut Segment {
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    /// Total number of segments in this limb and every limb below it.
    pub fn segment_count(&self) -> usize {
        self.segments
            .iter()
            .map(|s| 1 + s.children().map(Limb::segment_count).sum::<usize>())
            .sum()
    }

    /// Deepest chain of nested segments in this subtree (a lone limb is 1).
    pub fn depth(&self) -> usize {
        self.segments
            .iter()
            .map(|s| 1 + s.children().map(Limb::depth).max().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }
}

/// Anything with a root limb that can be turned into a scene.
pub trait Articulated {
    fn torso(&self) -> &Limb;
}

/// The articulation root: one torso limb from which everything else hangs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    torso: Limb,
}

impl Mover {
    /// Creates a mover whose torso is a fresh limb with a UUID name.
    pub fn new(torso_length: f32) -> Result<Self> {
        Ok(Self::from_torso(Limb::new(torso_length)?))
    }

    pub fn named(torso_length: f32, name: impl Into<String>) -> Result<Self> {
        Ok(Self::from_torso(Limb::named(torso_length, name)?))
    }

    pub fn generated(torso_length: f32, names: impl NameGenerator) -> Result<Self> {
        Ok(Self::from_torso(Limb::generated(torso_length, names)?))
    }

    pub fn from_torso(torso: Limb) -> Self {
        Self { torso }
    }

    pub fn torso_mut(&mut self) -> &mut Limb {
        &mut self.torso
    }

    pub fn segment_count(&self) -> usize {
        self.torso.segment_count()
    }
}

impl Articulated for Mover {
    fn torso(&self) -> &Limb {
        &self.torso
    }
}
