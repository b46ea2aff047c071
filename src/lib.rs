//! # mover-scene
//!
//! An articulated-body model and a converter that turns it into a MuJoCo-style
//! scene description.
//!
//! A [`Mover`] owns a torso [`Limb`]; limbs own rigid [`Segment`]s, and segments
//! carry further limbs at their origin or terminus end. [`MoverConverter`] walks
//! that tree depth-first and emits one `<body>` per segment, nesting the bodies
//! of attached limbs inside it so that parent motion carries its children along.

pub mod articulation;
pub mod converter;
pub mod error;
pub mod naming;
pub mod scene;

pub use articulation::*;
pub use converter::*;
pub use error::*;
pub use naming::*;
pub use scene::*;
