//! Engine-agnostic scene graph and its MJCF text form.
//!
//! A [`SceneBody`] is a placement group: it establishes a frame for the shapes
//! and bodies nested inside it, so moving a body moves everything below it.
//! The [`Display`](fmt::Display) impls render the tree as MuJoCo-style
//! `<body>` / `<geom>` tags.

use glam::{Vec3, Vec4};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Shape kinds a geom may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeomShape {
    Box,
}

impl GeomShape {
    /// The MJCF `type` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
        }
    }
}

/// One renderable rigid shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneGeom {
    pub name: String,
    pub shape: GeomShape,
    /// Extents along (x, y, z).
    pub size: Vec3,
    pub pos: Vec3,
    pub rgba: Vec4,
}

/// A placement group holding shapes and nested groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneBody {
    pub name: String,
    pub pos: Option<Vec3>,
    pub euler: Option<Vec3>,
    pub geoms: Vec<SceneGeom>,
    pub children: Vec<SceneBody>,
}

impl SceneBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: None,
            euler: None,
            geoms: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn with_euler(mut self, euler: Vec3) -> Self {
        self.euler = Some(euler);
        self
    }

    /// Number of geoms in this body and all nested bodies.
    pub fn geom_count(&self) -> usize {
        self.geoms.len() + self.children.iter().map(SceneBody::geom_count).sum::<usize>()
    }

    /// Nesting depth, counting this body as 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SceneBody::depth).max().unwrap_or(0)
    }

    /// Depth-first search for a body by name, this body included.
    pub fn find(&self, name: &str) -> Option<&SceneBody> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Writes this body and everything nested in it as `<body>` / `<geom>` events.
    pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> fmt::Result {
        let mut body = BytesStart::new("body");
        body.push_attribute(("name", self.name.as_str()));
        if let Some(pos) = self.pos {
            body.push_attribute(("pos", components(&pos.to_array()).as_str()));
        }
        if let Some(euler) = self.euler {
            body.push_attribute(("euler", components(&euler.to_array()).as_str()));
        }
        writer
            .write_event(Event::Start(body))
            .map_err(|_| fmt::Error)?;
        for geom in &self.geoms {
            geom.write_xml(writer)?;
        }
        for child in &self.children {
            child.write_xml(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("body")))
            .map_err(|_| fmt::Error)
    }
}

impl SceneGeom {
    /// Writes this geom as a single empty `<geom/>` element.
    pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> fmt::Result {
        let mut geom = BytesStart::new("geom");
        geom.push_attribute(("name", self.name.as_str()));
        geom.push_attribute(("type", self.shape.as_str()));
        geom.push_attribute(("size", components(&self.size.to_array()).as_str()));
        geom.push_attribute(("pos", components(&self.pos.to_array()).as_str()));
        geom.push_attribute(("rgba", components(&self.rgba.to_array()).as_str()));
        writer
            .write_event(Event::Empty(geom))
            .map_err(|_| fmt::Error)
    }
}

/// Renders through an indenting XML writer (two spaces per level).
fn render(
    f: &mut fmt::Formatter<'_>,
    write: impl FnOnce(&mut Writer<Vec<u8>>) -> fmt::Result,
) -> fmt::Result {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(&mut writer)?;
    let bytes = writer.into_inner();
    f.write_str(std::str::from_utf8(&bytes).map_err(|_| fmt::Error)?)
}

impl fmt::Display for SceneGeom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |writer| self.write_xml(writer))
    }
}

impl fmt::Display for SceneBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |writer| self.write_xml(writer))
    }
}

/// Space separated numbers, each in shortest round-trip form.
fn components(values: &[f32]) -> String {
    values
        .iter()
        .map(f32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
