// File: crates/trendline-core/src/scene.rs
// Summary: Backend-neutral display list (groups, lines, polylines, texts) produced by a chart.

use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash and gap length; `None` draws a solid line.
    pub dash: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    /// Baseline shift in em units.
    pub dy: f64,
    /// Rotation in degrees applied around the group origin before positioning.
    pub rotate: Option<f64>,
    pub anchor: Anchor,
    pub size: f32,
    pub fill: Color,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group {
        class: Option<&'static str>,
        translate: (f64, f64),
        children: Vec<Node>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    /// Each inner vector is one subpath of straight segments.
    Polyline {
        class: Option<&'static str>,
        subpaths: Vec<Vec<(f64, f64)>>,
        stroke: Stroke,
    },
    Text(Text),
}

impl Node {
    pub fn group(class: Option<&'static str>, translate: (f64, f64), children: Vec<Node>) -> Self {
        Node::Group { class, translate, children }
    }

    /// Depth-first visit of this node and its descendants.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        if let Node::Group { children, .. } = self {
            for c in children {
                c.walk(f);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub font_family: &'static str,
    pub root: Vec<Node>,
}

impl Scene {
    /// Groups at any depth carrying `class`.
    pub fn groups_with_class(&self, class: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        for n in &self.root {
            n.walk(&mut |node| {
                if let Node::Group { class: Some(c), .. } = node {
                    if *c == class {
                        out.push(node);
                    }
                }
            });
        }
        out
    }
}
