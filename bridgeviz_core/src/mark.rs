// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks and their evaluated payloads.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::MarkId;

/// The kind of primitive a mark draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle.
    Rect,
    /// A filled and/or stroked path.
    Path,
    /// A single line of unshaped text.
    Text,
}

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor position is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor position is the alphabetic baseline.
    Alphabetic,
    /// The anchor position is the hanging baseline (top).
    Hanging,
    /// The anchor position is the ideographic baseline.
    Ideographic,
}

/// Payload of a [`MarkKind::Rect`] mark.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Whole-mark opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Payload of a [`MarkKind::Path`] mark.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Whole-mark opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Payload of a [`MarkKind::Text`] mark.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Evaluated visual payload of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle payload.
    Rect(RectPayload),
    /// Path payload.
    Path(PathPayload),
    /// Text payload.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the mark kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Geometric bounds of the payload.
    ///
    /// Text has no bounds here since it is unshaped.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns the opacity for rect and path payloads.
    pub fn opacity(&self) -> Option<f64> {
        match self {
            Self::Rect(r) => Some(r.opacity),
            Self::Path(p) => Some(p.opacity),
            Self::Text(_) => None,
        }
    }

    /// Sets the opacity of rect and path payloads. Text is left untouched.
    pub fn set_opacity(&mut self, opacity: f64) {
        let opacity = opacity.clamp(0.0, 1.0);
        match self {
            Self::Rect(r) => r.opacity = opacity,
            Self::Path(p) => p.opacity = opacity,
            Self::Text(_) => {}
        }
    }
}

/// A retained visual element with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Render order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Whether the mark participates in [`Scene::hit_test`](crate::Scene::hit_test).
    pub interactive: bool,
    /// Evaluated payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark. The builder defaults to a rectangle.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the mark kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns the payload bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }
}

/// Builder for [`Mark`]s.
///
/// Setters that do not apply to the selected kind are ignored at [`MarkBuilder::build`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    kind: MarkKind,
    z_index: i32,
    interactive: bool,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    fill: Brush,
    stroke: Brush,
    stroke_width: f64,
    opacity: f64,
    path: BezPath,
    text: String,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
}

impl MarkBuilder {
    fn new(id: MarkId) -> Self {
        Self {
            id,
            kind: MarkKind::Rect,
            z_index: 0,
            interactive: false,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            fill: Brush::Solid(Color::BLACK),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            opacity: 1.0,
            path: BezPath::new(),
            text: String::new(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
        }
    }

    /// Builds a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Builds a path mark.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Builds a text mark.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Marks the element as a hit-test target.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets x (rect origin or text anchor).
    pub fn x_const(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Sets y (rect origin or text anchor).
    pub fn y_const(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Sets the rect width.
    pub fn w_const(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the rect height.
    pub fn h_const(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets a solid fill color.
    pub fn fill_const(mut self, color: Color) -> Self {
        self.fill = Brush::Solid(color);
        self
    }

    /// Sets the fill paint.
    pub fn fill_brush_const(mut self, brush: Brush) -> Self {
        self.fill = brush;
        self
    }

    /// Sets the stroke paint.
    pub fn stroke_brush_const(mut self, brush: Brush) -> Self {
        self.stroke = brush;
        self
    }

    /// Sets the stroke width.
    pub fn stroke_width_const(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width.max(0.0);
        self
    }

    /// Sets the whole-mark opacity (clamped to `[0, 1]`).
    pub fn opacity_const(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the path geometry.
    pub fn path_const(mut self, path: BezPath) -> Self {
        self.path = path;
        self
    }

    /// Sets the text content.
    pub fn text_const(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn font_size_const(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text anchor.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Finishes the mark.
    ///
    /// Negative rect extents are normalized so the stored rect always has `x0 <= x1` and
    /// `y0 <= y1`.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectPayload {
                rect: Rect::new(self.x, self.y, self.x + self.w, self.y + self.h).abs(),
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
                opacity: self.opacity,
            }),
            MarkKind::Path => MarkPayload::Path(PathPayload {
                path: self.path,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
                opacity: self.opacity,
            }),
            MarkKind::Text => MarkPayload::Text(TextPayload {
                pos: Point::new(self.x, self.y),
                text: self.text,
                font_size: self.font_size,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill,
            }),
        };
        Mark {
            id: self.id,
            z_index: self.z_index,
            interactive: self.interactive,
            payload,
        }
    }
}
