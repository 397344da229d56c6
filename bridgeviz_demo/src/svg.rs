// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toy host canvas: applies mark diffs to retained SVG elements.

use std::collections::HashMap;
use std::fmt::Write as _;

use bridgeviz_core::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    elements: HashMap<MarkId, (i32, MarkPayload)>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.elements.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.elements.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.elements.remove(id);
                }
            }
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box.unwrap_or(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();
        let (w, h) = (view_box.width(), view_box.height());
        let _ = writeln!(
            out,
            r#"<svg xmlns="{SVG_NS}" viewBox="{} {} {w} {h}" width="{w}" height="{h}">"#,
            view_box.x0, view_box.y0
        );

        let mut ordered: Vec<_> = self.elements.iter().collect();
        ordered.sort_by_key(|(id, (z, _))| (*z, id.0));

        for (_, (_, payload)) in ordered {
            match payload {
                MarkPayload::Rect(r) => {
                    let _ = write!(
                        out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    );
                    write_paint_attr(&mut out, "fill", &r.fill);
                    write_stroke(&mut out, &r.stroke, r.stroke_width);
                    write_opacity(&mut out, r.opacity);
                    out.push_str("/>\n");
                }
                MarkPayload::Path(p) => {
                    let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
                    write_paint_attr(&mut out, "fill", &p.fill);
                    write_stroke(&mut out, &p.stroke, p.stroke_width);
                    write_opacity(&mut out, p.opacity);
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                        TextBaseline::Ideographic => "ideographic",
                    };
                    let anchor = match t.anchor {
                        TextAnchor::Start => "start",
                        TextAnchor::Middle => "middle",
                        TextAnchor::End => "end",
                    };
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{}""#,
                        t.pos.x, t.pos.y, t.font_size
                    );
                    let _ = write!(
                        out,
                        r#" dominant-baseline="{baseline}" text-anchor="{anchor}""#
                    );
                    write_paint_attr(&mut out, "fill", &t.fill);
                    let _ = writeln!(out, ">{}</text>", escape_xml(&t.text));
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let alpha = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (paint, alpha)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, alpha) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(a) = alpha {
        let _ = write!(out, r#" {name}-opacity="{a}""#);
    }
}

fn write_stroke(out: &mut String, brush: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", brush);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        let _ = write!(out, r#" opacity="{opacity}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
