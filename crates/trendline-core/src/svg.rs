// File: crates/trendline-core/src/svg.rs
// Summary: SVG serialisation of a scene.

use std::fmt::Write;

use crate::color::to_css;
use crate::scene::{Node, Scene, Stroke, Text};

/// Serialise `scene` as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = scene.width,
        h = scene.height,
        font = escape_text(scene.font_family),
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        scene.width,
        scene.height,
        to_css(scene.background)
    );
    for node in &scene.root {
        write_node(&mut svg, node, 1);
    }
    svg.push_str("</svg>\n");
    svg
}

fn write_node(svg: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Group { class, translate, children } => {
            let _ = write!(svg, "{pad}<g");
            if let Some(c) = class {
                let _ = write!(svg, r#" class="{c}""#);
            }
            if *translate != (0.0, 0.0) {
                let _ = write!(svg, r#" transform="translate({},{})""#, num(translate.0), num(translate.1));
            }
            svg.push_str(">\n");
            for c in children {
                write_node(svg, c, depth + 1);
            }
            let _ = writeln!(svg, "{pad}</g>");
        }
        Node::Line { from, to, stroke } => {
            let _ = writeln!(
                svg,
                r#"{pad}<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                num(from.0),
                num(from.1),
                num(to.0),
                num(to.1),
                stroke_attrs(stroke)
            );
        }
        Node::Polyline { class, subpaths, stroke } => {
            let _ = write!(svg, "{pad}<path");
            if let Some(c) = class {
                let _ = write!(svg, r#" class="{c}""#);
            }
            let _ = writeln!(svg, r#" d="{}" fill="none"{}/>"#, path_data(subpaths), stroke_attrs(stroke));
        }
        Node::Text(t) => write_text(svg, t, &pad),
    }
}

fn write_text(svg: &mut String, t: &Text, pad: &str) {
    let _ = write!(svg, "{pad}<text");
    if let Some(deg) = t.rotate {
        let _ = write!(svg, r#" transform="rotate({})""#, num(deg));
    }
    let _ = write!(svg, r#" x="{}" y="{}""#, num(t.x), num(t.y));
    if t.dy != 0.0 {
        let _ = write!(svg, r#" dy="{}em""#, num(t.dy));
    }
    let _ = writeln!(
        svg,
        r#" text-anchor="{}" font-size="{}" fill="{}">{}</text>"#,
        t.anchor.as_str(),
        num(t.size as f64),
        to_css(t.fill),
        escape_text(&t.content)
    );
}

fn stroke_attrs(s: &Stroke) -> String {
    let mut out = format!(r#" stroke="{}" stroke-width="{}""#, to_css(s.color), num(s.width as f64));
    if let Some(dash) = s.dash {
        let _ = write!(out, r#" stroke-dasharray="{}""#, num(dash as f64));
    }
    out
}

/// `M x,y L x,y ...` with one `M` per subpath.
pub fn path_data(subpaths: &[Vec<(f64, f64)>]) -> String {
    let mut d = String::new();
    for sub in subpaths {
        for (i, (x, y)) in sub.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            let _ = write!(d, "{},{}", num(*x), num(*y));
        }
    }
    d
}

/// Fixed two-decimal output with trailing zeros removed.
fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Escape text content and attribute values.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(3.14159), "3.14");
    }

    #[test]
    fn gaps_start_new_subpaths() {
        let d = path_data(&[vec![(0.0, 10.0), (5.0, 2.5)], vec![(20.0, 1.0)]]);
        assert_eq!(d, "M0,10L5,2.5M20,1");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_text("flaky+timeout <b> & \"x\""), "flaky+timeout &lt;b&gt; &amp; &quot;x&quot;");
    }
}
