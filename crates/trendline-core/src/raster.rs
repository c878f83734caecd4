// File: crates/trendline-core/src/raster.rs
// Summary: Headless PNG rendering of a scene using Skia CPU raster surfaces (feature "png").

use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::scene::{Anchor, Node, Scene, Stroke, Text};
use crate::theme::Color;

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.alpha, c.red, c.green, c.blue)
}

/// Rasterise `scene` and encode it as PNG.
pub fn to_png_bytes(scene: &Scene) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((scene.width as i32, scene.height as i32))
        .ok_or_else(|| ChartError::Raster("failed to create raster surface".into()))?;
    let canvas = surface.canvas();
    canvas.clear(sk_color(scene.background));

    for node in &scene.root {
        draw_node(canvas, node);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Raster("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

// ---- helpers ----------------------------------------------------------------

fn draw_node(canvas: &skia::Canvas, node: &Node) {
    match node {
        Node::Group { translate, children, .. } => {
            canvas.save();
            canvas.translate((translate.0 as f32, translate.1 as f32));
            for c in children {
                draw_node(canvas, c);
            }
            canvas.restore();
        }
        Node::Line { from, to, stroke } => {
            let paint = stroke_paint(stroke);
            canvas.draw_line((from.0 as f32, from.1 as f32), (to.0 as f32, to.1 as f32), &paint);
        }
        Node::Polyline { subpaths, stroke, .. } => {
            let mut path = skia::Path::new();
            for sub in subpaths {
                let mut pts = sub.iter();
                if let Some(&(x0, y0)) = pts.next() {
                    path.move_to((x0 as f32, y0 as f32));
                    for &(x, y) in pts {
                        path.line_to((x as f32, y as f32));
                    }
                }
            }
            canvas.draw_path(&path, &stroke_paint(stroke));
        }
        Node::Text(t) => draw_text(canvas, t),
    }
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(sk_color(stroke.color));
    if let Some(dash) = stroke.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[dash, dash], 0.0));
    }
    paint
}

fn draw_text(canvas: &skia::Canvas, t: &Text) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(sk_color(t.fill));
    let mut font = skia::Font::default();
    font.set_size(t.size);

    let (width, _) = font.measure_str(&t.content, Some(&paint));
    let x = match t.anchor {
        Anchor::Start => t.x as f32,
        Anchor::Middle => t.x as f32 - width * 0.5,
        Anchor::End => t.x as f32 - width,
    };
    let y = t.y as f32 + t.dy as f32 * t.size;

    canvas.save();
    if let Some(deg) = t.rotate {
        canvas.rotate(deg as f32, None);
    }
    canvas.draw_str(&t.content, (x, y), &font, &paint);
    canvas.restore();
}
