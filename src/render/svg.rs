//! SVG serialization of a [`Canvas`].
//!
//! Coordinates are written in physical user units: every unit-space value
//! is multiplied by the canvas side length. Numbers are printed with a fixed
//! precision so identical canvases give identical bytes.

use std::io::{self, Write};

use crate::models::{LinearGradient, Rect, Rgba};
use crate::render::canvas::{Canvas, DrawCommand, Paint};

/// Format a number with at most six decimals and no trailing zeros.
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.6}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn fmt_color(c: &Rgba) -> String {
    format!(
        "rgb({}%,{}%,{}%)",
        fmt_num(c.r * 100.0),
        fmt_num(c.g * 100.0),
        fmt_num(c.b * 100.0)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn write_gradient<W: Write + ?Sized>(
    out: &mut W,
    id: &str,
    g: &LinearGradient,
    scale: f64,
) -> io::Result<()> {
    writeln!(
        out,
        r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        id,
        fmt_num(g.start.x * scale),
        fmt_num(g.start.y * scale),
        fmt_num(g.end.x * scale),
        fmt_num(g.end.y * scale),
    )?;
    for stop in g.stops() {
        writeln!(
            out,
            r#"<stop offset="{}" style="stop-color:{};stop-opacity:{}"/>"#,
            fmt_num(stop.offset),
            fmt_color(&stop.color),
            fmt_num(stop.color.a),
        )?;
    }
    writeln!(out, "</linearGradient>")
}

fn write_rect<W: Write + ?Sized>(
    out: &mut W,
    rect: &Rect,
    fill: &str,
    scale: f64,
) -> io::Result<()> {
    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" style="{}"/>"#,
        fmt_num(rect.x * scale),
        fmt_num(rect.y * scale),
        fmt_num(rect.width * scale),
        fmt_num(rect.height * scale),
        fill,
    )
}

/// Serialize `canvas` as a standalone SVG document.
pub fn write_svg<W: Write + ?Sized>(canvas: &Canvas, out: &mut W) -> io::Result<()> {
    let scale = canvas.side_length();
    let side = fmt_num(scale);

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
        side
    )?;

    let gradients: Vec<&LinearGradient> = canvas
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect {
                paint: Paint::Gradient(g),
                ..
            } => Some(g),
            _ => None,
        })
        .collect();
    if !gradients.is_empty() {
        writeln!(out, "<defs>")?;
        for (idx, g) in gradients.iter().enumerate() {
            write_gradient(out, &format!("gradient{}", idx), g, scale)?;
        }
        writeln!(out, "</defs>")?;
    }

    let family = escape(canvas.font_family());
    let mut gradient_idx = 0;
    for command in canvas.commands() {
        match command {
            DrawCommand::FillRect { rect, paint } => {
                let fill = match paint {
                    Paint::Solid(c) => {
                        format!("fill:{};fill-opacity:{}", fmt_color(c), fmt_num(c.a))
                    }
                    Paint::Gradient(_) => {
                        let fill = format!("fill:url(#gradient{})", gradient_idx);
                        gradient_idx += 1;
                        fill
                    }
                };
                write_rect(out, rect, &fill, scale)?;
            }
            DrawCommand::StrokeLine {
                segment,
                width,
                color,
            } => {
                writeln!(
                    out,
                    r#"<path d="M {} {} L {} {}" style="fill:none;stroke-width:{};stroke-linecap:butt;stroke:{};stroke-opacity:{}"/>"#,
                    fmt_num(segment.from.x * scale),
                    fmt_num(segment.from.y * scale),
                    fmt_num(segment.to.x * scale),
                    fmt_num(segment.to.y * scale),
                    fmt_num(width * scale),
                    fmt_color(color),
                    fmt_num(color.a),
                )?;
            }
            DrawCommand::FillText {
                origin,
                text,
                font_size,
                color,
            } => {
                writeln!(
                    out,
                    r#"<text x="{}" y="{}" style="font-family:{};font-size:{}px;fill:{};fill-opacity:{}">{}</text>"#,
                    fmt_num(origin.x * scale),
                    fmt_num(origin.y * scale),
                    family,
                    fmt_num(font_size * scale),
                    fmt_color(color),
                    fmt_num(color.a),
                    escape(text),
                )?;
            }
        }
    }

    writeln!(out, "</svg>")
}
