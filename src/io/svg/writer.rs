//! SVG writing operations.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};

/// String-based SVG writer for in-memory rendering.
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Get the SVG string
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

/// Write a fully rendered SVG document to `path`.
pub(crate) fn write_svg_file(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg)
        .with_context(|| format!("[io::svg] Failed to write {}", path.display()))
}

/// Write the XML declaration, the opening <svg> tag and a white background.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write shared styles for map regions, labels and pie slices.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .region {{ stroke: #cccccc; stroke-width: 0.5; fill-rule: evenodd; vector-effect: non-scaling-stroke; }}
    .label {{ font-family: sans-serif; font-size: 8px; fill: #000000; text-anchor: middle; }}
    .title {{ font-family: sans-serif; font-size: 15px; fill: #000000; text-anchor: middle; }}
    .slice {{ stroke: #ffffff; stroke-width: 1; }}
    .slice-label {{ font-family: sans-serif; font-size: 11px; fill: #000000; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write a centered title line.
pub(crate) fn write_svg_title<W: Write>(writer: &mut W, x: f64, y: f64, title: &str) -> Result<()> {
    writeln!(writer, r#"<text class="title" x="{x:.3}" y="{y:.3}">{}</text>"#, escape_xml(title))?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text for use in SVG element content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
