//! Bounding-box overlays scaled onto a page image.
//!
//! ALTO coordinates are in the page's own pixel space; the image delivered
//! alongside it is usually downscaled. Shapes are scaled per axis by
//! `image / page` so they line up with the image.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ElementKind, PageLayout, Region};

/// Options for overlay rendering.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Which records to draw
    pub kind: ElementKind,

    /// Edge colour for records without a region (defaults per kind)
    pub color: Option<String>,

    /// Draw block numbers at block centres
    pub show_numbers: bool,

    /// Stroke width in image pixels
    pub stroke_width: f64,

    /// Image to draw the boxes over in SVG output
    pub image_href: Option<String>,
}

impl OverlayOptions {
    /// Create new overlay options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records to draw.
    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the edge colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Enable or disable block numbers.
    pub fn with_numbers(mut self, show: bool) -> Self {
        self.show_numbers = show;
        self
    }

    /// Set the stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the background image reference.
    pub fn with_image_href(mut self, href: impl Into<String>) -> Self {
        self.image_href = Some(href.into());
        self
    }

    fn base_color(&self) -> &str {
        match self.color {
            Some(ref c) => c,
            None => match self.kind {
                ElementKind::Blocks => "red",
                ElementKind::Lines => "blue",
                ElementKind::Words => "green",
            },
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            kind: ElementKind::Blocks,
            color: None,
            show_numbers: false,
            stroke_width: 1.0,
            image_href: None,
        }
    }
}

/// A rectangle in image coordinates, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayShape {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Stroke colour
    pub edge_color: String,
    /// Number drawn at the centre
    pub number: Option<u32>,
    /// Region tag drawn at the top-left corner (margins only)
    pub tag: Option<String>,
}

impl OverlayShape {
    /// Centre point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

fn region_color(region: Region) -> &'static str {
    match region {
        Region::PrintSpace => "red",
        Region::TopMargin => "orange",
        Region::BottomMargin => "gray",
    }
}

/// Scale the selected records of a layout onto an image of `image_size`.
pub fn overlay_shapes(
    layout: &PageLayout,
    image_size: (u32, u32),
    options: &OverlayOptions,
) -> Result<Vec<OverlayShape>> {
    let (page_width, page_height) = layout
        .dimensions()
        .filter(|(w, h)| *w > 0 && *h > 0)
        .ok_or_else(|| Error::Render("page dimensions unavailable".to_string()))?;

    let (image_width, image_height) = image_size;
    if image_width == 0 || image_height == 0 {
        return Err(Error::Render(format!(
            "invalid image size {}x{}",
            image_width, image_height
        )));
    }

    let scale_x = image_width as f64 / page_width as f64;
    let scale_y = image_height as f64 / page_height as f64;

    let shapes = layout
        .elements(options.kind)
        .into_iter()
        .map(|element| {
            let rect = element.rect();
            let region = element.region();
            let edge_color = match region {
                Some(r) => region_color(r),
                None => options.base_color(),
            };
            let (x, y, width, height) = rect.scaled(scale_x, scale_y);
            OverlayShape {
                x,
                y,
                width,
                height,
                edge_color: edge_color.to_string(),
                number: element.number().filter(|_| options.show_numbers),
                tag: region
                    .filter(|r| r.is_margin())
                    .map(|r| r.label().to_string()),
            }
        })
        .collect();

    Ok(shapes)
}

/// Render shapes as a standalone SVG document of `image_size`.
pub fn to_svg(shapes: &[OverlayShape], image_size: (u32, u32), options: &OverlayOptions) -> String {
    let (width, height) = image_size;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );

    if let Some(ref href) = options.image_href {
        let _ = writeln!(
            svg,
            r#"  <image href="{}" x="0" y="0" width="{}" height="{}"/>"#,
            escape_xml(href),
            width,
            height
        );
    }

    for shape in shapes {
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            shape.x,
            shape.y,
            shape.width,
            shape.height,
            escape_xml(&shape.edge_color),
            options.stroke_width
        );

        if let Some(number) = shape.number {
            let (cx, cy) = shape.center();
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" fill="yellow" font-size="10" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                cx, cy, number
            );
        }

        if let Some(ref tag) = shape.tag {
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" fill="{}" font-size="8" dominant-baseline="hanging">{}</text>"#,
                shape.x + 2.0,
                shape.y + 2.0,
                escape_xml(&shape.edge_color),
                escape_xml(tag)
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Scale a layout onto an image and render it as SVG.
pub fn render_overlay_svg(
    layout: &PageLayout,
    image_size: (u32, u32),
    options: &OverlayOptions,
) -> Result<String> {
    let shapes = overlay_shapes(layout, image_size, options)?;
    Ok(to_svg(&shapes, image_size, options))
}

fn escape_xml(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, TextBlock, TextLine};

    fn layout() -> PageLayout {
        let mut layout = PageLayout::new(1000, 2000);
        layout.blocks.push(TextBlock {
            rect: Rect::new(100, 200, 300, 400),
            id: 1,
            region: Region::PrintSpace,
        });
        layout.blocks.push(TextBlock {
            rect: Rect::new(0, 0, 100, 50),
            id: 2,
            region: Region::TopMargin,
        });
        layout.lines.push(TextLine {
            rect: Rect::new(10, 20, 30, 40),
        });
        layout
    }

    #[test]
    fn test_shapes_are_scaled_per_axis() {
        let shapes = overlay_shapes(&layout(), (500, 500), &OverlayOptions::new()).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].x, 50.0);
        assert_eq!(shapes[0].y, 50.0);
        assert_eq!(shapes[0].width, 150.0);
        assert_eq!(shapes[0].height, 100.0);
    }

    #[test]
    fn test_region_colors_and_tags() {
        let shapes = overlay_shapes(&layout(), (1000, 2000), &OverlayOptions::new()).unwrap();
        assert_eq!(shapes[0].edge_color, "red");
        assert_eq!(shapes[0].tag, None);
        assert_eq!(shapes[1].edge_color, "orange");
        assert_eq!(shapes[1].tag.as_deref(), Some("TopMargin"));
    }

    #[test]
    fn test_numbers_only_when_requested() {
        let plain = overlay_shapes(&layout(), (1000, 2000), &OverlayOptions::new()).unwrap();
        assert!(plain.iter().all(|s| s.number.is_none()));

        let numbered = overlay_shapes(
            &layout(),
            (1000, 2000),
            &OverlayOptions::new().with_numbers(true),
        )
        .unwrap();
        assert_eq!(numbered[1].number, Some(2));
    }

    #[test]
    fn test_lines_use_chosen_color() {
        let options = OverlayOptions::new().with_kind(ElementKind::Lines);
        let shapes = overlay_shapes(&layout(), (1000, 2000), &options).unwrap();
        assert_eq!(shapes[0].edge_color, "blue");

        let options = options.with_color("purple").with_numbers(true);
        let shapes = overlay_shapes(&layout(), (1000, 2000), &options).unwrap();
        assert_eq!(shapes[0].edge_color, "purple");
        assert_eq!(shapes[0].number, None);
    }

    #[test]
    fn test_negative_positions_scale() {
        let mut layout = PageLayout::new(100, 100);
        layout.blocks.push(TextBlock {
            rect: Rect::new(-10, -4, 20, 20),
            id: 1,
            region: Region::PrintSpace,
        });
        let shapes = overlay_shapes(&layout, (50, 50), &OverlayOptions::new()).unwrap();
        assert_eq!((shapes[0].x, shapes[0].y), (-5.0, -2.0));
        assert_eq!(shapes[0].width, 10.0);
    }

    #[test]
    fn test_missing_dimensions_is_error() {
        let result = overlay_shapes(&PageLayout::empty(), (10, 10), &OverlayOptions::new());
        assert!(matches!(result, Err(Error::Render(_))));

        let result = overlay_shapes(&layout(), (0, 10), &OverlayOptions::new());
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_svg_output() {
        let options = OverlayOptions::new()
            .with_numbers(true)
            .with_image_href("page.jpg?a=1&b=2");
        let svg = render_overlay_svg(&layout(), (1000, 2000), &options).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"href="page.jpg?a=1&amp;b=2""#));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(">TopMargin</text>"));
        assert!(svg.contains(">1</text>"));
    }
}
