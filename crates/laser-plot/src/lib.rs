//! # Laser Plot
//!
//! Renders x/y sequences as an SVG scatter plot: one dot per point, a title
//! and axis labels. The plot keeps a 1:1 aspect ratio so a constant-range
//! scan shows up as a circle.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::{Circle, Group, Rectangle, Text};

/// Canvas size, styling and labels for the plot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Space between canvas edge and plot area, holds title and labels
    pub margin: f64,
    pub point_radius: f64,
    pub point_color: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: 60.0,
            point_radius: 2.5,
            point_color: "red".to_string(),
            title: "Laser Scan Data in Cartesian Coordinates".to_string(),
            x_label: "X axis".to_string(),
            y_label: "Y axis".to_string(),
        }
    }
}

/// Axis-aligned data extent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Extent {
    /// Extent of the points, widened to at least one unit per axis.
    fn of(points: &[(f64, f64)]) -> Self {
        let mut extent = Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for &(x, y) in points {
            extent.min_x = extent.min_x.min(x);
            extent.max_x = extent.max_x.max(x);
            extent.min_y = extent.min_y.min(y);
            extent.max_y = extent.max_y.max(y);
        }
        if points.is_empty() {
            return Self {
                min_x: -1.0,
                max_x: 1.0,
                min_y: -1.0,
                max_y: 1.0,
            };
        }
        if extent.max_x - extent.min_x < f64::EPSILON {
            extent.min_x -= 1.0;
            extent.max_x += 1.0;
        }
        if extent.max_y - extent.min_y < f64::EPSILON {
            extent.min_y -= 1.0;
            extent.max_y += 1.0;
        }
        extent
    }

    fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Maps data coordinates to canvas pixels, y pointing up.
struct Projection {
    scale: f64,
    data_center: (f64, f64),
    canvas_center: (f64, f64),
}

impl Projection {
    fn new(extent: Extent, options: &PlotOptions) -> Self {
        let plot_w = (options.width as f64 - 2.0 * options.margin).max(1.0);
        let plot_h = (options.height as f64 - 2.0 * options.margin).max(1.0);
        let scale = (plot_w / (extent.max_x - extent.min_x))
            .min(plot_h / (extent.max_y - extent.min_y));
        Self {
            scale,
            data_center: extent.center(),
            canvas_center: (options.width as f64 / 2.0, options.height as f64 / 2.0),
        }
    }

    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.canvas_center.0 + (x - self.data_center.0) * self.scale,
            self.canvas_center.1 - (y - self.data_center.1) * self.scale,
        )
    }
}

fn label(content: &str, x: f64, y: f64, size: u32) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-size", size)
        .set("font-family", "sans-serif")
        .set("text-anchor", "middle")
        .set("fill", "black")
}

/// Build the scatter plot document.
///
/// Points with a non-finite coordinate cannot be placed on the canvas and
/// are left out of the drawing.
///
/// # Errors
/// Fails when `xs` and `ys` differ in length.
pub fn render(xs: &[f64], ys: &[f64], options: &PlotOptions) -> Result<Document> {
    if xs.len() != ys.len() {
        bail!(
            "x and y sequences differ in length: {} vs {}",
            xs.len(),
            ys.len()
        );
    }

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (x, y))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let skipped = xs.len() - points.len();
    if skipped > 0 {
        debug!("{} non-finite points left out of the plot", skipped);
    }

    let projection = Projection::new(Extent::of(&points), options);
    let (width, height) = (options.width as f64, options.height as f64);
    let margin = options.margin;

    let mut dots = Group::new().set("fill", options.point_color.as_str());
    for &(x, y) in &points {
        let (cx, cy) = projection.project(x, y);
        dots = dots.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", options.point_radius),
        );
    }

    let frame = Rectangle::new()
        .set("x", margin)
        .set("y", margin)
        .set("width", (width - 2.0 * margin).max(0.0))
        .set("height", (height - 2.0 * margin).max(0.0))
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", 1);

    let y_label = label(&options.y_label, margin / 3.0, height / 2.0, 14).set(
        "transform",
        format!("rotate(-90 {} {})", margin / 3.0, height / 2.0),
    );

    let document = Document::new()
        .set("width", options.width)
        .set("height", options.height)
        .set("viewBox", (0, 0, options.width, options.height))
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        )
        .add(frame)
        .add(dots)
        .add(label(&options.title, width / 2.0, margin / 2.0, 16))
        .add(label(&options.x_label, width / 2.0, height - margin / 3.0, 14))
        .add(y_label);

    Ok(document)
}

/// Render the plot and write it to `path`, creating parent directories as needed.
pub fn save<P: AsRef<Path>>(path: P, xs: &[f64], ys: &[f64], options: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let document = render(xs, ys, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    svg::save(path, &document).with_context(|| format!("writing plot to {}", path.display()))?;
    info!("saved plot of {} points to {}", xs.len(), path.display());
    Ok(())
}
