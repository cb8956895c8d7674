use serde::Serialize;

/// A connected component of foreground pixels (8-connectivity)
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub label: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
    /// Foreground pixels from other blobs inside the padded bounding box
    pub neighbor_pixels: u32,
}

impl Blob {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> u32 {
        self.pixel_count
    }

    /// Long side over short side; the +1 keeps one-pixel lines finite
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = (self.width(), self.height());
        w.max(h) as f32 / (w.min(h) + 1) as f32
    }

    /// Fraction of the bounding box covered by the blob
    pub fn density(&self) -> f32 {
        self.pixel_count as f32 / (self.width() * self.height()) as f32
    }

    /// Neighboring foreground relative to the blob's own size.
    /// Low values mean the blob sits alone in empty space.
    pub fn isolation_ratio(&self) -> f32 {
        self.neighbor_pixels as f32 / (self.pixel_count + 1) as f32
    }
}

/// Result handed back to callers of [`crate::process_image`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SketchOutput {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub paths: Vec<String>,
    /// Summary label including the ink coverage, e.g. "Advanced Clean (4.2%)"
    pub method: String,
    #[serde(skip)]
    pub coverage: f32,
}

impl SketchOutput {
    pub fn new(width: u32, height: u32, paths: Vec<String>, coverage: f32) -> Self {
        Self {
            width,
            height,
            view_box: format!("0 0 {} {}", width, height),
            paths,
            method: format!("Advanced Clean ({:.1}%)", coverage),
            coverage,
        }
    }

    /// Render as a standalone SVG document with stroked, unfilled paths
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="{}">"#,
            self.width, self.height, self.view_box
        ));
        svg.push('\n');
        svg.push_str(&format!(r#"  <rect width="{}" height="{}" fill="white" />"#, self.width, self.height));
        svg.push('\n');

        for (idx, path) in self.paths.iter().enumerate() {
            svg.push_str(&format!(
                r#"  <path id="stroke-{}" stroke="black" stroke-width="1" stroke-linecap="round" fill="none" d="{}" />"#,
                idx, path
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}
