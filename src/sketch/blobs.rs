use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use crate::models::Blob;

/// Thresholds for the blob noise classifier
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlobFilterParams {
    /// Blobs smaller than this are specks
    pub min_area: u32,
    /// Padding around the bounding box used to count neighbors
    pub isolation_margin: u32,
    pub thin_line_aspect: f32,
    pub thin_line_isolation: f32,
    pub thin_line_max_area: u32,
    pub thread_aspect: f32,
    pub thread_max_area: u32,
    pub sparse_density: f32,
    pub sparse_max_area: u32,
}

impl Default for BlobFilterParams {
    fn default() -> Self {
        Self {
            min_area: 10,
            isolation_margin: 20,
            thin_line_aspect: 80.0,
            thin_line_isolation: 0.3,
            thin_line_max_area: 100,
            thread_aspect: 150.0,
            thread_max_area: 200,
            sparse_density: 0.05,
            sparse_max_area: 50,
        }
    }
}

/// Why a blob was kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobVerdict {
    Keep,
    Speck,
    IsolatedThinLine,
    Thread,
    Sparse,
}

impl BlobVerdict {
    pub fn is_keep(self) -> bool {
        self == BlobVerdict::Keep
    }
}

/// Classify a blob; rules are checked in order and the first match wins
pub fn classify(blob: &Blob, params: &BlobFilterParams) -> BlobVerdict {
    let area = blob.area();
    if area < params.min_area {
        return BlobVerdict::Speck;
    }

    let aspect = blob.aspect_ratio();
    if aspect > params.thin_line_aspect
        && blob.isolation_ratio() < params.thin_line_isolation
        && area < params.thin_line_max_area
    {
        BlobVerdict::IsolatedThinLine
    } else if aspect > params.thread_aspect && area < params.thread_max_area {
        BlobVerdict::Thread
    } else if blob.density() < params.sparse_density && area < params.sparse_max_area {
        BlobVerdict::Sparse
    } else {
        BlobVerdict::Keep
    }
}

/// Per-pixel foreground counts with O(1) rectangle queries
struct ForegroundCounts {
    table: Vec<u32>,
    stride: usize,
}

impl ForegroundCounts {
    fn new(mask: &GrayImage) -> Self {
        let (w, h) = (mask.width() as usize, mask.height() as usize);
        let stride = w + 1;
        let mut table = vec![0u32; stride * (h + 1)];
        for y in 0..h {
            let mut row = 0u32;
            for x in 0..w {
                if mask.get_pixel(x as u32, y as u32)[0] > 0 {
                    row += 1;
                }
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row;
            }
        }
        Self { table, stride }
    }

    /// Count in the half-open rectangle [x0, x1) x [y0, y1)
    fn count(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u32 {
        let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
        self.table[y1 * self.stride + x1] + self.table[y0 * self.stride + x0]
            - self.table[y0 * self.stride + x1]
            - self.table[y1 * self.stride + x0]
    }
}

/// Label a binary mask and describe every blob.
///
/// Returns the label image alongside the blobs, ordered by label. The
/// `neighbor_pixels` of each blob counts foreground inside its bounding box
/// grown by `isolation_margin` (clamped to the image), minus its own area.
pub fn find_blobs(mask: &GrayImage, isolation_margin: u32) -> (image::ImageBuffer<Luma<u32>, Vec<u32>>, Vec<Blob>) {
    let labeled = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut blobs: Vec<Blob> = Vec::new();
    for (x, y, label) in labeled.enumerate_pixels() {
        let label_val = label[0];
        if label_val == 0 {
            continue; // Skip background
        }

        let idx = (label_val - 1) as usize;
        if idx >= blobs.len() {
            blobs.resize_with(idx + 1, || Blob {
                label: 0,
                min_x: u32::MAX,
                min_y: u32::MAX,
                max_x: 0,
                max_y: 0,
                pixel_count: 0,
                neighbor_pixels: 0,
            });
        }

        let blob = &mut blobs[idx];
        blob.label = label_val;
        blob.min_x = blob.min_x.min(x);
        blob.min_y = blob.min_y.min(y);
        blob.max_x = blob.max_x.max(x);
        blob.max_y = blob.max_y.max(y);
        blob.pixel_count += 1;
    }
    blobs.retain(|b| b.pixel_count > 0);

    let counts = ForegroundCounts::new(mask);
    let (width, height) = mask.dimensions();
    for blob in &mut blobs {
        let x0 = blob.min_x.saturating_sub(isolation_margin);
        let y0 = blob.min_y.saturating_sub(isolation_margin);
        let x1 = (blob.max_x + 1 + isolation_margin).min(width);
        let y1 = (blob.max_y + 1 + isolation_margin).min(height);
        blob.neighbor_pixels = counts.count(x0, y0, x1, y1).saturating_sub(blob.pixel_count);
    }

    (labeled, blobs)
}

/// Outcome of one filtering pass
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub mask: GrayImage,
    pub kept: usize,
    pub removed: usize,
}

/// Copy the pixels of every blob whose label is marked in `keep` into a fresh mask
fn paint_kept(labeled: &image::ImageBuffer<Luma<u32>, Vec<u32>>, keep: &[bool]) -> GrayImage {
    GrayImage::from_fn(labeled.width(), labeled.height(), |x, y| {
        let label = labeled.get_pixel(x, y)[0] as usize;
        if label > 0 && keep.get(label).copied().unwrap_or(false) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn keep_table(blobs: &[Blob], verdicts: &[bool]) -> Vec<bool> {
    let max_label = blobs.iter().map(|b| b.label as usize).max().unwrap_or(0);
    let mut keep = vec![false; max_label + 1];
    for (blob, &kept) in blobs.iter().zip(verdicts) {
        keep[blob.label as usize] = kept;
    }
    keep
}

/// Remove noise blobs (specks, isolated thin lines, threads, sparse clusters)
pub fn filter_noise_blobs(mask: &GrayImage, params: &BlobFilterParams) -> FilterOutcome {
    let (labeled, blobs) = find_blobs(mask, params.isolation_margin);

    let verdicts: Vec<bool> = blobs
        .iter()
        .map(|blob| {
            let verdict = classify(blob, params);
            if !verdict.is_keep() {
                tracing::trace!(label = blob.label, area = blob.area(), ?verdict, "dropping blob");
            }
            verdict.is_keep()
        })
        .collect();

    let kept = verdicts.iter().filter(|&&k| k).count();
    FilterOutcome {
        mask: paint_kept(&labeled, &keep_table(&blobs, &verdicts)),
        kept,
        removed: blobs.len() - kept,
    }
}

/// Remove every blob whose area is at or below `max_area`
pub fn remove_small_blobs(mask: &GrayImage, max_area: u32) -> FilterOutcome {
    let (labeled, blobs) = find_blobs(mask, 0);

    let verdicts: Vec<bool> = blobs.iter().map(|b| b.area() > max_area).collect();
    let kept = verdicts.iter().filter(|&&k| k).count();
    FilterOutcome {
        mask: paint_kept(&labeled, &keep_table(&blobs, &verdicts)),
        kept,
        removed: blobs.len() - kept,
    }
}
