//! Gaussian kernel density estimate of a set of display space points,
//! rendered through a fixed colour ramp.

use crate::coords::DisplayPosition;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Target image size in pixels
    pub width: u32,
    pub height: u32,
    /// Kernel standard deviation in pixels
    pub bandwidth: f32,
    /// Cells on the long axis of the internal grid
    pub grid_size: u32,
    pub opacity: f32,
    /// Normalizes against this value instead of the densest cell
    pub max_intensity: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            bandwidth: 32.0,
            grid_size: 128,
            opacity: 0.85,
            max_intensity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatMap {
    width: usize,
    height: usize,
    max_value: f32,
    cells: Vec<f32>,
}

impl HeatMap {
    /// `None` when there is nothing to estimate.
    pub fn estimate(config: &Config, points: &[DisplayPosition]) -> Option<Self> {
        if points.is_empty() || config.width == 0 || config.height == 0 {
            return None;
        }

        let (gw, gh) = grid_dimensions(config);
        let mut cells = vec![0.0f32; gw * gh];

        let width = config.width as f64;
        let height = config.height as f64;
        let bandwidth = (config.bandwidth as f64).max(f64::EPSILON);

        // Bandwidth in grid units
        let bw_x = bandwidth * gw as f64 / width;
        let bw_y = bandwidth * gh as f64 / height;

        // Contributions beyond 3 sigma are dropped
        let rx = (3.0 * bw_x).ceil().max(1.0);
        let ry = (3.0 * bw_y).ceil().max(1.0);

        let two_sigma_sq_x = 2.0 * bw_x * bw_x;
        let two_sigma_sq_y = 2.0 * bw_y * bw_y;

        tracing::trace!(
            "Estimating {} points on a {}x{} grid, radius {}x{}",
            points.len(),
            gw,
            gh,
            rx,
            ry
        );

        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                continue;
            }

            let gx = (point.x / width) * gw as f64;
            let gy = (point.y / height) * gh as f64;

            let x0 = (gx - rx).floor().max(0.0) as i64;
            let x1 = (gx + rx).ceil().min(gw as f64 - 1.0) as i64;
            let y0 = (gy - ry).floor().max(0.0) as i64;
            let y1 = (gy + ry).ceil().min(gh as f64 - 1.0) as i64;

            for yi in y0..=y1 {
                let dy = yi as f64 - gy;
                let dy2 = (dy * dy) / two_sigma_sq_y;
                for xi in x0..=x1 {
                    let dx = xi as f64 - gx;
                    let dx2 = (dx * dx) / two_sigma_sq_x;
                    let weight = (-(dx2 + dy2)).exp();

                    let cell = &mut cells[yi as usize * gw + xi as usize];
                    *cell = (*cell as f64 + weight) as f32;
                }
            }
        }

        let max_value = cells.iter().copied().fold(0.0f32, f32::max);

        Some(Self {
            width: gw,
            height: gh,
            max_value,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Every cell scaled into `[0, 1]`, by `max_intensity` if given and
    /// positive, by the densest cell otherwise.
    pub fn normalized(&self, max_intensity: Option<f32>) -> Vec<f32> {
        let clamp = match max_intensity {
            Some(max) if max > 0.0 => max,
            _ if self.max_value > 0.0 => self.max_value,
            _ => 1.0,
        };

        self.cells.iter().map(|v| (v / clamp).min(1.0)).collect()
    }

    /// The grid sized image, one pixel per cell.
    pub fn as_image(&self, config: &Config) -> image::RgbaImage {
        let normalized = self.normalized(config.max_intensity);

        image::RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let value = normalized[y as usize * self.width + x as usize];
            colour_ramp(value, config.opacity)
        })
    }

    /// The coloured grid smoothly scaled up to the target size.
    pub fn render(&self, config: &Config) -> image::RgbaImage {
        let small = self.as_image(config);

        tracing::trace!(
            "Scaling {}x{} to {}x{}",
            small.width(),
            small.height(),
            config.width,
            config.height
        );

        image::imageops::resize(
            &small,
            config.width,
            config.height,
            image::imageops::FilterType::Triangle,
        )
    }
}

/// Builds and renders the density image in one go, `None` without points.
pub fn render(config: &Config, points: &[DisplayPosition]) -> Option<image::RgbaImage> {
    HeatMap::estimate(config, points).map(|heatmap| heatmap.render(config))
}

fn grid_dimensions(config: &Config) -> (usize, usize) {
    let grid = config.grid_size.max(1) as f64;
    let (width, height) = (config.width as f64, config.height as f64);

    let (gw, gh) = if width >= height {
        (grid, (grid * height / width).round())
    } else {
        ((grid * width / height).round(), grid)
    };

    (gw.max(1.0) as usize, gh.max(1.0) as usize)
}

struct Stop {
    t: f32,
    rgba: [f32; 4],
}

const STOPS: [Stop; 6] = [
    Stop { t: 0.0, rgba: [0.0, 0.0, 0.0, 0.0] },
    Stop { t: 0.2, rgba: [0.0, 32.0, 128.0, 255.0] },
    Stop { t: 0.4, rgba: [0.0, 160.0, 255.0, 255.0] },
    Stop { t: 0.6, rgba: [0.0, 224.0, 64.0, 255.0] },
    Stop { t: 0.8, rgba: [255.0, 224.0, 0.0, 255.0] },
    Stop { t: 1.0, rgba: [255.0, 0.0, 0.0, 255.0] },
];

/// transparent -> deep blue -> cyan -> lime -> yellow -> red, with the alpha
/// channel scaled by `opacity`.
pub fn colour_ramp(t: f32, opacity: f32) -> image::Rgba<u8> {
    for pair in STOPS.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.t {
            let u = (t - a.t) / (b.t - a.t);
            let channel = |i: usize| a.rgba[i] + (b.rgba[i] - a.rgba[i]) * u;
            return image::Rgba([
                channel(0).round() as u8,
                channel(1).round() as u8,
                channel(2).round() as u8,
                (channel(3) * opacity).round() as u8,
            ]);
        }
    }

    let last = &STOPS[STOPS.len() - 1].rgba;
    image::Rgba([
        last[0] as u8,
        last[1] as u8,
        last[2] as u8,
        (last[3] * opacity).round() as u8,
    ])
}

impl core::fmt::Display for HeatMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.normalized(None).chunks(self.width) {
            for cell in row {
                write!(f, "{:.2} ", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
