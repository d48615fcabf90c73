//! Decorative backgrounds. Nothing here touches game state.
//!
//! Both effects work in terminal cells and are rebuilt whenever the area
//! they cover changes size.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::Rng;
use ratatui::prelude::*;

const SKY: Color = Color::Rgb(0, 0, 0);
/// Terminal cells per star in the start background.
const CELLS_PER_STAR: usize = 140;
const CLOUD_COUNT: usize = 10;
/// Cloud tint is drawn at roughly 35% opacity over the black sky.
const CLOUD_OPACITY: f32 = 0.35;

#[derive(Clone, Debug)]
struct Star {
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
}

#[derive(Clone, Debug)]
struct Cloud {
    x: f32,
    y: f32,
    r: f32,
    tint: Color,
    speed: f32,
}

impl Cloud {
    /// Three overlapping ellipses: (x offset, y offset, half width, half height).
    fn puffs(&self) -> [(f32, f32, f32, f32); 3] {
        let r = self.r;
        [
            (0.0, 0.0, r * 0.8, r * 0.25),
            (r * 0.6, r * 0.03, r * 0.6, r * 0.2),
            (-r * 0.5, r * 0.05, r * 0.5, r * 0.18),
        ]
    }

    fn covers(&self, col: f32, row: f32) -> bool {
        self.puffs().iter().any(|&(ox, oy, rx, ry)| {
            let dx = (col - (self.x + ox)) / rx;
            let dy = (row - (self.y + oy)) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }
}

/// Stars and soft clouds drifting left behind the start screen.
#[derive(Clone, Debug, Default)]
pub struct StartBackground {
    stars: Vec<Star>,
    clouds: Vec<Cloud>,
    width: u16,
    height: u16,
}

impl StartBackground {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the particles if the area changed size.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            self.regenerate(width, height, &mut rand::thread_rng());
        }
    }

    fn regenerate(&mut self, width: u16, height: u16, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        let (w, h) = (width as f32, height as f32);

        let count = (width as usize * height as usize) / CELLS_PER_STAR;
        self.stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..w.max(1.0)),
                y: rng.gen_range(0.0..h.max(1.0)),
                size: rng.gen_range(1.0..2.2),
                speed: rng.gen_range(2.5..7.5),
            })
            .collect();

        self.clouds = (0..CLOUD_COUNT)
            .map(|_| {
                let mix = rng.gen_range(0.4..0.9);
                Cloud {
                    x: rng.gen_range(0.0..w.max(1.0)),
                    y: rng.gen_range(0.0..(h * 0.6).max(1.0)),
                    r: rng.gen_range(6.0..14.0),
                    tint: lerp_rgb((255, 255, 255), (80, 150, 255), mix, CLOUD_OPACITY),
                    speed: rng.gen_range(0.75..1.75),
                }
            })
            .collect();
    }

    pub fn advance(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();
        let w = self.width as f32;
        for star in &mut self.stars {
            star.x -= star.speed * secs;
            if star.x < -1.0 {
                star.x = w;
            }
        }
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed * secs;
            if cloud.x < -cloud.r {
                cloud.x = w + cloud.r;
            }
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(SKY)); w]; h];

        for cloud in &self.clouds {
            let top = (cloud.y - cloud.r).floor().max(0.0) as usize;
            let bottom = ((cloud.y + cloud.r).ceil().max(0.0) as usize).min(h);
            let left = (cloud.x - cloud.r * 1.2).floor().max(0.0) as usize;
            let right = ((cloud.x + cloud.r * 1.3).ceil().max(0.0) as usize).min(w);
            for row in top..bottom {
                for col in left..right {
                    if cloud.covers(col as f32, row as f32) {
                        grid[row][col] = (' ', Style::default().bg(cloud.tint));
                    }
                }
            }
        }

        for star in &self.stars {
            if star.x < 0.0 || star.y < 0.0 {
                continue;
            }
            let (col, row) = (star.x as usize, star.y as usize);
            if col < w && row < h {
                let ch = if star.size > 1.6 { '•' } else { '·' };
                let bg = grid[row][col].1.bg.unwrap_or(SKY);
                grid[row][col] = (ch, Style::default().fg(Color::Rgb(220, 220, 220)).bg(bg));
            }
        }

        into_lines(grid)
    }
}

#[derive(Clone, Debug)]
struct TwinkleStar {
    x: f32,
    y: f32,
    r: f32,
    phase: f32,
    speed: f32,
}

/// Twinkling stars clustered around the middle of a panel.
#[derive(Clone, Debug, Default)]
pub struct PanelStars {
    stars: Vec<TwinkleStar>,
    width: u16,
    height: u16,
    elapsed: f32,
}

impl PanelStars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            self.regenerate(width, height, &mut rand::thread_rng());
        }
    }

    fn regenerate(&mut self, width: u16, height: u16, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        let (w, h) = (width as f32, height as f32);
        let count = 24.max(width as usize * height as usize / 125);
        self.stars = (0..count)
            .map(|_| {
                let rx = (rng.gen::<f32>() - 0.5) * 0.9;
                let ry = (rng.gen::<f32>() - 0.2) * 0.6;
                TwinkleStar {
                    x: w / 2.0 + rx * w,
                    y: h * 0.38 + ry * h * 0.5,
                    r: rng.gen_range(0.8..2.4),
                    phase: rng.gen_range(0.0..TAU),
                    speed: rng.gen_range(0.8..1.8),
                }
            })
            .collect();
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt.as_secs_f32();
    }

    /// Brightness in 0..=1 at the current time.
    fn twinkle(&self, star: &TwinkleStar) -> f32 {
        ((self.elapsed * 3.0 * star.speed + star.phase).sin() + 1.0) / 2.0
    }

    fn position(&self, star: &TwinkleStar) -> (f32, f32) {
        let t = self.elapsed;
        (
            star.x + (t * 0.2 + star.phase).sin() * 0.5,
            star.y + (t * 0.25 + star.phase).cos() * 0.3,
        )
    }

    /// Stars only; every other cell is a plain space so text can be layered
    /// on top.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); w]; h];
        for star in &self.stars {
            let (x, y) = self.position(star);
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let (col, row) = (x as usize, y as usize);
            if col >= w || row >= h {
                continue;
            }
            let tw = self.twinkle(star);
            let ch = match tw {
                t if t > 0.75 && star.r > 1.6 => '✦',
                t if t > 0.4 => '+',
                _ => '·',
            };
            let level = (120.0 + tw * 120.0) as u8;
            grid[row][col] = (ch, Style::default().fg(Color::Rgb(level, level, level)));
        }
        into_lines(grid)
    }
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f32, opacity: f32) -> Color {
    let mix = |a: u8, b: u8| ((a as f32 + (b as f32 - a as f32) * t) * opacity) as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn into_lines(grid: Vec<Vec<(char, Style)>>) -> Vec<Line<'static>> {
    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn star_count_scales_with_area() {
        let mut bg = StartBackground::new();
        bg.regenerate(140, 50, &mut StdRng::seed_from_u64(1));
        assert_eq!(bg.stars.len(), 50);
        assert_eq!(bg.clouds.len(), CLOUD_COUNT);
    }

    #[test]
    fn stars_wrap_to_the_right_edge() {
        let mut bg = StartBackground::new();
        bg.regenerate(80, 24, &mut StdRng::seed_from_u64(2));
        bg.stars = vec![Star {
            x: 0.5,
            y: 3.0,
            size: 1.0,
            speed: 5.0,
        }];
        bg.advance(Duration::from_secs(1));
        assert_eq!(bg.stars[0].x, 80.0);
    }

    #[test]
    fn clouds_wrap_past_their_radius() {
        let mut bg = StartBackground::new();
        bg.regenerate(80, 24, &mut StdRng::seed_from_u64(3));
        let r = bg.clouds[0].r;
        bg.clouds[0].x = -r + 0.1;
        bg.clouds[0].speed = 1.0;
        bg.advance(Duration::from_secs(1));
        assert_eq!(bg.clouds[0].x, 80.0 + r);
    }

    #[test]
    fn background_fills_the_area() {
        let mut bg = StartBackground::new();
        bg.regenerate(30, 10, &mut StdRng::seed_from_u64(4));
        let lines = bg.lines();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.spans.len() == 30));
    }

    #[test]
    fn panel_has_a_minimum_star_count() {
        let mut panel = PanelStars::new();
        panel.regenerate(20, 3, &mut StdRng::seed_from_u64(5));
        assert_eq!(panel.stars.len(), 24);
    }

    #[test]
    fn twinkle_stays_in_unit_range() {
        let mut panel = PanelStars::new();
        panel.regenerate(60, 6, &mut StdRng::seed_from_u64(6));
        for _ in 0..50 {
            panel.advance(Duration::from_millis(37));
            for star in &panel.stars {
                let tw = panel.twinkle(star);
                assert!((0.0..=1.0).contains(&tw));
            }
        }
    }

    #[test]
    fn resize_only_rebuilds_on_change() {
        let mut panel = PanelStars::new();
        panel.resize(40, 5);
        panel.stars.truncate(1);
        panel.resize(40, 5);
        assert_eq!(panel.stars.len(), 1);
        panel.resize(41, 5);
        assert!(panel.stars.len() >= 24);
    }
}
