//! Particle storage and rasterisation shared by the effects.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cells per particle when sizing a field.
const CELLS_PER_PARTICLE: usize = 24;
/// Upper bound on particles in one field.
const MAX_PARTICLES: usize = 400;

/// A single falling particle, in cell coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Sway phase, in radians
    pub phase: f32,
    pub glyph: char,
}

/// A fixed-size grid of particles.
#[derive(Debug)]
pub struct ParticleField {
    width: u16,
    height: u16,
    particles: Vec<Particle>,
    running: bool,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: u16, height: u16, rng: StdRng) -> Self {
        Self {
            width,
            height,
            particles: Vec::new(),
            running: false,
            rng,
        }
    }

    pub fn from_seed(width: u16, height: u16, seed: u64) -> Self {
        Self::new(width, height, StdRng::seed_from_u64(seed))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Number of particles appropriate for the current size.
    pub fn target_count(&self) -> usize {
        (usize::from(self.width) * usize::from(self.height) / CELLS_PER_PARTICLE)
            .min(MAX_PARTICLES)
    }

    /// Adds or drops particles until the target count is reached.
    ///
    /// New particles are scattered over the whole field.
    pub fn fill_with(&mut self, mut spawn: impl FnMut(&mut StdRng, f32, f32) -> Particle) {
        let target = self.target_count();
        self.particles.truncate(target);

        let (w, h) = (f32::from(self.width), f32::from(self.height));
        while self.particles.len() < target {
            let x = self.rng.gen_range(0.0..w);
            let y = self.rng.gen_range(0.0..h);
            let particle = spawn(&mut self.rng, x, y);
            self.particles.push(particle);
        }
    }

    /// Changes the size and pulls stray particles back inside.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            self.particles.clear();
            return;
        }

        let (w, h) = (f32::from(width), f32::from(height));
        for p in &mut self.particles {
            p.x = p.x.rem_euclid(w);
            if p.y >= h {
                p.y = p.y.rem_euclid(h);
            }
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Rasterises the particles into `height` lines of `width` cells.
    pub fn render(&self) -> Vec<String> {
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let mut grid = vec![vec![' '; w]; h];

        for p in &self.particles {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (cx, cy) = (p.x as usize, p.y as usize);
            if cx < w && cy < h {
                grid[cy][cx] = p.glyph;
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}
