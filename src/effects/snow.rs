//! Pixel snow: flakes falling at different speeds with a slight drift.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::field::{Particle, ParticleField};
use super::BackgroundEffect;

const FLAKES: &[char] = &['*', '.', '+', '\''];

/// Falling snow.
#[derive(Debug)]
pub struct SnowEffect {
    field: ParticleField,
}

impl SnowEffect {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            field: ParticleField::new(width, height, StdRng::from_entropy()),
        }
    }

    /// Creates an effect with deterministic particles.
    pub fn with_seed(width: u16, height: u16, seed: u64) -> Self {
        Self {
            field: ParticleField::from_seed(width, height, seed),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

fn flake(rng: &mut StdRng, x: f32, y: f32) -> Particle {
    Particle {
        x,
        y,
        vx: rng.gen_range(-0.15..0.15),
        vy: rng.gen_range(0.2..0.7),
        phase: 0.0,
        glyph: FLAKES[rng.gen_range(0..FLAKES.len())],
    }
}

impl BackgroundEffect for SnowEffect {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn start(&mut self) {
        self.field.set_running(true);
        self.field.fill_with(flake);
    }

    fn stop(&mut self) {
        self.field.set_running(false);
        self.field.clear();
    }

    fn is_running(&self) -> bool {
        self.field.is_running()
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.field.resize(width, height);
        if self.field.is_running() {
            self.field.fill_with(flake);
        }
    }

    fn step(&mut self) {
        if !self.field.is_running() || self.field.width() == 0 {
            return;
        }

        let w = f32::from(self.field.width());
        let h = f32::from(self.field.height());
        let mut respawn = Vec::new();

        for (i, p) in self.field.particles_mut().iter_mut().enumerate() {
            p.x = (p.x + p.vx).rem_euclid(w);
            p.y += p.vy;
            if p.y >= h {
                respawn.push(i);
            }
        }

        for i in respawn {
            let x = self.field.rng().gen_range(0.0..w);
            let fresh = flake(self.field.rng(), x, 0.0);
            self.field.particles_mut()[i] = fresh;
        }
    }

    fn render(&self) -> Vec<String> {
        self.field.render()
    }
}
