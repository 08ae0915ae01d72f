//! Autumn leaves: slow fall, swaying side to side, blown slightly right.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::field::{Particle, ParticleField};
use super::BackgroundEffect;

const LEAVES: &[char] = &['&', '%', '@', '~'];

/// Horizontal amplitude of the sway, in cells per step.
const SWAY: f32 = 0.35;
/// Constant wind to the right.
const WIND: f32 = 0.08;

/// Falling leaves.
#[derive(Debug)]
pub struct LeavesEffect {
    field: ParticleField,
}

impl LeavesEffect {
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

fn leaf(rng: &mut StdRng, x: f32, y: f32) -> Particle {
    Particle {
        x,
        y,
        vx: WIND,
        vy: rng.gen_range(0.1..0.35),
        phase: rng.gen_range(0.0..std::f32::consts::TAU),
        glyph: LEAVES[rng.gen_range(0..LEAVES.len())],
    }
}

impl BackgroundEffect for LeavesEffect {
    fn name(&self) -> &'static str {
        "leaves"
    }

    fn start(&mut self) {
        self.field.set_running(true);
        self.field.fill_with(leaf);
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
            self.field.fill_with(leaf);
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
            p.phase = (p.phase + 0.25) % std::f32::consts::TAU;
            p.x = (p.x + p.vx + p.phase.sin() * SWAY).rem_euclid(w);
            p.y += p.vy;
            if p.y >= h {
                respawn.push(i);
            }
        }

        for i in respawn {
            let x = self.field.rng().gen_range(0.0..w);
            let fresh = leaf(self.field.rng(), x, 0.0);
            self.field.particles_mut()[i] = fresh;
        }
    }

    fn render(&self) -> Vec<String> {
        self.field.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_populates() {
        let mut leaves = LeavesEffect::with_seed(80, 24, 5);
        leaves.start();

        assert!(leaves.is_running());
        assert!(!leaves.field().particles().is_empty());
    }

    #[test]
    fn test_leaves_sway() {
        let mut leaves = LeavesEffect::with_seed(200, 50, 5);
        leaves.start();
        let before: Vec<f32> = leaves.field().particles().iter().map(|p| p.x).collect();

        leaves.step();

        let shifted = leaves
            .field()
            .particles()
            .iter()
            .zip(&before)
            .filter(|(p, x)| (p.x - **x).abs() > f32::EPSILON)
            .count();
        assert!(shifted > 0);
    }

    #[test]
    fn test_leaves_stay_in_bounds() {
        let mut leaves = LeavesEffect::with_seed(30, 8, 11);
        leaves.start();

        for _ in 0..300 {
            leaves.step();
        }

        for p in leaves.field().particles() {
            assert!(p.x >= 0.0 && p.x < 30.0);
            assert!(p.y >= 0.0 && p.y < 8.0);
        }
    }

    #[test]
    fn test_resize_while_running_refills() {
        let mut leaves = LeavesEffect::with_seed(20, 5, 1);
        leaves.start();

        leaves.resize(120, 40);

        assert_eq!(
            leaves.field().particles().len(),
            leaves.field().target_count()
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(LeavesEffect::with_seed(1, 1, 0).name(), "leaves");
    }
}
