//! Animated backgrounds drawn behind the countdown.
//!
//! Each theme has its own effect. [`Backdrop`] owns one of each and keeps
//! exactly the one matching the current theme running.

mod field;
mod leaves;
mod snow;

pub use self::field::{Particle, ParticleField};
pub use self::leaves::LeavesEffect;
pub use self::snow::SnowEffect;

use tracing::debug;

use crate::types::Theme;

/// A background animation.
///
/// A stopped effect draws nothing and ignores `step`.
pub trait BackgroundEffect {
    fn name(&self) -> &'static str;

    fn start(&mut self);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Adapts the effect to a new drawing area, in terminal cells.
    fn resize(&mut self, width: u16, height: u16);

    /// Advances the animation by one frame.
    fn step(&mut self);

    /// Draws the current frame as one string per row.
    fn render(&self) -> Vec<String>;
}

/// The themed background, switching between snow and leaves.
#[derive(Debug)]
pub struct Backdrop {
    theme: Theme,
    snow: SnowEffect,
    leaves: LeavesEffect,
}

impl Backdrop {
    /// Creates the backdrop and starts the effect for `theme`.
    pub fn new(theme: Theme, width: u16, height: u16) -> Self {
        Self::from_effects(
            theme,
            SnowEffect::new(width, height),
            LeavesEffect::new(width, height),
        )
    }

    pub fn from_effects(theme: Theme, snow: SnowEffect, leaves: LeavesEffect) -> Self {
        let mut backdrop = Self {
            theme,
            snow,
            leaves,
        };
        backdrop.active_mut().start();
        backdrop
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Stops the running effect and starts the other one.
    pub fn switch(&mut self) -> Theme {
        self.active_mut().stop();
        self.theme = self.theme.toggled();
        self.active_mut().start();
        debug!(theme = self.theme.as_str(), "Switched background");
        self.theme
    }

    /// Resizes both effects so a later switch starts at the right size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.snow.resize(width, height);
        self.leaves.resize(width, height);
    }

    pub fn step(&mut self) {
        self.active_mut().step();
    }

    pub fn render(&self) -> Vec<String> {
        self.active().render()
    }

    pub fn active(&self) -> &dyn BackgroundEffect {
        match self.theme {
            Theme::Snow => &self.snow,
            Theme::Leaves => &self.leaves,
        }
    }

    fn active_mut(&mut self) -> &mut dyn BackgroundEffect {
        match self.theme {
            Theme::Snow => &mut self.snow,
            Theme::Leaves => &mut self.leaves,
        }
    }

    /// Effects that are currently running. Always exactly one.
    pub fn running(&self) -> Vec<&'static str> {
        let effects: [&dyn BackgroundEffect; 2] = [&self.snow, &self.leaves];
        effects
            .into_iter()
            .filter(|e| e.is_running())
            .map(|e| e.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backdrop(theme: Theme) -> Backdrop {
        Backdrop::from_effects(
            theme,
            SnowEffect::with_seed(60, 20, 1),
            LeavesEffect::with_seed(60, 20, 2),
        )
    }

    #[test]
    fn test_starts_theme_effect() {
        let snow = backdrop(Theme::Snow);
        assert_eq!(snow.running(), vec!["snow"]);

        let leaves = backdrop(Theme::Leaves);
        assert_eq!(leaves.running(), vec!["leaves"]);
    }

    #[test]
    fn test_switch_keeps_single_effect() {
        let mut backdrop = backdrop(Theme::Snow);

        assert_eq!(backdrop.switch(), Theme::Leaves);
        assert_eq!(backdrop.running(), vec!["leaves"]);

        assert_eq!(backdrop.switch(), Theme::Snow);
        assert_eq!(backdrop.running(), vec!["snow"]);
    }

    #[test]
    fn test_render_uses_active_size() {
        let mut backdrop = backdrop(Theme::Leaves);
        backdrop.resize(40, 8);
        backdrop.step();

        let lines = backdrop.render();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn test_switched_effect_uses_latest_size() {
        let mut backdrop = backdrop(Theme::Snow);
        backdrop.resize(30, 6);

        backdrop.switch();

        assert_eq!(backdrop.render().len(), 6);
    }
}
