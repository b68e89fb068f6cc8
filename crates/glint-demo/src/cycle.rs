use glint_engine::paint::Color;

/// Per-step increments of the red, green and blue channels.
const RATES: [f32; 3] = [0.005, 0.006, 0.007];

/// Three channels that sweep `[0, 1)` at different rates.
///
/// A channel that wraps past 1.0 toggles its direction flag; a flipped channel
/// is displayed as `1 - v`, so the on-screen value ramps up and back down.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCycle {
    values: [f32; 3],
    flipped: [bool; 3],
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self {
            values: [0.66, 0.33, 0.0],
            flipped: [false; 3],
        }
    }
}

impl ColorCycle {
    /// Advances every channel by one simulation step.
    pub fn advance(&mut self) {
        for ((value, flipped), rate) in self.values.iter_mut().zip(&mut self.flipped).zip(RATES) {
            *value += rate;
            if *value >= 1.0 {
                *value -= 1.0;
                *flipped = !*flipped;
            }
        }
    }

    /// Displayed color, always opaque.
    pub fn color(&self) -> Color {
        let [r, g, b] = std::array::from_fn(|i| {
            let v = self.values[i];
            if self.flipped[i] { 1.0 - v } else { v }
        });
        Color::rgb(r, g, b)
    }
}
