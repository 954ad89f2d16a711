//! User colors for calendar output.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rota_core::constants::{COLOR_CHANNEL_MAX, COLOR_CHANNEL_MIN};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#a0ff64`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hands out one color per user during a render.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

/// Random light colors from a PCG32 stream.
///
/// The same seed always yields the same sequence of colors.
#[derive(Debug, Clone)]
pub struct SeededPalette {
    rng: Pcg32,
}

impl SeededPalette {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// A palette seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_entropy(),
        }
    }

    fn channel(&mut self) -> u8 {
        self.rng.gen_range(COLOR_CHANNEL_MIN..=COLOR_CHANNEL_MAX)
    }
}

impl ColorSource for SeededPalette {
    fn next_color(&mut self) -> Color {
        let r = self.channel();
        let g = self.channel();
        let b = self.channel();
        Color::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_format() {
        assert_eq!(Color::new(100, 255, 10).to_hex(), "#64ff0a");
        assert_eq!(Color::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_same_seed_same_colors() {
        let mut a = SeededPalette::new(42);
        let mut b = SeededPalette::new(42);

        for _ in 0..16 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_channels_stay_light() {
        let mut palette = SeededPalette::new(7);

        for _ in 0..256 {
            let color = palette.next_color();
            for channel in [color.r, color.g, color.b] {
                assert!(channel >= COLOR_CHANNEL_MIN);
            }
        }
    }
}
