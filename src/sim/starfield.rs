//! Drifting background points
//!
//! Cosmetic only: nothing in the gameplay reads the starfield.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT};

/// A background point. Its fall speed doubles as its drawn radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(1..=3u32) as f32
}

impl Starfield {
    /// Scatter `STAR_COUNT` points over the whole screen
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0..=SCREEN_WIDTH as u32) as f32,
                    rng.random_range(0..=SCREEN_HEIGHT as u32) as f32,
                ),
                speed: random_speed(rng),
            })
            .collect();
        Self { stars }
    }

    /// Advance every point; those past the bottom edge restart at the top
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for star in self.stars.iter_mut() {
            star.pos.y += star.speed;
            if star.pos.y > SCREEN_HEIGHT {
                star.pos = Vec2::new(rng.random_range(0..=SCREEN_WIDTH as u32) as f32, 0.0);
                star.speed = random_speed(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_field_has_fixed_size() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Starfield::new(&mut rng);
        assert_eq!(field.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_star_past_bottom_respawns_at_top() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = Starfield {
            stars: vec![Star {
                pos: Vec2::new(100.0, SCREEN_HEIGHT - 1.0),
                speed: 3.0,
            }],
        };
        field.update(&mut rng);
        let star = field.stars[0];
        assert_eq!(star.pos.y, 0.0);
        assert!((1.0..=3.0).contains(&star.speed));
    }

    #[test]
    fn test_star_on_bottom_edge_stays() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Starfield {
            stars: vec![Star {
                pos: Vec2::new(100.0, SCREEN_HEIGHT - 2.0),
                speed: 2.0,
            }],
        };
        field.update(&mut rng);
        assert_eq!(field.stars[0].pos, Vec2::new(100.0, SCREEN_HEIGHT));
    }

    proptest! {
        #[test]
        fn prop_stars_stay_on_screen(seed in any::<u64>(), frames in 1usize..600) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = Starfield::new(&mut rng);
            for _ in 0..frames {
                field.update(&mut rng);
            }
            prop_assert_eq!(field.stars.len(), STAR_COUNT);
            for star in &field.stars {
                prop_assert!(star.pos.x >= 0.0 && star.pos.x <= SCREEN_WIDTH);
                prop_assert!(star.pos.y >= 0.0 && star.pos.y <= SCREEN_HEIGHT);
                prop_assert!(star.speed >= 1.0 && star.speed <= 3.0);
            }
        }
    }
}
