//! Random content generation
//!
//! - [`maze`]: perfect mazes with an exit and collectible items
//! - [`target`]: goal grids (and solution code) for free play and challenges
//!
//! Every generator takes its random source as `&mut impl Rng`; seeding a
//! `rand_chacha::ChaCha8Rng` makes generation reproducible.

pub mod maze;
pub mod target;
