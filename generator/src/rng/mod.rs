//! Deterministic random number generation
//!
//! Every draw the generator makes flows through this module, and the order
//! of those draws is part of the output contract: same seed, same log.
//! Nothing in the crate may reach for ambient randomness.

mod xorshift;

pub use xorshift::SeededRng;
