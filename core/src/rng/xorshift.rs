//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce exact auction runs)
//! - Testing (assert exact match outcomes)
//! - Research (validate results)
//!
//! The auction engine owns exactly one `RngManager`; bid-friction draws,
//! buy-offer shuffling, and seller selection all consume the same stream,
//! so a seed fully determines an auction run.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use polder_auction_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let friction = rng.uniform(1.0, 2.0); // bid-scale draw in [1.0, 2.0)
/// let pick = rng.index(10);             // index in [0, 10)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) using the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate random f64 in range [lo, hi)
    ///
    /// Used for the market-friction draw `U(1, scale)` in bid construction.
    ///
    /// # Panics
    /// Panics if lo >= hi
    ///
    /// # Example
    /// ```
    /// use polder_auction_core::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let f = rng.uniform(1.0, 2.0);
    /// assert!(f >= 1.0 && f < 2.0);
    /// ```
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        assert!(lo < hi, "lo must be less than hi");
        lo + (hi - lo) * self.next_f64()
    }

    /// Generate random index in range [0, n)
    ///
    /// # Panics
    /// Panics if n == 0
    pub fn index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be positive");
        (self.next() % n as u64) as usize
    }

    /// Shuffle a slice in place (Fisher-Yates)
    ///
    /// Used to visit buy offers in a uniformly random order during matching.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "lo must be less than hi")]
    fn test_uniform_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.uniform(2.0, 1.0);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                val >= 0.0 && val < 1.0,
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_uniform_respects_bounds() {
        let mut rng = RngManager::new(54321);

        for _ in 0..1000 {
            let val = rng.uniform(1.0, 2.0);
            assert!(val >= 1.0 && val < 2.0, "uniform() out of range: {}", val);
        }
    }

    #[test]
    fn test_index_covers_range() {
        let mut rng = RngManager::new(99);
        let mut seen = [false; 5];

        for _ in 0..1000 {
            seen[rng.index(5)] = true;
        }
        assert!(seen.iter().all(|&s| s), "index(5) never hit some values");
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = RngManager::new(7);
        let mut items: Vec<usize> = (0..20).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<usize> = (0..10).collect();
        let mut b: Vec<usize> = (0..10).collect();

        RngManager::new(42).shuffle(&mut a);
        RngManager::new(42).shuffle(&mut b);
        assert_eq!(a, b, "shuffle not deterministic for equal seeds");
    }
}
