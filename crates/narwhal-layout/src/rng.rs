//! Seeded pseudo-random numbers.
//!
//! Layout results are cached by their inputs, so every random draw must be reproducible from
//! the seed alone. xorshift64* is small, fast and has no platform-dependent state.

#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        // A zero state would stay zero forever.
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Normally distributed sample (Box-Muller, cosine branch; one sample per two uniforms).
    pub fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - u keeps the logarithm argument in (0, 1].
        let u1 = 1.0 - self.next_f64_unit();
        let u2 = self.next_f64_unit();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}
