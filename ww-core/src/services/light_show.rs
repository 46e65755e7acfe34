use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb888;
use ww_common::*;

// Linear congruential generator (glibc constants)
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seed from the monotonic clock.
    pub fn new() -> Self {
        let micros = Instant::now().as_micros();
        let seed = ((micros / 1_000) as u32).wrapping_mul(1103515245) ^ (micros % 1_000_000) as u32;
        Self::with_seed(seed.wrapping_add(12345))
    }

    pub fn with_seed(seed: u32) -> Self {
        debug!("LCG initialized with seed: {}", seed);
        Lcg { state: seed }
    }

    pub fn next(&mut self) -> u32 {
        const A: u32 = 1103515245;
        const C: u32 = 12345;
        self.state = A.wrapping_mul(self.state).wrapping_add(C);
        self.state
    }

    pub fn next_byte(&mut self) -> u8 {
        // low bits of an LCG cycle with a short period
        (self.next() >> 16) as u8
    }

    pub fn next_color(&mut self) -> Rgb888 {
        Rgb888::new(self.next_byte(), self.next_byte(), self.next_byte())
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint every cell of the frame a random color.
pub fn paint_random(frame: &mut Frame, rng: &mut Lcg) {
    for y in 0..MATRIX_SIZE {
        for x in 0..MATRIX_SIZE {
            frame.set(x, y, rng.next_color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_deterministic() {
        let mut a = Lcg::with_seed(7);
        let mut b = Lcg::with_seed(7);
        for _ in 0..16 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_paint_changes_frame() {
        let mut frame = Frame::new();
        let mut rng = Lcg::with_seed(42);
        paint_random(&mut frame, &mut rng);
        let first = frame.clone();
        paint_random(&mut frame, &mut rng);
        assert_ne!(first, frame);
        assert!(frame.count(BLACK) < 64);
    }
}
