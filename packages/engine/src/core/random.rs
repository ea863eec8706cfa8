/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Small seedable RNG used for phrase picks, chatter rolls and activity choice
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero
        Self { state: if seed == 0 { 12345 } else { seed } }
    }

    /// Seed from the host (Math.random on wasm, clock nanos natively)
    pub fn from_entropy() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new((js_sys::Math::random() * u32::MAX as f64) as u32)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(12345);
            Self::new(nanos)
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.index(items.len())?;
        items.get(idx)
    }

    /// Weighted categorical choice. Non-positive weights never win.
    pub fn weighted<T: Copy>(&mut self, items: &[(T, f32)]) -> Option<T> {
        let total: f32 = items.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.next_f32() * total;
        for (item, weight) in items {
            let w = weight.max(0.0);
            if w <= 0.0 {
                continue;
            }
            if roll < w {
                return Some(*item);
            }
            roll -= w;
        }
        // Float rounding can leave a sliver past the last bucket
        items.iter().rev().find(|(_, w)| *w > 0.0).map(|(item, _)| *item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn next_f32_stays_in_unit_range() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn weighted_respects_zero_weights_and_proportions() {
        let mut rng = Rng::new(99);
        let items = [('a', 0.0), ('b', 3.0), ('c', 1.0)];
        let mut counts = [0u32; 3];
        for _ in 0..8_000 {
            match rng.weighted(&items) {
                Some('a') => counts[0] += 1,
                Some('b') => counts[1] += 1,
                Some('c') => counts[2] += 1,
                _ => unreachable!(),
            }
        }
        assert_eq!(counts[0], 0);
        // roughly 3:1
        assert!(counts[1] > counts[2] * 2);
        assert!(counts[1] < counts[2] * 4);
    }

    #[test]
    fn weighted_empty_or_all_zero_is_none() {
        let mut rng = Rng::new(5);
        assert_eq!(rng.weighted::<u8>(&[]), None);
        assert_eq!(rng.weighted(&[(1u8, 0.0)]), None);
        assert_eq!(rng.pick::<u8>(&[]), None);
    }
}
