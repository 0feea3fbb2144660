use blake3::Hasher;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Tag for the stream that drives a whole game session.
pub const RNG_TAG_SESSION: u32 = 0;

const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Seedable random source used by every randomized operation in the core.
///
/// Any `RngCore` can be injected instead; this one exists so that a world seed
/// always reproduces the same game.
#[derive(Clone, Debug)]
pub struct DetRng {
    rng: Xoshiro256PlusPlus,
    draws: u32,
}

impl DetRng {
    pub fn from_seed(world_seed: u64, tag: u32) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(b"merchant_rng_v1");
        hasher.update(&world_seed.to_le_bytes());
        hasher.update(&tag.to_le_bytes());
        let hash = hasher.finalize();
        let mut seed = [0u8; 32];
        seed.copy_from_slice(hash.as_bytes());
        Self {
            rng: Xoshiro256PlusPlus::from_seed(seed),
            draws: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn cursor(&self) -> u32 {
        self.draws
    }
}

impl RngCore for DetRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dst)
    }
}

/// Uniform draw in `[0, 1)`.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * UNIT_SCALE
}

/// Uniform draw in `[low, high)`.
pub fn uniform_f64<R: RngCore + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + unit_f64(rng) * (high - low)
}

/// Uniform integer in `[low, high)`. Returns `low` for an empty range.
pub fn range_u32<R: RngCore + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high <= low {
        return low;
    }
    let span = high - low;
    let offset = (unit_f64(rng) * f64::from(span)) as u32;
    low + offset.min(span - 1)
}

/// `true` with probability `p`.
pub fn chance<R: RngCore + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit_f64(rng) < p
}

/// Picks one element uniformly.
pub fn choose<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
    items.get(range_u32(rng, 0, len) as usize)
}

/// Cumulative-weight draw: a threshold in `[0, total)` is reduced by each
/// weight in slice order and the first item that takes it to `<= 0` wins.
/// Items with a non-positive weight are never picked.
pub fn sample_by_weight<'a, T, R, F>(rng: &mut R, items: &'a [T], weight: F) -> Option<&'a T>
where
    R: RngCore + ?Sized,
    F: Fn(&T) -> f64,
{
    let total: f64 = items.iter().map(&weight).sum();
    if total <= 0.0 {
        return None;
    }
    let mut threshold = unit_f64(rng) * total;
    let mut last_positive = None;
    for item in items {
        let w = weight(item);
        if w <= 0.0 {
            continue;
        }
        threshold -= w;
        if threshold <= 0.0 {
            return Some(item);
        }
        last_positive = Some(item);
    }
    // Float residue can leave a sliver above zero after the last weight.
    last_positive
}
