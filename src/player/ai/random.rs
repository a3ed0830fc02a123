use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 評価値に加える乱数。
///
/// 正の値なら `[0, magnitude)`、負の値なら `[magnitude, 0)` から一様に引く。0 なら揺らぎなし。
pub fn draw_jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: i32) -> i32 {
    match magnitude {
        0 => 0,
        m if m > 0 => rng.gen_range(0..m),
        m => rng.gen_range(m..0),
    }
}

/// 再現可能な乱数源
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
