//! Magic-bitboard sliding attacks.
//!
//! For every square the relevant blocker mask is multiplied by a magic
//! number; the top bits of the product index a dense attack table. Magics are
//! searched once at first use from a fixed seed, so the tables are identical
//! across runs.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tables::{ray_attacks, BISHOP_DIRECTIONS, RAYS, ROOK_DIRECTIONS, is_positive_direction};

const MAGIC_SEED: u64 = 0x2545_F491_4F6C_DD1D;

#[derive(Clone, Copy, Debug, Default)]
struct Magic {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline(always)]
    fn index(&self, occupied: u64) -> usize {
        self.offset + ((occupied & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

struct MagicTables {
    rook: [Magic; 64],
    bishop: [Magic; 64],
    rook_attacks: Vec<u64>,
    bishop_attacks: Vec<u64>,
}

static MAGICS: Lazy<MagicTables> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let mut rook = [Magic::default(); 64];
    let mut bishop = [Magic::default(); 64];
    let mut rook_attacks = Vec::with_capacity(102_400);
    let mut bishop_attacks = Vec::with_capacity(5_248);

    for sq in 0..64 {
        rook[sq] = find_magic(sq, &ROOK_DIRECTIONS, &mut rng, &mut rook_attacks);
        bishop[sq] = find_magic(sq, &BISHOP_DIRECTIONS, &mut rng, &mut bishop_attacks);
    }

    log::debug!(
        "magic tables ready: {} rook entries, {} bishop entries",
        rook_attacks.len(),
        bishop_attacks.len()
    );

    MagicTables {
        rook,
        bishop,
        rook_attacks,
        bishop_attacks,
    }
});

/// Force table construction now instead of on the first attack query.
pub fn init() {
    Lazy::force(&MAGICS);
}

#[inline(always)]
pub fn rook_attacks(square: usize, occupied: u64) -> u64 {
    let tables = &*MAGICS;
    tables.rook_attacks[tables.rook[square].index(occupied)]
}

#[inline(always)]
pub fn bishop_attacks(square: usize, occupied: u64) -> u64 {
    let tables = &*MAGICS;
    tables.bishop_attacks[tables.bishop[square].index(occupied)]
}

#[inline(always)]
pub fn queen_attacks(square: usize, occupied: u64) -> u64 {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

/// Squares whose occupancy can change the attack set: each ray minus its
/// final (edge) square.
fn relevant_mask(square: usize, directions: &[usize]) -> u64 {
    let mut mask = 0u64;
    for &dir in directions {
        let ray = RAYS[dir][square];
        if ray == 0 {
            continue;
        }
        let edge = if is_positive_direction(dir) {
            63 - ray.leading_zeros()
        } else {
            ray.trailing_zeros()
        };
        mask |= ray & !(1u64 << edge);
    }
    mask
}

fn find_magic(square: usize, directions: &[usize], rng: &mut StdRng, table: &mut Vec<u64>) -> Magic {
    let mask = relevant_mask(square, directions);
    let bits = mask.count_ones();
    let size = 1usize << bits;

    // Enumerate every blocker subset of the mask (carry-rippler)
    let mut occupancies = Vec::with_capacity(size);
    let mut references = Vec::with_capacity(size);
    let mut subset = 0u64;
    loop {
        occupancies.push(subset);
        references.push(ray_attacks(square, subset, directions));
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }

    let offset = table.len();
    table.resize(offset + size, 0);
    let mut epoch = vec![0u32; size];
    let mut attempt = 0u32;
    let shift = 64 - bits;

    loop {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        attempt += 1;
        let mut collision = false;
        for (occ, &attacks) in occupancies.iter().zip(references.iter()) {
            let idx = (occ.wrapping_mul(magic) >> shift) as usize;
            if epoch[idx] < attempt {
                epoch[idx] = attempt;
                table[offset + idx] = attacks;
            } else if table[offset + idx] != attacks {
                collision = true;
                break;
            }
        }

        if !collision {
            return Magic {
                mask,
                magic,
                shift,
                offset,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_attacks_empty_board() {
        for sq in 0..64 {
            assert_eq!(rook_attacks(sq, 0).count_ones(), 14);
        }
    }

    #[test]
    fn test_bishop_attacks_corner() {
        // a1 on an empty board sees the whole long diagonal
        assert_eq!(bishop_attacks(0, 0), RAYS[super::super::tables::NORTH_EAST][0]);
    }

    #[test]
    fn test_magic_matches_ray_walk() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let occupied = rng.gen::<u64>() & rng.gen::<u64>();
            for sq in 0..64 {
                assert_eq!(
                    rook_attacks(sq, occupied),
                    ray_attacks(sq, occupied, &ROOK_DIRECTIONS),
                    "rook on {} with occupancy {:#x}",
                    sq,
                    occupied
                );
                assert_eq!(
                    bishop_attacks(sq, occupied),
                    ray_attacks(sq, occupied, &BISHOP_DIRECTIONS),
                    "bishop on {} with occupancy {:#x}",
                    sq,
                    occupied
                );
            }
        }
    }

    #[test]
    fn test_table_sizes() {
        init();
        assert_eq!(MAGICS.rook_attacks.len(), 102_400);
        assert_eq!(MAGICS.bishop_attacks.len(), 5_248);
    }
}
