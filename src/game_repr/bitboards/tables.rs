//! Per-square attack and movement masks, computed at compile time.

/// KNIGHT_ATTACKS[square]: squares a knight on `square` attacks
pub static KNIGHT_ATTACKS: [u64; 64] = leaper_table(&[
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
]);

/// KING_ATTACKS[square]: squares a king on `square` attacks
pub static KING_ATTACKS: [u64; 64] = leaper_table(&[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
]);

/// PAWN_ATTACKS[color][square]: diagonal capture squares of a pawn.
/// Index 0 = White, 1 = Black.
pub static PAWN_ATTACKS: [[u64; 64]; 2] = [
    leaper_table(&[(1, -1), (1, 1)]),
    leaper_table(&[(-1, -1), (-1, 1)]),
];

/// PAWN_PUSHES[color][square]: the single forward step of a pawn.
pub static PAWN_PUSHES: [[u64; 64]; 2] = [leaper_table(&[(1, 0)]), leaper_table(&[(-1, 0)])];

/// PAWN_DOUBLE_PUSHES[color][square]: the two-step target, only set on the
/// pawn's starting rank.
pub static PAWN_DOUBLE_PUSHES: [[u64; 64]; 2] = generate_double_pushes();

/// Build a table for a piece that jumps by fixed (rank, file) offsets.
const fn leaper_table(offsets: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut i = 0;
        while i < offsets.len() {
            let (dr, df) = offsets[i];
            let r = rank + dr;
            let f = file + df;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                table[sq] |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        sq += 1;
    }

    table
}

const fn generate_double_pushes() -> [[u64; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut file = 0;
    while file < 8 {
        // White from rank 2 to rank 4, Black from rank 7 to rank 5
        table[0][8 + file] = 1u64 << (24 + file);
        table[1][48 + file] = 1u64 << (32 + file);
        file += 1;
    }
    table
}

// Direction indices into RAYS
pub const NORTH: usize = 0;
pub const NORTH_EAST: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH_EAST: usize = 3;
pub const SOUTH: usize = 4;
pub const SOUTH_WEST: usize = 5;
pub const WEST: usize = 6;
pub const NORTH_WEST: usize = 7;

pub const ROOK_DIRECTIONS: [usize; 4] = [NORTH, EAST, SOUTH, WEST];
pub const BISHOP_DIRECTIONS: [usize; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];

/// Step (rank, file) for each direction index.
const DIRECTION_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// RAYS[direction][square]: every square from `square` to the board edge,
/// excluding `square` itself.
pub static RAYS: [[u64; 64]; 8] = generate_rays();

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut rays = [[0u64; 64]; 8];
    let mut dir = 0;

    while dir < 8 {
        let (dr, df) = DIRECTION_STEPS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut r = (sq / 8) as i8 + dr;
            let mut f = (sq % 8) as i8 + df;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                rays[dir][sq] |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            sq += 1;
        }
        dir += 1;
    }

    rays
}

/// Directions whose rays run towards higher square indices; the nearest
/// blocker on those rays is the least significant bit.
#[inline(always)]
pub const fn is_positive_direction(direction: usize) -> bool {
    matches!(direction, NORTH | NORTH_EAST | EAST | NORTH_WEST)
}

/// Slow sliding attacks by walking rays; used to build and verify the magic
/// tables, never on the hot path.
pub fn ray_attacks(square: usize, occupied: u64, directions: &[usize]) -> u64 {
    let mut attacks = 0u64;
    for &dir in directions {
        let ray = RAYS[dir][square];
        attacks |= ray;
        let blockers = ray & occupied;
        if blockers != 0 {
            let first = if is_positive_direction(dir) {
                blockers.trailing_zeros() as usize
            } else {
                63 - blockers.leading_zeros() as usize
            };
            attacks &= !RAYS[dir][first];
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_attacks() {
        // d4: b3, b5, c2, c6, e2, e6, f3, f5
        let expected = (1u64 << 17) | (1u64 << 33) | (1u64 << 10) | (1u64 << 42) |
                       (1u64 << 12) | (1u64 << 44) | (1u64 << 21) | (1u64 << 37);
        assert_eq!(KNIGHT_ATTACKS[27], expected);
        // a1 corner: b3, c2
        assert_eq!(KNIGHT_ATTACKS[0], (1u64 << 17) | (1u64 << 10));
    }

    #[test]
    fn test_king_attacks() {
        // e4: d3, d4, d5, e3, e5, f3, f4, f5
        let expected = (1u64 << 19) | (1u64 << 27) | (1u64 << 35) | (1u64 << 20) |
                       (1u64 << 36) | (1u64 << 21) | (1u64 << 29) | (1u64 << 37);
        assert_eq!(KING_ATTACKS[28], expected);
        assert_eq!(KING_ATTACKS[63].count_ones(), 3);
    }

    #[test]
    fn test_pawn_tables() {
        // White pawn e4 attacks d5, f5; Black pawn e5 attacks d4, f4
        assert_eq!(PAWN_ATTACKS[0][28], (1u64 << 35) | (1u64 << 37));
        assert_eq!(PAWN_ATTACKS[1][36], (1u64 << 27) | (1u64 << 29));
        // a-file pawns have a single capture square
        assert_eq!(PAWN_ATTACKS[0][8], 1u64 << 17);

        assert_eq!(PAWN_PUSHES[0][12], 1u64 << 20);
        assert_eq!(PAWN_PUSHES[1][52], 1u64 << 44);
        assert_eq!(PAWN_DOUBLE_PUSHES[0][12], 1u64 << 28);
        assert_eq!(PAWN_DOUBLE_PUSHES[1][52], 1u64 << 36);
        assert_eq!(PAWN_DOUBLE_PUSHES[0][20], 0);
    }

    #[test]
    fn test_rays() {
        let north_a1 = (1u64 << 8) | (1u64 << 16) | (1u64 << 24) | (1u64 << 32) |
                       (1u64 << 40) | (1u64 << 48) | (1u64 << 56);
        assert_eq!(RAYS[NORTH][0], north_a1);

        let diag_a1 = (1u64 << 9) | (1u64 << 18) | (1u64 << 27) | (1u64 << 36) |
                      (1u64 << 45) | (1u64 << 54) | (1u64 << 63);
        assert_eq!(RAYS[NORTH_EAST][0], diag_a1);
        assert_eq!(RAYS[WEST][0], 0);
    }

    #[test]
    fn test_ray_attacks_stop_at_blockers() {
        // Rook on d4 with blockers on d6 and f4
        let occupied = (1u64 << 43) | (1u64 << 29);
        let attacks = ray_attacks(27, occupied, &ROOK_DIRECTIONS);
        assert!(attacks & (1u64 << 43) != 0);
        assert!(attacks & (1u64 << 51) == 0);
        assert!(attacks & (1u64 << 29) != 0);
        assert!(attacks & (1u64 << 30) == 0);
        assert_eq!(attacks.count_ones(), 2 + 3 + 2 + 3);
    }
}
