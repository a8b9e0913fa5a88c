//! Square indexing: 0 = a1, 7 = h1, 56 = a8, 63 = h8.

pub const A1: usize = 0;
pub const B1: usize = 1;
pub const C1: usize = 2;
pub const D1: usize = 3;
pub const E1: usize = 4;
pub const F1: usize = 5;
pub const G1: usize = 6;
pub const H1: usize = 7;
pub const H6: usize = 47;
pub const A8: usize = 56;
pub const B8: usize = 57;
pub const C8: usize = 58;
pub const D8: usize = 59;
pub const E8: usize = 60;
pub const F8: usize = 61;
pub const G8: usize = 62;
pub const H8: usize = 63;

#[inline(always)]
pub fn file_of(square: usize) -> usize {
    square % 8
}

#[inline(always)]
pub fn rank_of(square: usize) -> usize {
    square / 8
}

#[inline(always)]
pub fn make_square(file: usize, rank: usize) -> usize {
    rank * 8 + file
}

pub fn file_char(square: usize) -> char {
    (b'a' + file_of(square) as u8) as char
}

pub fn rank_char(square: usize) -> char {
    (b'1' + rank_of(square) as u8) as char
}

/// "e4" for 28.
pub fn square_name(square: usize) -> String {
    let mut s = String::with_capacity(2);
    s.push(file_char(square));
    s.push(rank_char(square));
    s
}

/// Inverse of [`square_name`]. Rejects anything that is not exactly a file
/// letter followed by a rank digit.
pub fn parse_square(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file < 8 && rank < 8 {
        Some(make_square(file as usize, rank as usize))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(28), "e4");
        assert_eq!(square_name(63), "h8");
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("a1"), Some(A1));
        assert_eq!(parse_square("e8"), Some(E8));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
        assert_eq!(parse_square("a10"), None);
    }
}
