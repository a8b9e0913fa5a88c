use super::*;

#[test]
fn test_perft_starting_position_depth_1() {
    assert_eq!(Board::new().perft(1), 20);
}

#[test]
fn test_perft_starting_position_depth_2() {
    assert_eq!(Board::new().perft(2), 400);
}

#[test]
fn test_perft_starting_position_depth_3() {
    assert_eq!(Board::new().perft(3), 8902);
}

#[test]
fn test_perft_starting_position_depth_4() {
    assert_eq!(Board::new().perft(4), 197281);
}

#[test]
#[ignore = "slow; run with --ignored"]
fn test_perft_starting_position_depth_5() {
    assert_eq!(Board::new().perft(5), 4865609);
}
