#![no_std]

/// The four line directions as (row step, column step).
///
/// Horizontal, vertical, down-right diagonal, down-left diagonal.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A run of winning cells: the first cell and the step to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: (usize, usize),
    pub step: (i32, i32),
    pub len: usize,
}

impl Line {
    /// Returns the `k`-th cell of the line as (row, col).
    pub fn cell(&self, k: usize) -> (usize, usize) {
        let r = self.start.0 as i32 + self.step.0 * k as i32;
        let c = self.start.1 as i32 + self.step.1 * k as i32;
        (r as usize, c as usize)
    }

    /// True if (row, col) lies on this line.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (0..self.len).any(|k| self.cell(k) == (row, col))
    }
}

/// Checks for a win anywhere on a grid-based board.
///
/// # Arguments
/// * `cells` - The board data as a flat row-major slice
/// * `width` - Board width
/// * `height` - Board height
/// * `target` - The cell value to look for
/// * `line_size` - Number of consecutive cells needed to win
pub fn check_line_win<T: Copy + PartialEq>(
    cells: &[T],
    width: usize,
    height: usize,
    target: T,
    line_size: usize,
) -> bool {
    winning_line(cells, width, height, target, line_size).is_some()
}

/// Finds the first winning window on the board, scanning horizontal windows,
/// then vertical, then both diagonals.
pub fn winning_line<T: Copy + PartialEq>(
    cells: &[T],
    width: usize,
    height: usize,
    target: T,
    line_size: usize,
) -> Option<Line> {
    if line_size == 0 || cells.len() < width * height {
        return None;
    }
    let w = width as i32;
    let h = height as i32;
    let n = line_size as i32;

    for (dr, dc) in DIRECTIONS {
        // Start cells whose window stays on the board.
        let (r_lo, r_hi) = if dr == 0 { (0, h - 1) } else { (0, h - n) };
        let (c_lo, c_hi) = match dc {
            0 => (0, w - 1),
            1 => (0, w - n),
            _ => (n - 1, w - 1),
        };
        for r in r_lo..=r_hi {
            for c in c_lo..=c_hi {
                let full = (0..n).all(|k| {
                    let idx = ((r + dr * k) * w + (c + dc * k)) as usize;
                    cells[idx] == target
                });
                if full {
                    return Some(Line {
                        start: (r as usize, c as usize),
                        step: (dr, dc),
                        len: line_size,
                    });
                }
            }
        }
    }
    None
}

/// Checks for a win on any line passing through (row, col).
///
/// Only the runs containing the given cell are inspected, so the cost is
/// proportional to `line_size` rather than to the board size.
pub fn check_line_through<T: Copy + PartialEq>(
    cells: &[T],
    width: usize,
    height: usize,
    row: usize,
    col: usize,
    target: T,
    line_size: usize,
) -> bool {
    if line_size == 0 || row >= height || col >= width || cells.len() < width * height {
        return false;
    }
    if cells[row * width + col] != target {
        return false;
    }
    let w = width as i32;
    let h = height as i32;
    let at = |r: i32, c: i32| r >= 0 && c >= 0 && r < h && c < w && cells[(r * w + c) as usize] == target;

    for (dr, dc) in DIRECTIONS {
        let mut count = 1;
        let (r0, c0) = (row as i32, col as i32);
        let mut k = 1;
        while at(r0 + dr * k, c0 + dc * k) {
            count += 1;
            k += 1;
        }
        k = 1;
        while at(r0 - dr * k, c0 - dc * k) {
            count += 1;
            k += 1;
        }
        if count >= line_size {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 7;
    const H: usize = 6;

    fn board_with(cells: &[(usize, usize)]) -> [u8; W * H] {
        let mut b = [0u8; W * H];
        for &(r, c) in cells {
            b[r * W + c] = 1;
        }
        b
    }

    #[test]
    fn test_empty_board_has_no_line() {
        let b = [0u8; W * H];
        assert!(!check_line_win(&b, W, H, 1, 4));
    }

    #[test]
    fn test_horizontal_line() {
        let b = board_with(&[(5, 2), (5, 3), (5, 4), (5, 5)]);
        let line = winning_line(&b, W, H, 1, 4).unwrap();
        assert_eq!(line.start, (5, 2));
        assert_eq!(line.step, (0, 1));
        assert!(line.contains(5, 5));
        assert!(check_line_through(&b, W, H, 5, 4, 1, 4));
    }

    #[test]
    fn test_vertical_line() {
        let b = board_with(&[(2, 0), (3, 0), (4, 0), (5, 0)]);
        assert!(check_line_win(&b, W, H, 1, 4));
        assert!(check_line_through(&b, W, H, 2, 0, 1, 4));
    }

    #[test]
    fn test_both_diagonals() {
        let down_right = board_with(&[(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(check_line_win(&down_right, W, H, 1, 4));
        assert!(check_line_through(&down_right, W, H, 1, 1, 1, 4));

        let down_left = board_with(&[(2, 6), (3, 5), (4, 4), (5, 3)]);
        let line = winning_line(&down_left, W, H, 1, 4).unwrap();
        assert_eq!(line.step, (1, -1));
        assert!(check_line_through(&down_left, W, H, 5, 3, 1, 4));
    }

    #[test]
    fn test_broken_run_is_not_a_line() {
        let b = board_with(&[(5, 0), (5, 1), (5, 2), (5, 4)]);
        assert!(!check_line_win(&b, W, H, 1, 4));
        assert!(!check_line_through(&b, W, H, 5, 2, 1, 4));
    }

    #[test]
    fn test_through_ignores_cells_not_owned() {
        let b = board_with(&[(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert!(!check_line_through(&b, W, H, 4, 0, 1, 4));
    }

    #[test]
    fn test_line_longer_than_board() {
        let b = [1u8; 9];
        assert!(!check_line_win(&b, 3, 3, 1, 4));
        assert!(check_line_win(&b, 3, 3, 1, 3));
    }
}
