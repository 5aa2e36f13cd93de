//! Lot design grids and their text format.
//!
//! A design file has one row of the lot per line, spots separated by commas:
//!
//! ```text
//! R, R, N, L
//! S, E, N, L
//! ```
//!
//! Blank lines are skipped. Labels are `S`, `R`, `L`, `E` and `N`.

use crate::error::LotError;
use crate::vehicle::CarType;
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = ',';

/// An immutable rectangular grid of spot designs, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDesign {
    rows: usize,
    cols: usize,
    cells: Vec<CarType>,
}

impl LotDesign {
    /// Builds a design from explicit rows.
    ///
    /// All rows must share one non-zero width and there must be at least one row.
    pub fn from_rows(rows: Vec<Vec<CarType>>) -> Result<Self, LotError> {
        let num_rows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if num_rows == 0 || cols == 0 {
            return Err(LotError::InvalidDimensions {
                rows: num_rows,
                cols,
            });
        }
        let mut cells = Vec::with_capacity(num_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LotError::RaggedRow {
                    line: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: num_rows,
            cols,
            cells,
        })
    }

    /// A design where every cell has the same type.
    pub fn uniform(rows: usize, cols: usize, car_type: CarType) -> Result<Self, LotError> {
        if rows == 0 || cols == 0 {
            return Err(LotError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![car_type; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<CarType> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[CarType] {
        &self.cells
    }

    pub(crate) fn into_cells(self) -> Vec<CarType> {
        self.cells
    }
}

impl FromStr for LotDesign {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<CarType>> = Vec::new();
        let mut width: Option<usize> = None;

        for (idx, raw) in s.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            let row = text
                .split(SEPARATOR)
                .map(|label| {
                    CarType::from_label(label).ok_or_else(|| LotError::UnknownLabel {
                        line,
                        label: label.trim().to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(LotError::RaggedRow {
                        line,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }
}

impl fmt::Display for LotDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let labels: Vec<String> = row.iter().map(|t| t.label().to_string()).collect();
            writeln!(f, "{}", labels.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CarType::*;

    #[test]
    fn test_parse_simple_design() {
        let design: LotDesign = "R, N\nS, L\n".parse().unwrap();
        assert_eq!(design.rows(), 2);
        assert_eq!(design.cols(), 2);
        assert_eq!(design.cells(), &[Regular, Na, Small, Large]);
        assert_eq!(design.get(1, 1), Some(Large));
        assert_eq!(design.get(2, 0), None);
        assert_eq!(design.get(0, 2), None);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_spacing() {
        let design: LotDesign = "\n  r,e ,  l \n\n\ts,S,N\n\n".parse().unwrap();
        assert_eq!(design.rows(), 2);
        assert_eq!(design.cells(), &[Regular, Electric, Large, Small, Small, Na]);
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "R, R\nR, X\n".parse::<LotDesign>().unwrap_err();
        assert_eq!(
            err,
            LotError::UnknownLabel {
                line: 2,
                label: "X".to_string()
            }
        );
    }

    #[test]
    fn test_parse_trailing_separator_is_an_error() {
        let err = "R, R,\n".parse::<LotDesign>().unwrap_err();
        assert!(matches!(err, LotError::UnknownLabel { line: 1, .. }));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let err = "R, R, R\n\nR, R\n".parse::<LotDesign>().unwrap_err();
        assert_eq!(
            err,
            LotError::RaggedRow {
                line: 3,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(
            "\n\n".parse::<LotDesign>(),
            Err(LotError::InvalidDimensions { rows: 0, cols: 0 })
        );
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(LotDesign::from_rows(vec![]).is_err());
        assert!(LotDesign::from_rows(vec![vec![]]).is_err());
        assert!(matches!(
            LotDesign::from_rows(vec![vec![Small], vec![Small, Large]]),
            Err(LotError::RaggedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_uniform() {
        let design = LotDesign::uniform(2, 3, Electric).unwrap();
        assert_eq!(design.cells().len(), 6);
        assert!(LotDesign::uniform(0, 3, Electric).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let text = "R, N, E\nS, L, L\n";
        let design: LotDesign = text.parse().unwrap();
        assert_eq!(design.to_string(), text);
        assert_eq!(design.to_string().parse::<LotDesign>().unwrap(), design);
    }
}
