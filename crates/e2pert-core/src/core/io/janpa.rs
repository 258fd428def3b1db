use crate::core::io::traits::MatrixFile;
use crate::core::models::matrices::OrbitalLabels;
use nalgebra::DMatrix;
use std::io::{self, BufRead};
use thiserror::Error;

/// Number of free-text lines JANPA writes before the matrix rows.
pub const HEADER_LINES: usize = 3;

/// A square matrix read from a JANPA text file, with the optional label column.
#[derive(Debug, Clone, PartialEq)]
pub struct JanpaMatrix {
    pub matrix: DMatrix<f64>,
    pub labels: OrbitalLabels,
}

impl JanpaMatrix {
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }
}

#[derive(Debug, Error)]
pub enum JanpaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: JanpaParseErrorKind,
    },
    #[error("No matrix rows found after the file header")]
    MissingData,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JanpaParseErrorKind {
    #[error("Invalid number in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
    #[error("Row has {found} numeric columns, expected {expected}")]
    TooFewColumns { expected: usize, found: usize },
    #[error("Row has no orbital label while other rows do")]
    MissingLabel,
    #[error("Row has an orbital label while other rows do not")]
    UnexpectedLabel,
}

/// Reader for the plain-text matrix files JANPA writes with `-Fock_NAO_File`,
/// `-SDS_NAO_File`, `-CLPO2LHO_File` and `-LHO2NAO_File`.
///
/// The layout is a fixed header, then one line per matrix row. The matrix dimension
/// is the number of rows; a row may carry one extra trailing token, which is taken
/// as the orbital label (only the CLPO→LHO file has these).
pub struct JanpaFile;

impl MatrixFile for JanpaFile {
    type Output = JanpaMatrix;
    type Error = JanpaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut rows: Vec<(usize, String)> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            if line_num <= HEADER_LINES {
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            rows.push((line_num, line));
        }

        if rows.is_empty() {
            return Err(JanpaError::MissingData);
        }

        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        let mut labels: Vec<Option<String>> = Vec::with_capacity(n);

        for (line_num, line) in &rows {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < n {
                return Err(JanpaError::Parse {
                    line: *line_num,
                    kind: JanpaParseErrorKind::TooFewColumns {
                        expected: n,
                        found: tokens.len(),
                    },
                });
            }
            for (column, token) in tokens[..n].iter().enumerate() {
                let value = parse_float(token).ok_or_else(|| JanpaError::Parse {
                    line: *line_num,
                    kind: JanpaParseErrorKind::InvalidFloat {
                        column: column + 1,
                        value: (*token).to_string(),
                    },
                })?;
                values.push(value);
            }
            let label = &tokens[n..];
            labels.push((!label.is_empty()).then(|| label.join(" ")));
        }

        let labels = collect_labels(&rows, labels)?;

        Ok(JanpaMatrix {
            matrix: DMatrix::from_row_slice(n, n, &values),
            labels,
        })
    }
}

fn collect_labels(
    rows: &[(usize, String)],
    labels: Vec<Option<String>>,
) -> Result<OrbitalLabels, JanpaError> {
    let has_labels = labels[0].is_some();
    for ((line_num, _), label) in rows.iter().zip(&labels) {
        match (has_labels, label.is_some()) {
            (true, false) => {
                return Err(JanpaError::Parse {
                    line: *line_num,
                    kind: JanpaParseErrorKind::MissingLabel,
                });
            }
            (false, true) => {
                return Err(JanpaError::Parse {
                    line: *line_num,
                    kind: JanpaParseErrorKind::UnexpectedLabel,
                });
            }
            _ => {}
        }
    }

    if has_labels {
        Ok(OrbitalLabels::new(labels.into_iter().flatten().collect()))
    } else {
        Ok(OrbitalLabels::none())
    }
}

// Fortran-style exponents ("1.0D-03") appear in some JANPA builds.
fn parse_float(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .or_else(|| token.replace(['D', 'd'], "E").parse::<f64>().ok())
}
