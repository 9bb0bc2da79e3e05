//! DIMACS CNF reading and solution writing.

use std::io::BufRead;
use std::io::Write;

use thiserror::Error;

use crate::basic_types::CnfFormula;
use crate::engine::variables::Literal;

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("line {line}: unexpected token in DIMACS CNF input: '{token}'")]
    UnexpectedToken { line: usize, token: String },
    #[error("line {line}: invalid header syntax: {header}")]
    InvalidHeader { line: usize, header: String },
    #[error("unterminated clause at end of input")]
    UnterminatedClause,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parse a DIMACS CNF formula. The header is optional; comment lines start
/// with `c`.
pub fn parse_dimacs(reader: impl BufRead) -> Result<CnfFormula, DimacsParseError> {
    let mut cnf = CnfFormula::new();
    let mut clause: Vec<Literal> = Vec::new();
    let mut header_seen = false;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if trimmed.starts_with('p') {
            if header_seen {
                return Err(DimacsParseError::InvalidHeader {
                    line: line_number,
                    header: trimmed.to_owned(),
                });
            }
            header_seen = true;

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let num_variables = match fields.as_slice() {
                ["p", "cnf", num_variables, _num_clauses] => num_variables.parse::<usize>().ok(),
                _ => None,
            };
            match num_variables {
                Some(num_variables) => cnf.ensure_variables(num_variables),
                None => {
                    return Err(DimacsParseError::InvalidHeader {
                        line: line_number,
                        header: trimmed.to_owned(),
                    })
                }
            }
            continue;
        }

        for token in trimmed.split_whitespace() {
            let value: i32 = token.parse().map_err(|_| DimacsParseError::UnexpectedToken {
                line: line_number,
                token: token.to_owned(),
            })?;

            if value == 0 {
                cnf.add_clause(std::mem::take(&mut clause));
            } else {
                clause.push(Literal::from_dimacs(value));
            }
        }
    }

    if !clause.is_empty() {
        return Err(DimacsParseError::UnterminatedClause);
    }

    Ok(cnf)
}

/// Write a satisfying assignment as whitespace-separated signed literals
/// terminated by 0.
pub fn write_model(writer: &mut impl Write, model: &[Literal]) -> std::io::Result<()> {
    for literal in model {
        write!(writer, "{} ", literal.to_dimacs())?;
    }
    writeln!(writer, "0")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::parse_dimacs;
    use crate::engine::variables::Literal;

    #[test]
    fn parses_a_formula_with_header_and_comments() {
        let input = "c example\np cnf 4 2\n1 -2 0\nc inline comment\n3 4 -1 0\n";
        let cnf = parse_dimacs(Cursor::new(input)).unwrap();

        assert_eq!(cnf.num_variables(), 4);
        assert_eq!(cnf.num_clauses(), 2);
        let clauses: Vec<_> = cnf.clauses().collect();
        assert_eq!(
            clauses[0],
            &[Literal::from_dimacs(1), Literal::from_dimacs(-2)]
        );
    }

    #[test]
    fn clauses_may_span_lines() {
        let cnf = parse_dimacs(Cursor::new("1 2\n-3 0\n")).unwrap();
        assert_eq!(cnf.num_clauses(), 1);
        let clauses: Vec<_> = cnf.clauses().collect();
        assert_eq!(clauses[0].len(), 3);
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(parse_dimacs(Cursor::new("1 x 0\n")).is_err());
    }

    #[test]
    fn rejects_unterminated_clauses() {
        assert!(parse_dimacs(Cursor::new("1 2 3\n")).is_err());
    }
}
