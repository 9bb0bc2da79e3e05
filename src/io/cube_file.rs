//! Reading of cube files: one `a <l1> <l2> ... 0` line per cube, the same
//! format the cube emitter writes.

use std::io::BufRead;

use thiserror::Error;

use crate::engine::variables::Literal;

#[derive(Debug, Error)]
pub enum CubeFileError {
    #[error("line {line}: cube lines must start with 'a': {content}")]
    MissingPrefix { line: usize, content: String },
    #[error("line {line}: unexpected token in cube: '{token}'")]
    UnexpectedToken { line: usize, token: String },
    #[error("line {line}: cube is not terminated by 0")]
    UnterminatedCube { line: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parse a cube file into one literal list per cube.
pub fn parse_cubes(reader: impl BufRead) -> Result<Vec<Vec<Literal>>, CubeFileError> {
    let mut cubes = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        let Some(rest) = trimmed.strip_prefix('a') else {
            return Err(CubeFileError::MissingPrefix {
                line: line_number,
                content: trimmed.to_owned(),
            });
        };

        let mut cube = Vec::new();
        let mut terminated = false;
        for token in rest.split_whitespace() {
            let value: i32 = token.parse().map_err(|_| CubeFileError::UnexpectedToken {
                line: line_number,
                token: token.to_owned(),
            })?;
            if value == 0 {
                terminated = true;
                break;
            }
            cube.push(Literal::from_dimacs(value));
        }

        if !terminated {
            return Err(CubeFileError::UnterminatedCube { line: line_number });
        }
        cubes.push(cube);
    }

    Ok(cubes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::parse_cubes;
    use crate::engine::variables::Literal;

    #[test]
    fn parses_cube_lines() {
        let cubes = parse_cubes(Cursor::new("a 1 -2 3 0\na -4 0\n")).unwrap();
        assert_eq!(cubes.len(), 2);
        assert_eq!(
            cubes[0],
            vec![
                Literal::from_dimacs(1),
                Literal::from_dimacs(-2),
                Literal::from_dimacs(3)
            ]
        );
        assert_eq!(cubes[1], vec![Literal::from_dimacs(-4)]);
    }

    #[test]
    fn rejects_lines_without_prefix_or_terminator() {
        assert!(parse_cubes(Cursor::new("1 2 0\n")).is_err());
        assert!(parse_cubes(Cursor::new("a 1 2\n")).is_err());
    }
}
