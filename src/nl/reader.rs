use crate::algebra::FloatT;
use crate::model::expr::Expr;
use crate::model::{Model, ObjectiveSense};
use crate::nl::{NlOpcode, NlReadError, OP_LOOKUP};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Counts parsed from the 10-line `.nl` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NlHeader {
    /// number of variables
    pub nvar: usize,
    /// number of constraints
    pub ncon: usize,
    /// number of objectives
    pub nobj: usize,
    /// nonzeros in the constraint Jacobian
    pub jnnz: usize,
    /// nonzeros in the objective gradient(s)
    pub gnnz: usize,
    /// number of common subexpressions (all partitions summed)
    pub nexpr: usize,
}

// line iterator that tracks the 1-based line number for error reporting
struct LineReader<R> {
    lines: std::io::Lines<R>,
    lineno: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            lineno: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, NlReadError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.lineno += 1;
                Ok(Some(line?))
            }
        }
    }

    fn expect_line(&mut self) -> Result<String, NlReadError> {
        self.next_line()?.ok_or(NlReadError::UnexpectedEof)
    }
}

fn parse_usize(field: &str, lineno: usize) -> Result<usize, NlReadError> {
    field
        .trim()
        .parse()
        .map_err(|_| NlReadError::BadInteger(lineno))
}

fn parse_u32(field: &str, lineno: usize) -> Result<u32, NlReadError> {
    field
        .trim()
        .parse()
        .map_err(|_| NlReadError::BadInteger(lineno))
}

fn parse_value<T: FloatT>(field: &str, lineno: usize) -> Result<T, NlReadError> {
    let v: f64 = field
        .trim()
        .parse()
        .map_err(|_| NlReadError::BadNumber(lineno))?;
    T::from_f64(v).ok_or(NlReadError::BadNumber(lineno))
}

// whitespace-separated integer fields of a header or segment line
fn int_fields(line: &str, lineno: usize) -> Result<Vec<usize>, NlReadError> {
    line.split_whitespace()
        .map(|f| parse_usize(f, lineno))
        .collect()
}

/// Parse the 10-line header, leaving the reader at the first segment
/// line.
fn read_header<R: BufRead>(lr: &mut LineReader<R>) -> Result<NlHeader, NlReadError> {
    let line1 = match lr.next_line()? {
        None => return Err(NlReadError::EmptyFile),
        Some(line) => line,
    };
    match line1.chars().next() {
        None => return Err(NlReadError::EmptyFile),
        Some('g') => (),
        Some('b') => return Err(NlReadError::BinaryUnsupported),
        Some(c) => return Err(NlReadError::BadIndicator(c)),
    }

    // line 2: number of variables, constraints, objectives
    let line2 = lr.expect_line()?;
    let counts = int_fields(&line2, lr.lineno)?;
    if counts.len() < 3 {
        return Err(NlReadError::BadInteger(lr.lineno));
    }
    let (nvar, ncon, nobj) = (counts[0], counts[1], counts[2]);

    // lines 3-7: nonlinear / network / discrete counts, unused here
    for _ in 0..5 {
        lr.expect_line()?;
    }

    // line 8: nonzeros in the Jacobian and gradients
    let line8 = lr.expect_line()?;
    let nnz = int_fields(&line8, lr.lineno)?;
    if nnz.len() < 2 {
        return Err(NlReadError::BadInteger(lr.lineno));
    }
    let (jnnz, gnnz) = (nnz[0], nnz[1]);

    // line 9: max name lengths, unused
    lr.expect_line()?;

    // line 10: common subexpression partition, summed
    let line10 = lr.expect_line()?;
    let nexpr = int_fields(&line10, lr.lineno)?.iter().sum();

    Ok(NlHeader {
        nvar,
        ncon,
        nobj,
        jnnz,
        gnnz,
        nexpr,
    })
}

/// Parse one prefix-notation expression starting at the next line.
fn read_expr<T, R>(lr: &mut LineReader<R>, nvar: usize) -> Result<Expr<T>, NlReadError>
where
    T: FloatT,
    R: BufRead,
{
    let line = lr.expect_line()?;
    let lineno = lr.lineno;
    let mut chars = line.chars();
    let tag = chars.next().ok_or(NlReadError::UnexpectedEof)?;
    let rest = chars.as_str();

    match tag {
        'n' => Ok(Expr::constant(parse_value(rest, lineno)?)),
        'v' => {
            let index = parse_usize(rest, lineno)?;
            if index >= nvar {
                return Err(NlReadError::VariableOutOfBounds(lineno, index));
            }
            Ok(Expr::variable(index))
        }
        'o' => {
            let code = parse_u32(rest, lineno)?;
            let op = *OP_LOOKUP
                .get(&code)
                .ok_or(NlReadError::UnsupportedOpcode(lineno, code))?;
            if let Some(unary) = op.unary_op() {
                let arg = read_expr(lr, nvar)?;
                return Ok(Expr::unary(unary, arg));
            }
            let lhs = read_expr(lr, nvar)?;
            let rhs = read_expr(lr, nvar)?;
            Ok(match op {
                NlOpcode::Plus => Expr::sum(vec![lhs, rhs]),
                NlOpcode::Mult => Expr::product(vec![lhs, rhs]),
                NlOpcode::Minus => lhs - rhs,
                NlOpcode::Div => lhs / rhs,
                NlOpcode::Pow => lhs.pow(rhs),
                _ => unreachable!("unary opcodes handled above"),
            })
        }
        c => Err(NlReadError::UnexpectedChar(lineno, c)),
    }
}

impl<T> Model<T>
where
    T: FloatT,
{
    /// Read a model from `.nl` text.
    ///
    /// The `x`, `C`, `O` and `r` segments are consumed; the variable
    /// bound and linear sparsity segments (`b`, `k`, `J`, `G`) are
    /// skipped, as is everything in the header beyond the counts.
    pub fn read_nl<R: BufRead>(reader: R) -> Result<Self, NlReadError> {
        let mut lr = LineReader::new(reader);
        let header = read_header(&mut lr)?;

        let mut values = vec![T::zero(); header.nvar];
        let mut bodies: Vec<Option<Expr<T>>> = vec![None; header.ncon];
        let mut rhs = vec![T::zero(); header.ncon];
        let mut objective: Option<(ObjectiveSense, Expr<T>)> = None;

        while let Some(line) = lr.next_line()? {
            let lineno = lr.lineno;
            let mut chars = line.chars();
            let tag = match chars.next() {
                None => continue,
                Some(c) => c,
            };
            let rest = chars.as_str();

            match tag {
                'C' => {
                    let index = parse_usize(rest, lineno)?;
                    if index >= header.ncon {
                        return Err(NlReadError::ConstraintOutOfBounds(lineno, index));
                    }
                    bodies[index] = Some(read_expr(&mut lr, header.nvar)?);
                }
                'O' => {
                    let fields = int_fields(rest, lineno)?;
                    if fields.len() < 2 {
                        return Err(NlReadError::BadInteger(lineno));
                    }
                    let sense = if fields[1] == 1 {
                        ObjectiveSense::Maximize
                    } else {
                        ObjectiveSense::Minimize
                    };
                    objective = Some((sense, read_expr(&mut lr, header.nvar)?));
                }
                'x' => {
                    let count = parse_usize(rest, lineno)?;
                    for _ in 0..count {
                        let entry = lr.expect_line()?;
                        let lineno = lr.lineno;
                        let mut fields = entry.split_whitespace();
                        let index = parse_usize(
                            fields.next().ok_or(NlReadError::BadInteger(lineno))?,
                            lineno,
                        )?;
                        if index >= header.nvar {
                            return Err(NlReadError::VariableOutOfBounds(lineno, index));
                        }
                        values[index] = parse_value(
                            fields.next().ok_or(NlReadError::BadNumber(lineno))?,
                            lineno,
                        )?;
                    }
                }
                'r' => {
                    for i in 0..header.ncon {
                        let entry = lr.expect_line()?;
                        let lineno = lr.lineno;
                        let mut fields = entry.split_whitespace();
                        let code = parse_u32(
                            fields.next().ok_or(NlReadError::BadInteger(lineno))?,
                            lineno,
                        )?;
                        if code != 4 {
                            return Err(NlReadError::UnsupportedBound(lineno, code));
                        }
                        rhs[i] = parse_value(
                            fields.next().ok_or(NlReadError::BadNumber(lineno))?,
                            lineno,
                        )?;
                    }
                }
                'b' => {
                    for _ in 0..header.nvar {
                        lr.expect_line()?;
                    }
                }
                'k' => {
                    let count = parse_usize(rest, lineno)?;
                    for _ in 0..count {
                        lr.expect_line()?;
                    }
                }
                'J' | 'G' => {
                    let fields = int_fields(rest, lineno)?;
                    if fields.len() < 2 {
                        return Err(NlReadError::BadInteger(lineno));
                    }
                    for _ in 0..fields[1] {
                        lr.expect_line()?;
                    }
                }
                c => return Err(NlReadError::UnexpectedChar(lineno, c)),
            }
        }

        // assemble the model in declaration order
        let mut model = Model::new();
        for &value in &values {
            model.add_variable(value);
        }
        for (i, body) in bodies.into_iter().enumerate() {
            let body = body.ok_or(NlReadError::MissingConstraintBody(i))?;
            model.equality(body, Expr::constant(rhs[i]));
        }
        if let Some((sense, expr)) = objective {
            match sense {
                ObjectiveSense::Minimize => model.minimize(expr),
                ObjectiveSense::Maximize => model.maximize(expr),
            }
        }
        Ok(model)
    }

    /// Read a model from the `.nl` file at `path`.
    pub fn read_nl_file<P: AsRef<Path>>(path: P) -> Result<Self, NlReadError> {
        let file = File::open(path)?;
        Self::read_nl(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TINY: &str = "\
g3 1 1 0
 2 1 1 0 1
 1 1
 0 0
 2 2 2
 0 0 0 0
 0 0 0 0 0
 2 2
 0 0
 0 0 0 0 0
C0
o2
v0
o41
v1
O0 0
o0
v0
v1
x2
0 1.5
1 -0.5
r
4 2
";

    #[test]
    fn test_read_tiny() {
        let model = Model::<f64>::read_nl(Cursor::new(TINY)).unwrap();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_constraints(), 1);
        assert_eq!(model.point(), vec![1.5, -0.5]);
        assert_eq!(model.constraints()[0].rhs, 2.0);
        assert_eq!(
            model.constraints()[0].body.to_string(),
            "(v0 * sin(v1))"
        );
        assert_eq!(model.objective_value(), Some(1.0));
    }

    #[test]
    fn test_empty_file() {
        let err = Model::<f64>::read_nl(Cursor::new("")).unwrap_err();
        assert!(matches!(err, NlReadError::EmptyFile));
    }

    #[test]
    fn test_binary_rejected() {
        let err = Model::<f64>::read_nl(Cursor::new("b3 1 1 0\n")).unwrap_err();
        assert!(matches!(err, NlReadError::BinaryUnsupported));
    }

    #[test]
    fn test_unsupported_opcode() {
        let text = TINY.replace("o41", "o54");
        let err = Model::<f64>::read_nl(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, NlReadError::UnsupportedOpcode(_, 54)));
    }

    #[test]
    fn test_variable_out_of_bounds() {
        let text = TINY.replace("v1\nO0", "v7\nO0");
        let err = Model::<f64>::read_nl(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, NlReadError::VariableOutOfBounds(_, 7)));
    }
}
