use crate::algebra::FloatT;
use crate::model::expr::{Expr, NaryExpr, NaryOp};
use crate::model::{Model, ObjectiveSense};
use crate::nl::{NlOpcode, NlWriteError};

use derive_builder::Builder;
use std::fs::File;
use std::io::{self, Write};
use std::iter::zip;
use std::path::Path;

/// Output settings for `.nl` writing, constructed via
/// [`NlWriterSettingsBuilder`].
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct NlWriterSettings {
    ///emit the `k`/`J`/`G` linear sparsity segments
    #[builder(default = "true")]
    pub sparsity_segments: bool,

    ///significant digits for numeric literals.   `None` selects the
    ///shortest representation that round-trips.
    #[builder(default = "None")]
    pub precision: Option<usize>,
}

impl Default for NlWriterSettings {
    fn default() -> Self {
        NlWriterSettingsBuilder::default().build().unwrap()
    }
}

impl NlWriterSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(digits)) = self.precision {
            if !(1..=17).contains(&digits) {
                return Err(format!(
                    "precision must be between 1 and 17 significant digits, got {}",
                    digits
                ));
            }
        }
        Ok(())
    }
}

impl<T> Model<T>
where
    T: FloatT,
{
    /// Write the model in `.nl` text format.
    pub fn write_nl<W: Write>(
        &self,
        w: &mut W,
        settings: &NlWriterSettings,
    ) -> Result<(), NlWriteError> {
        NlWriter {
            model: self,
            settings,
        }
        .write(w)
    }

    /// Write the model in `.nl` text format to `path` with default
    /// settings, creating or truncating the file.
    pub fn write_nl_file<P: AsRef<Path>>(&self, path: P) -> Result<(), NlWriteError> {
        let mut file = File::create(path)?;
        self.write_nl(&mut file, &NlWriterSettings::default())
    }
}

struct NlWriter<'a, T>
where
    T: FloatT,
{
    model: &'a Model<T>,
    settings: &'a NlWriterSettings,
}

impl<T> NlWriter<'_, T>
where
    T: FloatT,
{
    fn write<W: Write>(&self, w: &mut W) -> Result<(), NlWriteError> {
        let model = self.model;
        if model.num_variables() == 0 {
            return Err(NlWriteError::NoVariables);
        }
        let objective = model.objective().ok_or(NlWriteError::MissingObjective)?;

        let nvar = model.num_variables();
        let ncon = model.num_constraints();

        // participating variables per constraint and for the objective;
        // these fix both the header nonzero counts and the J/G rows
        let con_vars: Vec<Vec<usize>> = model
            .constraints()
            .iter()
            .map(|c| c.body.variables())
            .collect();
        let obj_vars = objective.expr.variables();
        let jnnz: usize = con_vars.iter().map(|v| v.len()).sum();
        let gnnz = obj_vars.len();

        // nonlinear variable counts: in constraints, in the objective, in both
        let mut in_con = vec![false; nvar];
        let mut in_obj = vec![false; nvar];
        for vars in &con_vars {
            for &j in vars {
                in_con[j] = true;
            }
        }
        for &j in &obj_vars {
            in_obj[j] = true;
        }
        let nlvc = in_con.iter().filter(|&&b| b).count();
        let nlvo = in_obj.iter().filter(|&&b| b).count();
        let nlvb = zip(&in_con, &in_obj).filter(|(&c, &o)| c && o).count();

        // 10-line header
        writeln!(w, "g3 1 1 0")?;
        writeln!(w, " {} {} 1 0 {}", nvar, ncon, ncon)?;
        writeln!(w, " {} 1", ncon)?;
        writeln!(w, " 0 0")?;
        writeln!(w, " {} {} {}", nlvc, nlvo, nlvb)?;
        writeln!(w, " 0 0 0 0")?;
        writeln!(w, " 0 0 0 0 0")?;
        writeln!(w, " {} {}", jnnz, gnnz)?;
        writeln!(w, " 0 0")?;
        writeln!(w, " 0 0 0 0 0")?;

        // constraint bodies, prefix encoded
        for con in model.constraints() {
            writeln!(w, "C{}", con.index)?;
            self.write_expr(w, &con.body)?;
        }

        // the single objective and its sense
        let sense = match objective.sense {
            ObjectiveSense::Minimize => 0,
            ObjectiveSense::Maximize => 1,
        };
        writeln!(w, "O0 {}", sense)?;
        self.write_expr(w, &objective.expr)?;

        // initial variable values
        writeln!(w, "x{}", nvar)?;
        for v in model.variables() {
            writeln!(w, "{} {}", v.index, self.number(v.value))?;
        }

        // constraint bounds: every row an equality against its rhs
        writeln!(w, "r")?;
        for con in model.constraints() {
            writeln!(w, "4 {}", self.number(con.rhs))?;
        }

        // variable bounds: all free
        writeln!(w, "b")?;
        for _ in 0..nvar {
            writeln!(w, "3")?;
        }

        if self.settings.sparsity_segments {
            // cumulative Jacobian column counts, columns 0..nvar-1
            let mut colcount = vec![0usize; nvar];
            for vars in &con_vars {
                for &j in vars {
                    colcount[j] += 1;
                }
            }
            writeln!(w, "k{}", nvar - 1)?;
            let mut cum = 0usize;
            for count in colcount.iter().take(nvar - 1) {
                cum += count;
                writeln!(w, "{}", cum)?;
            }

            // linear coefficient rows are all zero: the constraints are
            // treated as wholly nonlinear and live in the C bodies
            for (con, vars) in zip(model.constraints(), &con_vars) {
                writeln!(w, "J{} {}", con.index, vars.len())?;
                for &j in vars {
                    writeln!(w, "{} 0", j)?;
                }
            }
            writeln!(w, "G0 {}", gnnz)?;
            for &j in &obj_vars {
                writeln!(w, "{} 0", j)?;
            }
        }

        Ok(())
    }

    fn number(&self, v: T) -> String {
        match self.settings.precision {
            None => format!("{}", v),
            Some(digits) => format!("{:.*e}", digits - 1, v),
        }
    }

    fn write_expr<W: Write>(&self, w: &mut W, e: &Expr<T>) -> io::Result<()> {
        match e {
            Expr::Constant(c) => writeln!(w, "n{}", self.number(c.0)),
            Expr::Variable(v) => writeln!(w, "v{}", v.index),
            Expr::Unary(u) => {
                writeln!(w, "o{}", NlOpcode::from(u.op).code())?;
                self.write_expr(w, &u.arg)
            }
            Expr::Binary(b) => {
                writeln!(w, "o{}", NlOpcode::from(b.op).code())?;
                self.write_expr(w, &b.lhs)?;
                self.write_expr(w, &b.rhs)
            }
            Expr::Nary(n) => self.write_nary(w, n),
        }
    }

    // n-ary sums and products have no opcode in the supported subset,
    // so they lower to left-associated chains of the binary form
    fn write_nary<W: Write>(&self, w: &mut W, n: &NaryExpr<T>) -> io::Result<()> {
        match n.args.len() {
            0 => writeln!(w, "n{}", self.number(n.op.identity())),
            _ => self.write_chain(w, n.op, &n.args),
        }
    }

    fn write_chain<W: Write>(&self, w: &mut W, op: NaryOp, args: &[Expr<T>]) -> io::Result<()> {
        if args.len() == 1 {
            return self.write_expr(w, &args[0]);
        }
        writeln!(w, "o{}", NlOpcode::from(op).code())?;
        self.write_chain(w, op, &args[..args.len() - 1])?;
        self.write_expr(w, &args[args.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> Model<f64> {
        let mut m = Model::new();
        let [x, y] = m.add_variables(1.0);
        m.equality(x + y + 1.5, 2.0);
        m.minimize(x * y);
        m
    }

    fn write_to_string(m: &Model<f64>, settings: &NlWriterSettings) -> String {
        let mut buf = Vec::new();
        m.write_nl(&mut buf, settings).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_expression_encoding() {
        let text = write_to_string(&tiny_model(), &NlWriterSettings::default());
        let lines: Vec<&str> = text.lines().collect();

        // three-term sum lowers to a chain of binary o0
        let c0 = lines.iter().position(|&l| l == "C0").unwrap();
        assert_eq!(
            &lines[c0 + 1..c0 + 6],
            &["o0", "o0", "v0", "v1", "n1.5"]
        );

        // objective segment: minimization of a product
        let o0 = lines.iter().position(|&l| l == "O0 0").unwrap();
        assert_eq!(&lines[o0 + 1..o0 + 4], &["o2", "v0", "v1"]);

        // equality bound row carries the constant rhs
        let r = lines.iter().position(|&l| l == "r").unwrap();
        assert_eq!(lines[r + 1], "4 2");
    }

    #[test]
    fn test_sparsity_segments_toggle() {
        let settings = NlWriterSettingsBuilder::default()
            .sparsity_segments(false)
            .build()
            .unwrap();
        let text = write_to_string(&tiny_model(), &settings);
        assert!(!text.lines().any(|l| l.starts_with('k')));
        assert!(!text.lines().any(|l| l.starts_with('J')));
        assert!(!text.lines().any(|l| l.starts_with('G')));

        let text = write_to_string(&tiny_model(), &NlWriterSettings::default());
        assert!(text.lines().any(|l| l == "k1"));
        assert!(text.lines().any(|l| l == "J0 2"));
        assert!(text.lines().any(|l| l == "G0 2"));
    }

    #[test]
    fn test_precision_formatting() {
        let settings = NlWriterSettingsBuilder::default()
            .precision(Some(5))
            .build()
            .unwrap();
        let text = write_to_string(&tiny_model(), &settings);
        assert!(text.lines().any(|l| l == "n1.5000e0"));
    }

    #[test]
    fn test_settings_validation() {
        assert!(NlWriterSettingsBuilder::default()
            .precision(Some(0))
            .build()
            .is_err());
        assert!(NlWriterSettingsBuilder::default()
            .precision(Some(18))
            .build()
            .is_err());
        assert!(NlWriterSettingsBuilder::default()
            .precision(Some(17))
            .build()
            .is_ok());
    }

    #[test]
    fn test_missing_objective() {
        let mut m = Model::<f64>::new();
        let [x] = m.add_variables(1.0);
        m.equality(x, 1.0);
        let mut buf = Vec::new();
        assert!(matches!(
            m.write_nl(&mut buf, &NlWriterSettings::default()),
            Err(NlWriteError::MissingObjective)
        ));
    }
}
