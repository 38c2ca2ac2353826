use crate::data::Lit;
use crate::error::{Result, SolverError};
use crate::formula::Formula;

/// Parses a DIMACS CNF document into a [`Formula`].
///
/// Comment lines (`c ...`) are skipped. The `p cnf <vars> <clauses>` header
/// supplies `num_vars`; its own clause count is advisory only and isn't
/// cross-checked against what's actually found.
pub fn parse(input: &str) -> Result<Formula> {
    let mut num_vars = None;
    let mut clauses = Vec::new();
    let mut current: Vec<Lit> = Vec::new();

    for (line_no, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = line_no + 1;

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("p cnf") {
            let mut fields = rest.split_whitespace();
            let vars = fields
                .next()
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or_else(|| malformed(line_no, "expected `p cnf <vars> <clauses>` header"))?;
            num_vars = Some(vars);
            continue;
        }

        for token in line.split_whitespace() {
            let n: i32 = token
                .parse()
                .map_err(|_| malformed(line_no, &format!("`{token}` is not an integer")))?;
            if n == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(Lit::new(n));
            }
        }
    }

    if !current.is_empty() {
        return Err(malformed(
            input.lines().count(),
            "final clause is missing its terminating 0",
        ));
    }

    let num_vars = num_vars.ok_or_else(|| malformed(0, "missing `p cnf` header"))?;
    Ok(Formula::new(num_vars, clauses))
}

/// Renders a [`Formula`] back to DIMACS CNF text.
pub fn render(f: &Formula) -> String {
    let mut out = format!("p cnf {} {}\n", f.num_vars(), f.len());
    for clause in f.clauses() {
        for l in clause {
            out.push_str(&l.to_i32().to_string());
            out.push(' ');
        }
        out.push_str("0\n");
    }
    out
}

fn malformed(line: usize, detail: &str) -> SolverError {
    SolverError::MalformedInput {
        line,
        detail: detail.to_string(),
    }
}
