//! Reader for AMPL-style `.dat` instance files.
//!
//! The reader is token based and only looks for the definitions it needs,
//! in this order:
//!
//! ```text
//! param N_total:= 4 ;
//! param P:= 2 ;
//! param R:= 150 ;
//! param c1:= 1 ;
//! param c2:= 0.5 ;
//! param: x y flag prob_ohca:=
//! 1  0.0   0.0  0  0.25
//! 2  100.0 0.0  1  0.25
//! ...
//! ;
//! ```
//!
//! Site ids in the file are 1-based. Rows with an id outside `1..=N` are
//! skipped with a warning.

use super::{ProblemInstance, Site};
use crate::error::{MoeadError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// Reads an instance from disk.
///
/// The instance name is the file name without directory.
pub fn read_instance(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| MoeadError::io(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let instance = parse_instance(&name, &content)?;
    info!(
        instance = %instance.name(),
        sites = instance.site_count(),
        preinstalled = instance.preinstalled_count(),
        budget = instance.budget(),
        radius = instance.coverage_radius(),
        "instance loaded"
    );
    Ok(instance)
}

/// Parses instance text. `name` is used for the instance and in errors.
pub fn parse_instance(name: &str, content: &str) -> Result<ProblemInstance> {
    let mut tokens = Tokens::new(name, content);

    let n: usize = tokens.value_after("N_total:=")?;
    let mut sites: Vec<Site> = (0..n).map(|i| Site::new(i, 0.0, 0.0)).collect();

    let budget_amount: f64 = tokens.value_after("P:=")?;
    let radius: f64 = tokens.value_after("R:=")?;
    let install_cost: f64 = tokens.value_after("c1:=")?;
    let relocation_cost: f64 = tokens.value_after("c2:=")?;

    tokens.seek("prob_ohca:=")?;
    loop {
        if tokens.peek_is(";") {
            break;
        }
        let id: i64 = tokens.number()?;
        let x: f64 = tokens.number()?;
        let y: f64 = tokens.number()?;
        let flag: f64 = tokens.number()?;
        let prob: f64 = tokens.number()?;

        if id >= 1 && (id as usize) <= n {
            let site = &mut sites[id as usize - 1];
            site.x = x;
            site.y = y;
            site.preinstalled = flag >= 0.5;
            site.event_probability = prob;
        } else {
            warn!(instance = name, id, "site id out of range, row skipped");
        }
    }

    Ok(ProblemInstance::new(
        name,
        sites,
        budget_amount,
        radius,
        install_cost,
        relocation_cost,
    ))
}

/// Whitespace tokens with their line numbers. A trailing `;` is split off
/// into its own token.
struct Tokens<'a> {
    file: &'a str,
    items: Vec<(&'a str, usize)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(file: &'a str, content: &'a str) -> Self {
        let mut items = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            for tok in line.split_whitespace() {
                match tok.strip_suffix(';') {
                    Some(head) if !head.is_empty() => {
                        items.push((head, line_no + 1));
                        items.push((";", line_no + 1));
                    }
                    _ => items.push((tok, line_no + 1)),
                }
            }
        }
        Self {
            file,
            items,
            pos: 0,
        }
    }

    fn last_line(&self) -> usize {
        self.items.last().map(|(_, l)| *l).unwrap_or(0)
    }

    /// Advances past the first token containing `marker`. Returns whatever
    /// follows the marker inside that token.
    fn seek(&mut self, marker: &str) -> Result<&'a str> {
        while let Some(&(tok, _)) = self.items.get(self.pos) {
            self.pos += 1;
            if let Some(idx) = tok.find(marker) {
                return Ok(&tok[idx + marker.len()..]);
            }
        }
        Err(MoeadError::parse(
            self.file,
            self.last_line(),
            format!("definition `{marker}` not found"),
        ))
    }

    /// Reads the value of a scalar definition, attached or in the next token.
    fn value_after<T: FromStr>(&mut self, marker: &str) -> Result<T> {
        let rest = self.seek(marker)?;
        if rest.is_empty() {
            return self.number();
        }
        let line = self.items[self.pos - 1].1;
        rest.parse().map_err(|_| {
            MoeadError::parse(self.file, line, format!("invalid value `{rest}` for `{marker}`"))
        })
    }

    fn peek_is(&self, expected: &str) -> bool {
        matches!(self.items.get(self.pos), Some(&(tok, _)) if tok == expected)
    }

    fn number<T: FromStr>(&mut self) -> Result<T> {
        match self.items.get(self.pos) {
            Some(&(tok, line)) => {
                self.pos += 1;
                tok.parse().map_err(|_| {
                    MoeadError::parse(self.file, line, format!("expected a number, found `{tok}`"))
                })
            }
            None => Err(MoeadError::parse(
                self.file,
                self.last_line(),
                "unexpected end of file",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
set N_total:= 4 ;
param P:= 300 ;
param R:= 150 ;
param c1:= 100 ;
param c2:= 40 ;
param: x y flag prob_ohca:=
1 0.0 0.0 0 0.1
2 100.0 0.0 1 0.2
3 200.0 0.0 0 0.3
4 300.0 0.0 0 0.4
;
";

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance("sample.dat", SAMPLE).unwrap();
        assert_eq!(inst.site_count(), 4);
        assert_eq!(inst.preinstalled_count(), 1);
        assert!(inst.is_preinstalled(1));
        assert_eq!(inst.budget(), 3);
        assert!((inst.coverage_radius() - 150.0).abs() < 1e-12);
        assert!((inst.install_cost() - 100.0).abs() < 1e-12);
        assert!((inst.relocation_cost() - 40.0).abs() < 1e-12);
        assert!((inst.site(3).x - 300.0).abs() < 1e-12);
        assert!((inst.site(2).event_probability - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_attached_values_and_semicolons() {
        let text = "N_total:=2; P:=1; R:=5; c1:=1; c2:=1;\nprob_ohca:=\n1 0 0 0 0.5\n2 1 1 1 0.5;\n";
        let inst = parse_instance("tight.dat", text).unwrap();
        assert_eq!(inst.site_count(), 2);
        assert!(inst.is_preinstalled(1));
        assert!((inst.site(1).y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_id_skipped() {
        let text = "N_total:= 1 ; P:= 1 ; R:= 1 ; c1:= 1 ; c2:= 1 ;\nprob_ohca:=\n9 5 5 1 0.9\n1 2 3 0 0.1\n;";
        let inst = parse_instance("skip.dat", text).unwrap();
        assert_eq!(inst.site_count(), 1);
        assert!(!inst.is_preinstalled(0));
        assert!((inst.site(0).x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_definition() {
        let err = parse_instance("bad.dat", "N_total:= 3 ;").unwrap_err();
        assert!(err.to_string().contains("P:="), "got {err}");
    }

    #[test]
    fn test_malformed_number() {
        let text = "N_total:= 1 ; P:= x ;";
        let err = parse_instance("bad.dat", text).unwrap_err();
        assert!(matches!(err, MoeadError::Parse { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_file() {
        let err = read_instance("/definitely/not/here.dat").unwrap_err();
        assert!(matches!(err, MoeadError::Io { .. }));
    }
}
