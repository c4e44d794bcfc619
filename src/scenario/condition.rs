use std::fmt;
use std::str::FromStr;

use crate::scenario::ScenarioError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Clause {
    Lt(f64),
    Le(f64),
    Gt(f64),
    Ge(f64),
    Ne(f64),
    Between(f64, f64),
}

impl Clause {
    fn test(&self, value: f64) -> bool {
        match *self {
            Clause::Lt(t) => value < t,
            Clause::Le(t) => value <= t,
            Clause::Gt(t) => value > t,
            Clause::Ge(t) => value >= t,
            Clause::Ne(t) => value != t,
            Clause::Between(lo, hi) => value >= lo && value <= hi,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Lt(t) => write!(f, "< {}", t),
            Clause::Le(t) => write!(f, "<= {}", t),
            Clause::Gt(t) => write!(f, "> {}", t),
            Clause::Ge(t) => write!(f, ">= {}", t),
            Clause::Ne(t) => write!(f, "<> {}", t),
            Clause::Between(lo, hi) => write!(f, "= {} {}", lo, hi),
        }
    }
}

/// An OR over threshold clauses, e.g. `"< 0.1 | > 0.9"` or `"= 0.4 0.6"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    pub fn parse(expression: &str) -> Result<Self, ScenarioError> {
        let malformed = |reason: String| ScenarioError::MalformedCondition {
            expression: expression.to_string(),
            reason,
        };

        let mut clauses = Vec::new();
        for clause_str in expression.split('|') {
            let tokens: Vec<&str> = clause_str.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(malformed("empty clause".to_string()));
            }
            if tokens.len() != 2 && tokens.len() != 3 {
                return Err(malformed(format!(
                    "expected comparator and one or two thresholds, found {} tokens",
                    tokens.len()
                )));
            }

            let mut thresholds = Vec::with_capacity(2);
            for tok in &tokens[1..] {
                let value: f64 = tok
                    .parse()
                    .map_err(|_| malformed(format!("threshold '{}' is not a number", tok)))?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(malformed(format!("threshold {} outside [0, 1]", value)));
                }
                thresholds.push(value);
            }

            let clause = match (tokens[0], thresholds.as_slice()) {
                ("=", &[lo, hi]) => {
                    if lo > hi {
                        return Err(malformed(format!("range lower {} exceeds upper {}", lo, hi)));
                    }
                    Clause::Between(lo, hi)
                }
                ("=", _) => {
                    return Err(malformed("'=' requires a lower and an upper threshold".to_string()));
                }
                ("<" | "<=" | ">" | ">=" | "<>", &[t]) => match tokens[0] {
                    "<" => Clause::Lt(t),
                    "<=" => Clause::Le(t),
                    ">" => Clause::Gt(t),
                    ">=" => Clause::Ge(t),
                    _ => Clause::Ne(t),
                },
                ("<" | "<=" | ">" | ">=" | "<>", _) => {
                    return Err(malformed(format!("'{}' takes a single threshold", tokens[0])));
                }
                (other, _) => {
                    return Err(malformed(format!("unknown comparator '{}'", other)));
                }
            };
            clauses.push(clause);
        }

        Ok(Self { clauses })
    }

    /// True when any clause accepts `value`.
    pub fn test(&self, value: f64) -> bool {
        self.clauses.iter().any(|c| c.test(value))
    }
}

impl FromStr for Condition {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_normalized() {
        let c = Condition::parse("  <   0.10|>0.9 ").unwrap_err();
        assert!(matches!(c, ScenarioError::MalformedCondition { .. }));

        let c = Condition::parse("< 0.10 |  > 0.9").unwrap();
        assert_eq!(c.to_string(), "< 0.1 | > 0.9");
    }

    #[test]
    fn nan_only_passes_not_equal() {
        let lt = Condition::parse("< 0.5").unwrap();
        let ne = Condition::parse("<> 0").unwrap();
        assert!(!lt.test(f64::NAN));
        assert!(ne.test(f64::NAN));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(Condition::parse("= 0.6 0.4").is_err());
    }
}
