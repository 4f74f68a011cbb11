//! ConnSpec - Connection rule and its degree parameters.
//!
//! A [`ConnSpec`] selects which source/target pairs become synapses. It holds
//! one [`ConnRule`] plus three count fields; the rule decides which of them is
//! active:
//!
//! | Rule | Active field | Connections |
//! |---|---|---|
//! | `one_to_one` | none | `n` (sizes must match) |
//! | `all_to_all` | none | `n_source * n_target` |
//! | `fixed_total_number` | `total_num` | `total_num` |
//! | `fixed_indegree` | `indegree` | `indegree * n_target` |
//! | `fixed_outdegree` | `outdegree` | `outdegree * n_source` |
//!
//! Inactive fields can still be set and read; generation ignores them.
//!
//! # Examples
//!
//! ```
//! use connspec::{ConnRule, ConnSpec};
//!
//! let mut spec = ConnSpec::new();
//! assert_eq!(spec.rule(), ConnRule::AllToAll);
//!
//! spec.set_param("rule", ConnRule::FixedIndegree as i64).unwrap();
//! spec.set_param("indegree", 10).unwrap();
//! assert_eq!(spec.get_param("indegree").unwrap(), 10);
//! assert_eq!(spec.connection_count(100, 20).unwrap(), 200);
//!
//! assert!(spec.set_param("degree", 10).is_err());
//! ```

use crate::params::{non_negative, ParamKind, ParamTable};
use crate::{ConnSpecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of connection rules.
pub const N_CONN_RULE: usize = 5;

/// Rule names, indexed by `ConnRule as usize`.
pub const CONN_RULE_NAMES: [&str; N_CONN_RULE] = [
    "one_to_one",
    "all_to_all",
    "fixed_total_number",
    "fixed_indegree",
    "fixed_outdegree",
];

/// Connection-generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnRule {
    /// Source `i` connects to target `i`
    OneToOne = 0,
    /// Every source connects to every target
    AllToAll = 1,
    /// A fixed number of pairs sampled from the Cartesian product
    FixedTotalNumber = 2,
    /// Each target receives a fixed number of inputs
    FixedIndegree = 3,
    /// Each source sends a fixed number of outputs
    FixedOutdegree = 4,
}

impl ConnRule {
    /// All rules in discriminant order.
    pub const ALL: [ConnRule; N_CONN_RULE] = [
        ConnRule::OneToOne,
        ConnRule::AllToAll,
        ConnRule::FixedTotalNumber,
        ConnRule::FixedIndegree,
        ConnRule::FixedOutdegree,
    ];

    /// Canonical name from [`CONN_RULE_NAMES`].
    #[inline]
    pub fn name(self) -> &'static str {
        CONN_RULE_NAMES[self as usize]
    }

    /// Look up a rule by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        CONN_RULE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
    }

    /// Whether this rule reads a degree/count field.
    #[inline]
    pub fn uses_degree(self) -> bool {
        !matches!(self, ConnRule::OneToOne | ConnRule::AllToAll)
    }
}

impl TryFrom<i64> for ConnRule {
    type Error = ConnSpecError;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                ConnSpecError::InvalidArgument(format!(
                    "connection rule {} outside [0, {})",
                    value, N_CONN_RULE
                ))
            })
    }
}

impl FromStr for ConnRule {
    type Err = ConnSpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| ConnSpecError::InvalidArgument(format!("unknown connection rule '{}'", s)))
    }
}

impl fmt::Display for ConnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ConnParam {
    Rule,
    TotalNum,
    Indegree,
    Outdegree,
}

static CONN_PARAMS: ParamTable<ConnParam> = ParamTable::new(
    "connection spec",
    &[
        ("rule", ParamKind::Int, ConnParam::Rule),
        ("total_num", ParamKind::Int, ConnParam::TotalNum),
        ("indegree", ParamKind::Int, ConnParam::Indegree),
        ("outdegree", ParamKind::Int, ConnParam::Outdegree),
    ],
);

/// Connection rule with its degree/count parameters.
///
/// A plain value type: configure it once, then hand it to
/// [`ConnectionGenerator::connect`](crate::ConnectionGenerator::connect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnSpec {
    rule: ConnRule,
    total_num: usize,
    indegree: usize,
    outdegree: usize,
}

impl Default for ConnSpec {
    fn default() -> Self {
        Self {
            rule: ConnRule::AllToAll,
            total_num: 0,
            indegree: 0,
            outdegree: 0,
        }
    }
}

impl ConnSpec {
    /// Create the default spec (`all_to_all`, all counts 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spec for `rule`, assigning `degree` to the field it implies.
    ///
    /// # Examples
    ///
    /// ```
    /// use connspec::{ConnRule, ConnSpec};
    ///
    /// let spec = ConnSpec::with_rule(ConnRule::FixedOutdegree, 5);
    /// assert_eq!(spec.outdegree(), 5);
    /// assert_eq!(spec.active_degree(), Some(5));
    /// ```
    pub fn with_rule(rule: ConnRule, degree: usize) -> Self {
        let mut spec = Self::default();
        spec.assign(rule, degree);
        spec
    }

    /// Reset to the default spec.
    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Set `rule` from its integer code and assign `degree` to its active
    /// field. Other count fields keep their values.
    pub fn init_with(&mut self, rule: i64, degree: i64) -> Result<()> {
        let rule = CONN_PARAMS.report("rule", ConnRule::try_from(rule))?;
        let degree = CONN_PARAMS.report("degree", non_negative("degree", degree))?;
        self.assign(rule, degree);
        Ok(())
    }

    fn assign(&mut self, rule: ConnRule, degree: usize) {
        self.rule = rule;
        match rule {
            ConnRule::OneToOne | ConnRule::AllToAll => {}
            ConnRule::FixedTotalNumber => self.total_num = degree,
            ConnRule::FixedIndegree => self.indegree = degree,
            ConnRule::FixedOutdegree => self.outdegree = degree,
        }
    }

    /// Set a named integer parameter.
    ///
    /// Recognized names: `rule`, `total_num`, `indegree`, `outdegree`.
    pub fn set_param(&mut self, name: &str, value: i64) -> Result<()> {
        let applied = CONN_PARAMS
            .lookup(name, ParamKind::Int)
            .and_then(|slot| self.apply(slot, name, value));
        CONN_PARAMS.report(name, applied)?;
        tracing::trace!(name, value, "connection spec parameter set");
        Ok(())
    }

    fn apply(&mut self, slot: ConnParam, name: &str, value: i64) -> Result<()> {
        match slot {
            ConnParam::Rule => self.rule = ConnRule::try_from(value)?,
            ConnParam::TotalNum => self.total_num = non_negative(name, value)?,
            ConnParam::Indegree => self.indegree = non_negative(name, value)?,
            ConnParam::Outdegree => self.outdegree = non_negative(name, value)?,
        }
        Ok(())
    }

    /// Read a named integer parameter.
    ///
    /// Inactive count fields return their stored value, not an error.
    pub fn get_param(&self, name: &str) -> Result<i64> {
        let value = CONN_PARAMS.lookup(name, ParamKind::Int).and_then(|slot| {
            let count = match slot {
                ConnParam::Rule => return Ok(self.rule as i64),
                ConnParam::TotalNum => self.total_num,
                ConnParam::Indegree => self.indegree,
                ConnParam::Outdegree => self.outdegree,
            };
            i64::try_from(count).map_err(|_| {
                ConnSpecError::InvalidArgument(format!("{} does not fit in i64", name))
            })
        });
        CONN_PARAMS.report(name, value)
    }

    /// Set the rule by its canonical name.
    pub fn set_rule_by_name(&mut self, name: &str) -> Result<()> {
        self.rule = CONN_PARAMS.report("rule", name.parse())?;
        Ok(())
    }

    /// Current rule.
    #[inline]
    pub fn rule(&self) -> ConnRule {
        self.rule
    }

    /// Stored total number (active for `fixed_total_number`).
    #[inline]
    pub fn total_num(&self) -> usize {
        self.total_num
    }

    /// Stored indegree (active for `fixed_indegree`).
    #[inline]
    pub fn indegree(&self) -> usize {
        self.indegree
    }

    /// Stored outdegree (active for `fixed_outdegree`).
    #[inline]
    pub fn outdegree(&self) -> usize {
        self.outdegree
    }

    /// The count field the current rule reads, if any.
    pub fn active_degree(&self) -> Option<usize> {
        match self.rule {
            ConnRule::OneToOne | ConnRule::AllToAll => None,
            ConnRule::FixedTotalNumber => Some(self.total_num),
            ConnRule::FixedIndegree => Some(self.indegree),
            ConnRule::FixedOutdegree => Some(self.outdegree),
        }
    }

    /// Exact number of connections this rule produces for the given
    /// population sizes.
    ///
    /// Sampled rules draw without replacement, so a degree larger than the
    /// pool it samples from is rejected.
    pub fn connection_count(&self, n_source: usize, n_target: usize) -> Result<usize> {
        let overflow = || {
            ConnSpecError::InvalidArgument(format!(
                "connection count overflows for {} x {}",
                n_source, n_target
            ))
        };
        let too_large = |what: &str, degree: usize, pool: usize| {
            ConnSpecError::InvalidArgument(format!(
                "{} {} exceeds the {} candidates available",
                what, degree, pool
            ))
        };

        match self.rule {
            ConnRule::OneToOne => {
                if n_source != n_target {
                    return Err(ConnSpecError::PopulationSizeMismatch { n_source, n_target });
                }
                Ok(n_source)
            }
            ConnRule::AllToAll => n_source.checked_mul(n_target).ok_or_else(overflow),
            ConnRule::FixedTotalNumber => {
                let pool = n_source.checked_mul(n_target).ok_or_else(overflow)?;
                if self.total_num > pool {
                    return Err(too_large("total_num", self.total_num, pool));
                }
                Ok(self.total_num)
            }
            ConnRule::FixedIndegree => {
                if self.indegree > n_source {
                    return Err(too_large("indegree", self.indegree, n_source));
                }
                self.indegree.checked_mul(n_target).ok_or_else(overflow)
            }
            ConnRule::FixedOutdegree => {
                if self.outdegree > n_target {
                    return Err(too_large("outdegree", self.outdegree, n_target));
                }
                self.outdegree.checked_mul(n_source).ok_or_else(overflow)
            }
        }
    }
}
