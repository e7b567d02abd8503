//! Mutation families and the operator catalog
//!
//! A family names one class of mutable operator: the node kind it scans, the
//! source operators it accepts, and for each source an ordered set of legal
//! replacements. Several families may scan the same node kind.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::error::{MutationError, Result};
use crate::operators::{NodeKind, OperatorKind};

use OperatorKind::*;

/// One named class of operator mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFamily {
    name: String,
    description: String,
    kind: NodeKind,
    rules: BTreeMap<OperatorKind, Vec<OperatorKind>>,
}

impl MutationFamily {
    /// Build and validate a family.
    ///
    /// Fails when the family scans no operator, when a source operator has no
    /// replacement or lists itself, or when any operator belongs to a node kind
    /// other than `kind`.
    pub fn new(
        name: &str,
        description: &str,
        kind: NodeKind,
        rules: &[(OperatorKind, &[OperatorKind])],
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(MutationError::InvalidFamily {
                family: name.to_string(),
                reason: "family name is empty".to_string(),
            });
        }
        if rules.is_empty() {
            return Err(MutationError::InvalidFamily {
                family: name.to_string(),
                reason: "family has no source operators".to_string(),
            });
        }

        let mut map = BTreeMap::new();
        for (source, candidates) in rules {
            check_kind(name, kind, *source)?;
            if candidates.is_empty() {
                return Err(MutationError::EmptyRuleMapEntry {
                    family: name.to_string(),
                    operator: *source,
                });
            }
            let mut seen = Vec::with_capacity(candidates.len());
            for candidate in candidates.iter() {
                if candidate == source {
                    return Err(MutationError::IdentityRule {
                        family: name.to_string(),
                        operator: *source,
                    });
                }
                check_kind(name, kind, *candidate)?;
                if !seen.contains(candidate) {
                    seen.push(*candidate);
                }
            }
            if map.insert(*source, seen).is_some() {
                return Err(MutationError::InvalidFamily {
                    family: name.to_string(),
                    reason: format!("operator '{}' has more than one rule", source),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            rules: map,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The node kind whose occurrences are numbered for this family
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether a node of `kind` carrying `op` is a candidate for this family
    pub fn matches(&self, kind: NodeKind, op: Option<OperatorKind>) -> bool {
        kind == self.kind && op.is_some_and(|op| self.rules.contains_key(&op))
    }

    /// Ordered replacement candidates for `op`, empty if the family ignores it
    pub fn replacements(&self, op: OperatorKind) -> &[OperatorKind] {
        self.rules.get(&op).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source operators and their candidate sets, in operator order
    pub fn rules(&self) -> impl Iterator<Item = (OperatorKind, &[OperatorKind])> {
        self.rules.iter().map(|(op, set)| (*op, set.as_slice()))
    }
}

fn check_kind(family: &str, expected: NodeKind, op: OperatorKind) -> Result<()> {
    let found = op.node_kind();
    if found != expected {
        return Err(MutationError::KindMismatch {
            family: family.to_string(),
            operator: op,
            expected,
            found,
        });
    }
    Ok(())
}

/// Fixed, enumerable list of mutation families
#[derive(Debug, Clone)]
pub struct OperatorCatalog {
    families: Vec<Arc<MutationFamily>>,
}

const ADD_RULE: (OperatorKind, &[OperatorKind]) = (Add, &[Mul, Sub, Div]);
const SUB_RULE: (OperatorKind, &[OperatorKind]) = (Sub, &[Add, Mul, Div]);
const MUL_RULE: (OperatorKind, &[OperatorKind]) = (Mul, &[Div, Add, Rem]);
const DIV_RULE: (OperatorKind, &[OperatorKind]) = (Div, &[Rem, Mul, Add]);
const REM_RULE: (OperatorKind, &[OperatorKind]) = (Rem, &[Div]);

const LT_RULE: (OperatorKind, &[OperatorKind]) = (Lt, &[Le, Gt, Ge]);
const LE_RULE: (OperatorKind, &[OperatorKind]) = (Le, &[Lt, Gt, Ge]);
const GT_RULE: (OperatorKind, &[OperatorKind]) = (Gt, &[Ge, Le, Lt]);
const GE_RULE: (OperatorKind, &[OperatorKind]) = (Ge, &[Le, Gt, Lt]);
const EQ_RULE: (OperatorKind, &[OperatorKind]) = (Eq, &[Ne]);
const NE_RULE: (OperatorKind, &[OperatorKind]) = (Ne, &[Eq]);

const AND_RULE: (OperatorKind, &[OperatorKind]) = (And, &[Or]);
const OR_RULE: (OperatorKind, &[OperatorKind]) = (Or, &[And]);

const ADD_ASSIGN_RULE: (OperatorKind, &[OperatorKind]) =
    (AddAssign, &[SubAssign, MulAssign, DivAssign]);
const SUB_ASSIGN_RULE: (OperatorKind, &[OperatorKind]) =
    (SubAssign, &[AddAssign, MulAssign, DivAssign]);
const MUL_ASSIGN_RULE: (OperatorKind, &[OperatorKind]) =
    (MulAssign, &[DivAssign, AddAssign, RemAssign]);
const DIV_ASSIGN_RULE: (OperatorKind, &[OperatorKind]) =
    (DivAssign, &[RemAssign, MulAssign, AddAssign]);
const REM_ASSIGN_RULE: (OperatorKind, &[OperatorKind]) = (RemAssign, &[DivAssign]);

impl OperatorCatalog {
    /// Build a catalog, rejecting duplicate family names
    pub fn new(families: Vec<MutationFamily>) -> Result<Self> {
        let mut names = HashSet::new();
        for family in &families {
            if !names.insert(family.name().to_string()) {
                return Err(MutationError::DuplicateFamily {
                    family: family.name().to_string(),
                });
            }
        }
        Ok(Self {
            families: families.into_iter().map(Arc::new).collect(),
        })
    }

    /// The built-in operator families
    pub fn standard() -> Result<Self> {
        use NodeKind::*;

        let families = vec![
            MutationFamily::new(
                "arithmetic",
                "Replace any arithmetic operator with another",
                BinaryOperation,
                &[ADD_RULE, SUB_RULE, MUL_RULE, DIV_RULE, REM_RULE],
            )?,
            MutationFamily::new("add", "Replace `+` with `*`, `-` or `/`", BinaryOperation, &[ADD_RULE])?,
            MutationFamily::new("sub", "Replace `-` with `+`, `*` or `/`", BinaryOperation, &[SUB_RULE])?,
            MutationFamily::new("mul", "Replace `*` with `/`, `+` or `%`", BinaryOperation, &[MUL_RULE])?,
            MutationFamily::new("div", "Replace `/` with `%`, `*` or `+`", BinaryOperation, &[DIV_RULE])?,
            MutationFamily::new("rem", "Replace `%` with `/`", BinaryOperation, &[REM_RULE])?,
            MutationFamily::new(
                "comparison",
                "Replace any relational operator with another",
                Comparison,
                &[LT_RULE, LE_RULE, GT_RULE, GE_RULE, EQ_RULE, NE_RULE],
            )?,
            MutationFamily::new("lt", "Replace `<` with `<=`, `>` or `>=`", Comparison, &[LT_RULE])?,
            MutationFamily::new("le", "Replace `<=` with `<`, `>` or `>=`", Comparison, &[LE_RULE])?,
            MutationFamily::new("gt", "Replace `>` with `>=`, `<=` or `<`", Comparison, &[GT_RULE])?,
            MutationFamily::new("ge", "Replace `>=` with `<=`, `>` or `<`", Comparison, &[GE_RULE])?,
            MutationFamily::new("eq", "Replace `==` with `!=`", Comparison, &[EQ_RULE])?,
            MutationFamily::new("ne", "Replace `!=` with `==`", Comparison, &[NE_RULE])?,
            MutationFamily::new(
                "logical",
                "Swap `&&` and `||`",
                LogicalOperation,
                &[AND_RULE, OR_RULE],
            )?,
            MutationFamily::new(
                "compound-assign",
                "Replace an arithmetic assignment operator with another",
                CompoundAssignment,
                &[
                    ADD_ASSIGN_RULE,
                    SUB_ASSIGN_RULE,
                    MUL_ASSIGN_RULE,
                    DIV_ASSIGN_RULE,
                    REM_ASSIGN_RULE,
                ],
            )?,
        ];

        Self::new(families)
    }

    /// All families in catalog order
    pub fn families(&self) -> &[Arc<MutationFamily>] {
        &self.families
    }

    /// Look a family up by name
    pub fn get(&self, name: &str) -> Result<Arc<MutationFamily>> {
        self.families
            .iter()
            .find(|f| f.name() == name)
            .cloned()
            .ok_or_else(|| MutationError::UnknownFamily {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.families.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
