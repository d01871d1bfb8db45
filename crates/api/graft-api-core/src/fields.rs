//! Generic reference-field introspection.
//!
//! Every payload type exposes its object-reference slots through
//! [`References::visit_references`]. The visitor sees each slot exactly once,
//! with a [`FieldPath`] naming it (`controls[1].sub_menu`) and the kind the slot
//! accepts when the data model knows it. Slots that currently hold no
//! reference are visited too. Referenced assets are never followed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::ids::AssetId;
use crate::kind::AssetKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSegment {
    Name(String),
    Index(usize),
}

/// Address of a slot inside one asset's data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<FieldSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(FieldSegment::Name(name.to_string()));
        next
    }

    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(FieldSegment::Index(index));
        next
    }

    pub fn segments(&self) -> &[FieldSegment] {
        &self.segments
    }

    /// Name of the last named segment (`controls[1].sub_menu` -> `sub_menu`).
    pub fn leaf_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            FieldSegment::Name(n) => Some(n.as_str()),
            FieldSegment::Index(_) => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            match seg {
                FieldSegment::Name(n) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(n)?;
                }
                FieldSegment::Index(i) => write!(f, "[{i}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

/// One enumerated reference slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceField {
    pub path: FieldPath,
    pub target: Option<AssetId>,
    /// Kind the slot is declared to hold, when the data model knows it.
    pub accepts: Option<AssetKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no reference field at '{0}'")]
    NotFound(String),
}

/// Visitor callback: slot address, the slot itself, the kind it accepts.
pub type Visit<'a> = dyn FnMut(&FieldPath, &mut Option<AssetId>, Option<AssetKind>) + 'a;

pub trait References {
    /// Visit every reference slot reachable from `self` without following
    /// references. `at` is the path of `self` inside its owning asset.
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>);
}

/// Visit a slot that cannot be empty. Clearing it through the visitor is
/// ignored; the previous target stays.
pub fn visit_required(
    id: &mut AssetId,
    path: &FieldPath,
    accepts: Option<AssetKind>,
    visit: &mut Visit<'_>,
) {
    let mut slot = Some(*id);
    visit(path, &mut slot, accepts);
    if let Some(next) = slot {
        *id = next;
    }
}

/// Collect all reference slots of `value` into a list.
pub fn reference_fields<T: References + Clone>(value: &T) -> Vec<ReferenceField> {
    // Walk a scratch copy: the visitor contract is mutable, the caller's data is not.
    let mut scratch = value.clone();
    let mut out = Vec::new();
    scratch.visit_references(&FieldPath::root(), &mut |path, slot, accepts| {
        out.push(ReferenceField {
            path: path.clone(),
            target: *slot,
            accepts,
        });
    });
    out
}

/// Point the slot at `field` to `target`.
pub fn set_reference<T: References>(
    value: &mut T,
    field: &FieldPath,
    target: Option<AssetId>,
) -> Result<(), FieldError> {
    let mut found = false;
    value.visit_references(&FieldPath::root(), &mut |path, slot, _| {
        if !found && path == field {
            *slot = target;
            found = true;
        }
    });
    if found {
        Ok(())
    } else {
        Err(FieldError::NotFound(field.to_string()))
    }
}
