//! Non-fatal findings collected during a merge run.
//!
//! A run either completes with a sound graph plus an accumulated warning log,
//! or aborts with a `StructuralError`. Warnings are data: generators and tests
//! inspect the log, and every push is mirrored to `tracing` so a run with
//! `IDLX_LOG=warn` shows them as they happen.

use std::fmt;
use tracing::warn;

/// Category of a non-fatal finding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// An operation has more than one union-typed parameter.
    AmbiguousUnion,
    /// Two declarations of one Type name disagree on kind; the canonical kind wins.
    KindMismatch,
    /// Two merged parameters had different Types; the result is `any`.
    ParameterWidened,
    /// A union-typed return type was replaced with `any`.
    UnionReturnWidened,
    /// A union parameter had no member types; the parameter became `any`.
    EmptyUnion,
    /// A merged Type received a second property with the same name.
    DuplicateProperty,
    /// A referenced Type name was never declared by any library.
    UnresolvedReference,
}

impl WarningKind {
    /// Stable numeric code, for log filtering and golden files.
    pub const fn code(self) -> u32 {
        match self {
            WarningKind::AmbiguousUnion => 1001,
            WarningKind::KindMismatch => 1002,
            WarningKind::ParameterWidened => 1003,
            WarningKind::UnionReturnWidened => 1004,
            WarningKind::EmptyUnion => 1005,
            WarningKind::DuplicateProperty => 1006,
            WarningKind::UnresolvedReference => 1007,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Canonical name of the Type the finding is about.
    pub type_name: String,
    /// Member (operation signature or property name), when the finding is about one.
    pub member: Option<String>,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            member: None,
            message: message.into(),
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}: {}", self.kind.code(), self.type_name)?;
        if let Some(member) = &self.member {
            write!(f, ".{member}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Ordered log of warnings produced by one run.
#[derive(Debug, Default, Clone)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and emit it through `tracing`.
    pub fn push(&mut self, warning: Warning) {
        warn!(
            code = warning.kind.code(),
            kind = ?warning.kind,
            type_name = %warning.type_name,
            member = warning.member.as_deref().unwrap_or(""),
            "{}",
            warning.message
        );
        self.warnings.push(warning);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    /// Warnings of one kind, in the order they were recorded.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
