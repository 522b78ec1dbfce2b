//! Operation signatures.
//!
//! A signature is the overload-table key: `name(T1,T2)` with each parameter's
//! Type name (`void` for an absent Type), or the bare `(main)` for the entry
//! point.

use crate::members::{MAIN_OPERATION, Operation, OperationId};
use crate::model::Model;
use std::fmt::Write;

impl Model {
    pub fn signature(&self, op: OperationId) -> String {
        self.signature_of(self.operation(op))
    }

    pub fn signature_of(&self, op: &Operation) -> String {
        if op.is_main() {
            return MAIN_OPERATION.to_string();
        }
        let mut sig = String::with_capacity(op.name.len() + 2 + op.parameters.len() * 8);
        sig.push_str(&op.name);
        sig.push('(');
        for (i, param) in op.parameters.iter().enumerate() {
            if i > 0 {
                sig.push(',');
            }
            sig.push_str(self.type_name(param.ty));
        }
        sig.push(')');
        sig
    }

    /// Short human-readable form: `name()`, `name(T)` or `name(…)`.
    pub fn display_operation(&self, op: OperationId) -> String {
        let op = self.operation(op);
        if op.is_main() {
            return MAIN_OPERATION.to_string();
        }
        let mut out = String::new();
        let _ = match op.parameters.len() {
            0 => write!(out, "{}()", op.name),
            1 => match op.parameters[0].ty {
                Some(ty) => write!(out, "{}({})", op.name, self.ty(ty).name),
                None => write!(out, "{}(?)", op.name),
            },
            _ => write!(out, "{}(\u{2026})", op.name),
        };
        out
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
