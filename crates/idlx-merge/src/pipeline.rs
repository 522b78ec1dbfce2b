//! End-to-end merge batch.

use crate::context::MergeContext;
use crate::decompose::{DecompositionStats, decompose_unions};
use crate::engine::{MergeStats, merge_libraries};
use crate::freeze::FrozenModel;
use crate::validate::validate;
use idlx_common::{MergeOptions, StructuralError, WarningLog};
use idlx_model::Model;
use tracing::{info, info_span};

/// Everything a successful batch produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub model: FrozenModel,
    pub warnings: WarningLog,
    pub merge: MergeStats,
    pub decomposition: DecompositionStats,
}

/// Validate, merge, decompose and freeze one `Model`.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: MergeOptions,
}

impl Pipeline {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Run the whole batch. On error the partially processed graph is dropped.
    pub fn run(&self, mut model: Model) -> Result<PipelineOutput, StructuralError> {
        let _span = info_span!("pipeline", libraries = model.libraries().len()).entered();
        let mut cx = MergeContext::new(self.options.clone());

        {
            let _span = info_span!("validate").entered();
            validate(&model, &cx.options)?;
        }
        let merge = {
            let _span = info_span!("merge").entered();
            merge_libraries(&mut model, &mut cx)?
        };
        {
            let _span = info_span!("validate_merged").entered();
            validate(&model, &cx.options)?;
        }
        let decomposition = {
            let _span = info_span!("decompose").entered();
            decompose_unions(&mut model, &mut cx)?
        };
        let model = {
            let _span = info_span!("freeze").entered();
            FrozenModel::freeze(model)?
        };

        info!(
            types = model.registered_len(),
            warnings = cx.warnings.len(),
            "pipeline finished"
        );
        Ok(PipelineOutput {
            model,
            warnings: cx.warnings,
            merge,
            decomposition,
        })
    }
}

#[cfg(test)]
#[path = "../tests/pipeline_tests.rs"]
mod tests;
