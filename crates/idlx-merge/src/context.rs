use idlx_common::{MergeOptions, Warning, WarningLog};

/// Explicit state threaded through merge and decomposition.
///
/// Holds the run's options and the warnings accumulated so far; the `Model`
/// itself is passed alongside by `&mut`.
#[derive(Debug, Default)]
pub struct MergeContext {
    pub options: MergeOptions,
    pub warnings: WarningLog,
}

impl MergeContext {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            warnings: WarningLog::new(),
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
