//! Export pipeline errors

/// Errors raised while assembling an exportable scene
///
/// None of these are retried: every stage is deterministic, so a failure
/// means the input or the request has to change.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The parent links contain a cycle
    #[error("Cycle in model hierarchy involving '{model}'")]
    Cycle {
        /// A model that lies on the cycle
        model: String,
    },

    /// A model names itself as its parent
    #[error("Model '{model}' is its own parent")]
    SelfParent {
        /// Offending model
        model: String,
    },

    /// A parent index points outside the model list
    #[error("Model '{model}' references missing parent index {parent}")]
    InvalidParent {
        /// Offending model
        model: String,
        /// The out-of-range parent index
        parent: usize,
    },

    /// Two models share the same name
    #[error("Duplicate model name '{0}'")]
    DuplicateModelName(String),

    /// Animation export was requested but no armature was gathered
    #[error("Export Error: Could not find an armature object from which to export an animation!")]
    MissingArmature,

    /// The animation source found nothing to export
    #[error("No animation curves found for root joint '{0}'")]
    NoAnimationCurves(String),

    /// The host scene source failed
    #[error("Gather error: {0}")]
    Gather(String),
}
