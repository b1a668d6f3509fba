//! Paginated movie search and numbered selection.

mod selection;
mod session;

pub use selection::{
    interpret_quality_input, interpret_release_input, validate_index, QualityChoice,
    ReleaseChoice, ValidationError,
};
pub use session::{PageOutcome, SearchSession};
