pub mod error;
pub mod flux;
pub mod flux_result_stream_ext;
pub mod flux_stream_ext;
pub mod verify;

// Re-export all items from the flux module at the crate root
pub use error::{StreamError, StreamResult};
pub use flux::*;
pub use flux_result_stream_ext::{FluxResultStreamExt, TryFlux};
pub use flux_stream_ext::FluxStreamExt;
pub use verify::{collect_flux, collect_outcome, StepVerifier};
