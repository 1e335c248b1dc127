pub mod documents;
pub mod extract;
pub mod upstream;

pub use documents::UploadedPdf;
pub use extract::{ExtractRequest, SchemaPayload};
pub use upstream::UpstreamJson;
