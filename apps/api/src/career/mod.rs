// Career Match: CV upload → job search → ranking → generated documents.
// Parsing, search and embedding sit behind traits so the stubs can be swapped
// for real backends without touching ranking or generation.

pub mod catalog;
pub mod documents;
pub mod embedder;
pub mod handlers;
pub mod ingest;
pub mod memory;
pub mod pipeline;
pub mod ranker;
pub mod templates;
