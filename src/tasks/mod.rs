pub mod demo_seed;
pub mod library_seed;

pub use demo_seed::{run_demo_seed, DemoSummary};
pub use library_seed::{run_library_seed, LibrarySummary};
