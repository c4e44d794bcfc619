pub mod cli;
pub mod ctx;
pub mod io;
pub mod pipeline;
pub mod ruleset;
pub mod scenario;
pub mod schema;
pub mod variants;
