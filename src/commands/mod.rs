// ABOUTME: Command module aggregator for the eb CLI.
// ABOUTME: Re-exports call, list, and status command handlers.

mod call;
mod client;
mod list;
mod status;

pub use call::call;
pub use list::list;
pub use status::status;
