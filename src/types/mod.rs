// ABOUTME: Domain newtypes shared across the API layer and commands.
// ABOUTME: Currently the attempt ordinal used by the retrying invoker.

mod attempt;

pub use attempt::Attempt;
