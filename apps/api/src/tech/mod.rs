// Technology registry, tech stack validation, correction and suggestions.
// Everything here is synchronous and pure except `store`, which loads and
// persists registry snapshots.

pub mod defaults;
pub mod handlers;
pub mod registry;
pub mod stack;
pub mod store;
pub mod suggestions;
pub mod validator;
