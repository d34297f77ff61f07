//! Application services: the stages of the command flow.
//!
//! `validator` → `selector` → `scheduler`, driven per connection by `session`.

pub mod scheduler;
pub mod selector;
pub mod session;
pub mod validator;
