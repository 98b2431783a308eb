//! Domain models shared across the client.

mod block;
mod preference;
mod user;

pub use block::Block;
pub use preference::BlockPreference;
pub use user::UserRecord;
