mod channel;
mod error;
mod mailbox;
mod queue;

pub use error::{RecvError, SendError};
pub use mailbox::Mailbox;
pub use queue::Queue;
