//! Game session
//!
//! A session plays one game through three workers:
//! - `stream` - applies service events to the board and raises the turn signal
//! - `decision` - turns each raised signal into a move
//! - `dispatch` - submits the move and clears the signal
//!
//! [`Coordinator`] owns them and the state they share.

pub mod ai;
mod coordinator;
mod dispatcher;
mod signal;
mod slot;
mod stream;

pub use coordinator::Coordinator;
pub use dispatcher::MoveDispatcher;
pub use signal::TurnSignal;
pub use slot::{PendingMove, PendingMoveSlot};
pub use stream::StateStreamConsumer;
