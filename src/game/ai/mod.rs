//! Move decision: opening book, search and the worker that drives them

mod opening_book;
mod random;
mod supplier;
mod worker;

pub use opening_book::{advantage, select_candidate, OpeningBookPolicy, MIN_ADVANTAGE, MIN_GAMES};
pub use random::RandomMoveSupplier;
pub use supplier::{BookThenSearch, MoveSupplier, SupplierPhase};
pub(crate) use worker::DecisionWorker;
