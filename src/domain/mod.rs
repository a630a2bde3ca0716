//! Value objects shared by the ledger services. None carry identity of
//! their own; the caller's persistence layer owns lifecycle and ids.

pub mod balance;
pub mod participant;
pub mod policy;
pub mod share;

pub use balance::{NetBalance, Transfer};
pub use participant::ParticipantId;
pub use policy::{PolicyKind, SplitPolicy};
pub use share::{Payment, Share};
