//! Collaborator trait abstractions.
//!
//! The pipeline talks to persistence, messaging, and the language model
//! only through these seams; concrete technology lives behind them.

pub mod llm;
pub mod messenger;
pub mod store;

pub use llm::LanguageModel;
pub use messenger::Messenger;
pub use store::JobStore;
