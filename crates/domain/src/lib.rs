//! Mărțișor domain: the vocabulary of the invitation player.
//!
//! - Sequence tokens used to cancel playback cooperatively
//! - Thread lifecycle and the per-session playback book
//! - Steps and the scripts for each thread
//! - Chat descriptors, chat-list generation and the scripted copy
//!
//! Pure code only: no I/O, no timers, and randomness is injected by callers.

pub mod chat;
pub mod chat_list;
pub mod content;
pub mod error;
pub mod script;
pub mod sequence;
pub mod shuffle;
pub mod step;
pub mod thread;

pub use chat::{format_display_name, special_chat, ChatDescriptor, ChatId};
pub use chat_list::{generic_reply, ChatListGenerator, IntroEntry, INTRO_PLAN};
pub use content::AssetSlot;
pub use error::DomainError;
pub use script::{script_for, ScriptAssets};
pub use sequence::{SequenceRegistry, SequenceToken};
pub use shuffle::{shuffle, ShuffledCycle};
pub use step::{DelayRange, Direction, EmbedMessage, PhotoMessage, Script, Step, TextMessage};
pub use thread::{PlaybackBook, ThreadKind, ThreadPhase};
