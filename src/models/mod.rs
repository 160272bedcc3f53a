pub mod alert;
pub mod message;

pub use alert::{AlertKind, EntryAlert, EodAlert, FieldError, StopLossAlert, TakeProfitAlert};
pub use message::{Embed, EmbedField, EmbedFooter, OutboundMessage};
