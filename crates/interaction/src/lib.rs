//! # Interaction - slash command wire model
//!
//! Serde types shared by the command engine and its host: the schema sent
//! to the platform when commands are registered, and the interaction
//! payloads the platform delivers when a user invokes or types into a
//! command.
//!
//! ## Example
//!
//! ```rust
//! use interaction::Interaction;
//! use interaction::InteractionKind;
//!
//! let raw = r#"{"id":"1","type":2,"data":{"name":"echo","options":[{"name":"msg","type":3,"value":"hello"}]}}"#;
//! let interaction = Interaction::parse(raw).unwrap();
//! assert_eq!(interaction.kind, InteractionKind::ApplicationCommand);
//! assert_eq!(interaction.data.name, "echo");
//! ```

mod error;
mod payload;
mod response;
mod schema;
mod types;

pub use error::InteractionError;
pub use payload::CommandData;
pub use payload::CommandOption;
pub use payload::Focused;
pub use payload::Interaction;
pub use payload::InteractionKind;
pub use payload::User;
pub use response::AutocompleteResponse;
pub use response::MAX_CHOICES;
pub use schema::CommandSchema;
pub use schema::OptionSchema;
pub use types::Choice;
pub use types::ChoiceValue;
pub use types::Id;
pub use types::Localizations;
pub use types::OptionType;
