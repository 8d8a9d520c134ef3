//! Template loading and game setup
//!
//! Templates arrive as already-validated JSON (or the built-in starter set)

pub mod game_init;
pub mod starter;
pub mod templates;

pub use game_init::GameInitializer;
pub use starter::{starter_deck, starter_library};
pub use templates::{CardTemplate, DeckList, HeroTemplate, TemplateLibrary};
