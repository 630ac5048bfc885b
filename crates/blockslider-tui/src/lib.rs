pub mod app;
pub mod content;
pub mod deck;
pub mod event;
pub mod images;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use deck::Deck;
pub use theme::Theme;
