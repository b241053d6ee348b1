//! Доменная модель турнира: карты, колода, игроки, столы, блайнды, конфиг.

pub mod blinds;
pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;
pub mod tournament;

pub type PlayerId = u64;
pub type TableId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use blinds::*;
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
pub use tournament::*;
