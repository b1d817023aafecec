// Split tile strip: the controller tying drag input, geometry and the menu
// to an essence snapshot, plus settings and the headless replay runner.

pub mod menu;
pub mod replay;
pub mod settings;
pub mod split_tile;
pub mod view;

pub use menu::{MenuController, MenuState};
pub use split_tile::SplitTile;
pub use view::{DragIndicatorView, MenuDirection, MenuView, TileStripView, TileView};

mod tests;
