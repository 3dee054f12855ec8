//! Auxiliary state of the interactive modes: menus, the combat action grid,
//! the inventory window and the dialog panel.

mod action_dialog;
mod menu;
mod panel;
mod selection;
mod window;

pub use action_dialog::{ACTION_LABELS, ActionDialog};
pub use menu::{Control, Menu, MenuKind};
pub use panel::DialogPanel;
pub use selection::Selection;
pub use window::{InventoryWindow, WindowKind};
