use strum::Display;

use crate::state::ItemKind;

use super::{Menu, Selection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum WindowKind {
    /// Opened from free movement.
    Inventory,
    /// Opened from the action dialog.
    FightInventory,
}

/// Horizontal list of the player's items, with an optional context menu on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryWindow {
    kind: WindowKind,
    selection: Selection,
    context: Option<Menu>,
}

impl InventoryWindow {
    pub fn new(kind: WindowKind, items: usize) -> Self {
        Self {
            kind,
            selection: Selection::new(items),
            context: None,
        }
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// 0-based inventory index of the selected item.
    pub fn selected_item(&self) -> Option<usize> {
        self.selection.index()
    }

    pub fn context(&self) -> Option<&Menu> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut Menu> {
        self.context.as_mut()
    }

    pub fn left(&mut self) -> bool {
        self.selection.previous()
    }

    pub fn right(&mut self) -> bool {
        self.selection.next()
    }

    pub fn open_context(&mut self, item: ItemKind) {
        self.context = Some(Menu::context(item));
    }

    pub fn close_context(&mut self) {
        self.context = None;
    }

    /// Re-clamps the cursor after the inventory changed size.
    pub fn sync(&mut self, items: usize) {
        self.selection.resize(items);
    }
}
