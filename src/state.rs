// src/state.rs

//! Navigation state of a running menu system.

/// A pending jump back to a menu that is already open further up the stack.
///
/// Set when a nested action starts a running menu; every menu between the
/// innermost one and the target closes without prompting again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropDown {
    /// Menus are still closing on the way to the target.
    pub active: bool,
    /// Id of the menu the drop-down lands on.
    pub target_id: i64,
    /// Set until the target makes its first closing decision, which then
    /// prints a partial bracket.
    pub is_last_exit: bool,
}

/// Navigation state shared by all nested `start` calls of one menu system.
#[derive(Debug, Default)]
pub struct Navigation {
    drop_down: DropDown,
    kill_switch: bool,
}

impl Navigation {
    /// Records a drop-down towards `target_id`.
    pub fn request_drop_down(&mut self, target_id: i64) {
        self.drop_down = DropDown {
            active: true,
            target_id,
            is_last_exit: true,
        };
    }

    /// Asks whether the menu `menu_id` must close because of a drop-down.
    ///
    /// Reaching the target ends the drop-down and returns `false`.
    pub fn dropping_down(&mut self, menu_id: i64) -> bool {
        if !self.drop_down.active {
            return false;
        }
        if self.drop_down.target_id != menu_id {
            return true;
        }
        self.drop_down.active = false;
        false
    }

    /// Consumes the last-exit marker left by a finished drop-down.
    pub fn take_last_exit(&mut self) -> bool {
        std::mem::take(&mut self.drop_down.is_last_exit)
    }

    /// Forgets any drop-down aimed at `menu_id`, marker included.
    ///
    /// Called when that menu closes, since a target that unwinds on its own
    /// never gets to consume the record.
    pub fn settle(&mut self, menu_id: i64) {
        if self.drop_down.target_id == menu_id {
            self.drop_down = DropDown::default();
        }
    }

    /// The current drop-down record.
    pub fn drop_down(&self) -> DropDown {
        self.drop_down
    }

    /// True once the kill phrase was entered.
    pub fn kill_switch(&self) -> bool {
        self.kill_switch
    }

    /// Sets or clears the kill switch.
    pub fn set_kill_switch(&mut self, value: bool) {
        self.kill_switch = value;
    }
}
