//! The openable/container state machine.
//!
//! Openable items move between closed and open. Opening or closing never
//! touches `contents`, only whether the resolver and renderer can see them.
//! Every transition either succeeds completely or leaves the state untouched.

use lt_core::{GameState, ItemId, ItemLocation};

use crate::error::CommandError;

/// Open an item. Returns the contents that became visible.
pub fn open(state: &mut GameState, id: &ItemId) -> Result<Vec<ItemId>, CommandError> {
    let item = state.item(id)?;
    if !item.openable {
        return Err(CommandError::NotOpenable(item.name.clone()));
    }
    if item.is_open() {
        return Err(CommandError::AlreadyOpen(item.name.clone()));
    }
    if item.is_locked() {
        return Err(CommandError::Locked(item.name.clone()));
    }
    let revealed = if item.container {
        item.state.contents.clone()
    } else {
        Vec::new()
    };
    state.set_open(id, true)?;
    Ok(revealed)
}

/// Close an item.
pub fn close(state: &mut GameState, id: &ItemId) -> Result<(), CommandError> {
    let item = state.item(id)?;
    if !item.openable {
        return Err(CommandError::NotClosable(item.name.clone()));
    }
    if !item.is_open() {
        return Err(CommandError::AlreadyClosed(item.name.clone()));
    }
    state.set_open(id, false)?;
    Ok(())
}

/// The contents of a container, if the player can see into it.
pub fn look_in(state: &GameState, id: &ItemId) -> Result<Vec<ItemId>, CommandError> {
    let item = state.item(id)?;
    if !item.container {
        return Err(CommandError::NoInside(item.name.clone()));
    }
    if !item.contents_accessible() {
        return Err(CommandError::Closed(item.name.clone()));
    }
    Ok(item.state.contents.clone())
}

/// Put `item` at the end of `container`'s contents.
///
/// The container must be open, must not be the item or inside it, and must
/// have room for the item's size. Items without a capacity accept anything.
pub fn put(
    state: &mut GameState,
    item_id: &ItemId,
    container_id: &ItemId,
) -> Result<(), CommandError> {
    let item = state.item(item_id)?;
    let container = state.item(container_id)?;

    if item_id == container_id || state.contains_recursively(item_id, container_id) {
        return Err(CommandError::IntoItself(item.name.clone()));
    }
    if !container.container {
        return Err(CommandError::NotContainer(container.name.clone()));
    }
    if !container.contents_accessible() {
        return Err(CommandError::Closed(container.name.clone()));
    }
    if !item.portable && !state.has_item(item_id) {
        return Err(CommandError::NotPortable(item.name.clone()));
    }
    if container.capacity.is_some_and(|capacity| item.size > capacity) {
        return Err(CommandError::WontFit {
            item: item.name.clone(),
            container: container.name.clone(),
        });
    }

    state.move_item(item_id, ItemLocation::Container(container_id.clone()))?;
    Ok(())
}

/// Unlock `target` with `key`. The key must be carried.
pub fn unlock(state: &mut GameState, target: &ItemId, key: &ItemId) -> Result<(), CommandError> {
    check_key(state, target, key)?;
    let item = state.item_mut(target)?;
    if !item.state.is_locked {
        return Err(CommandError::NotLocked(item.name.clone()));
    }
    item.state.is_locked = false;
    Ok(())
}

/// Lock `target` with `key`. The key must be carried and the target closed.
pub fn lock(state: &mut GameState, target: &ItemId, key: &ItemId) -> Result<(), CommandError> {
    check_key(state, target, key)?;
    let item = state.item_mut(target)?;
    if item.state.is_locked {
        return Err(CommandError::AlreadyLocked(item.name.clone()));
    }
    if item.is_open() {
        return Err(CommandError::MustClose(item.name.clone()));
    }
    item.state.is_locked = true;
    Ok(())
}

fn check_key(state: &GameState, target: &ItemId, key: &ItemId) -> Result<(), CommandError> {
    let lock = state.item(target)?;
    let key_item = state.item(key)?;
    if !lock.lockable {
        return Err(CommandError::NotLockable(lock.name.clone()));
    }
    if !state.has_item(key) {
        return Err(CommandError::NotCarried(key_item.name.clone()));
    }
    if lock.key_id.as_ref() != Some(key) {
        return Err(CommandError::WrongKey {
            key: key_item.name.clone(),
            target: lock.name.clone(),
        });
    }
    Ok(())
}
