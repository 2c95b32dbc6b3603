//! Favorites commands.
//!
//! The store swallows persistence failures, so each mutation re-checks
//! membership afterwards and reports a warning when the change did not stick.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::favorites::{FavoritesBackend, FavoritesStore};
use crate::loader::QuoteLibrary;
use crate::model::Quote;

const NOT_SAVED: &str = "Favorites could not be saved";

pub fn list<B: FavoritesBackend>(store: &FavoritesStore<B>) -> Result<CmdResult> {
    let favorites = store.get_all();
    let mut result = CmdResult::default();
    if favorites.is_empty() {
        result.add_message(CmdMessage::info("No favorites yet"));
    }
    Ok(result.with_listed_quotes(favorites))
}

pub fn add<B: FavoritesBackend>(
    library: &QuoteLibrary,
    store: &FavoritesStore<B>,
    id: u32,
) -> Result<CmdResult> {
    let quote = library.require(id)?;
    let mut result = CmdResult::default();
    if store.is_favorited(id) {
        result.add_message(CmdMessage::info(format!("#{} is already a favorite", id)));
        return Ok(result);
    }
    store.add(quote);
    result.add_message(membership_message(store, id, true));
    Ok(result.with_listed_quotes(vec![quote.clone()]))
}

/// Removing works for favorites whose quote has left the collection.
pub fn remove<B: FavoritesBackend>(store: &FavoritesStore<B>, id: u32) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(quote) = find_favorite(store, id) else {
        result.add_message(CmdMessage::info(format!("#{} is not a favorite", id)));
        return Ok(result);
    };
    store.remove(id);
    result.add_message(membership_message(store, id, false));
    Ok(result.with_listed_quotes(vec![quote]))
}

pub fn toggle<B: FavoritesBackend>(
    library: &QuoteLibrary,
    store: &FavoritesStore<B>,
    id: u32,
) -> Result<CmdResult> {
    let quote = match find_favorite(store, id) {
        Some(quote) => quote,
        None => library.require(id)?.clone(),
    };
    let was_favorite = store.is_favorited(id);
    let now_favorite = store.toggle(&quote);

    let mut result = CmdResult::default();
    if now_favorite == was_favorite {
        result.add_message(CmdMessage::warning(NOT_SAVED));
    } else {
        result.add_message(membership_message(store, id, now_favorite));
    }
    Ok(result.with_listed_quotes(vec![quote]))
}

pub fn check<B: FavoritesBackend>(store: &FavoritesStore<B>, id: u32) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let text = if store.is_favorited(id) {
        format!("#{} is a favorite", id)
    } else {
        format!("#{} is not a favorite", id)
    };
    result.add_message(CmdMessage::info(text));
    Ok(result)
}

fn find_favorite<B: FavoritesBackend>(store: &FavoritesStore<B>, id: u32) -> Option<Quote> {
    store.get_all().into_iter().find(|q| q.id == id)
}

fn membership_message<B: FavoritesBackend>(
    store: &FavoritesStore<B>,
    id: u32,
    expected: bool,
) -> CmdMessage {
    match (store.is_favorited(id) == expected, expected) {
        (false, _) => CmdMessage::warning(NOT_SAVED),
        (true, true) => CmdMessage::success(format!("Added #{} to favorites", id)),
        (true, false) => CmdMessage::success(format!("Removed #{} from favorites", id)),
    }
}
