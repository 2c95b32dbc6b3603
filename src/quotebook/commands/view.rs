use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::related_quotes;
use crate::loader::QuoteLibrary;

/// The quote with `id` followed by its related quotes.
pub fn run(library: &QuoteLibrary, id: u32) -> Result<CmdResult> {
    let quote = library.require(id)?;
    let related = related_quotes(quote, library.quotes());
    Ok(CmdResult::default()
        .with_listed_quotes(vec![quote.clone()])
        .with_related_quotes(related))
}
