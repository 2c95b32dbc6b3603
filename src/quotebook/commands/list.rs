use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::QuoteFilter;
use crate::loader::QuoteLibrary;

pub fn run(library: &QuoteLibrary, filter: &QuoteFilter) -> Result<CmdResult> {
    let listed = filter.apply(library.quotes());
    let mut result = CmdResult::default();

    if library.is_empty() {
        result.add_message(CmdMessage::warning("No quotes found in the collection"));
    } else if listed.is_empty() {
        result.add_message(CmdMessage::info("No quotes match the current filters"));
    } else if filter.is_active() {
        result.add_message(CmdMessage::info(format!(
            "{} of {} quotes match",
            listed.len(),
            library.len()
        )));
    }

    Ok(result.with_listed_quotes(listed))
}
