use crate::commands::CmdResult;
use crate::error::{QuoteError, Result};
use crate::loader::QuoteLibrary;

pub fn run(library: &QuoteLibrary) -> Result<CmdResult> {
    let quote = library.random().ok_or(QuoteError::NoQuotes)?;
    Ok(CmdResult::default().with_listed_quotes(vec![quote.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::library;

    #[test]
    fn picks_a_quote_from_the_library() {
        let lib = library();
        for _ in 0..20 {
            let result = run(&lib).unwrap();
            assert_eq!(result.listed_quotes.len(), 1);
            assert!(lib.get(result.listed_quotes[0].id).is_some());
        }
    }

    #[test]
    fn empty_library_has_no_quotes() {
        assert!(matches!(
            run(&QuoteLibrary::default()),
            Err(QuoteError::NoQuotes)
        ));
    }
}
