use crate::commands::CmdResult;
use crate::error::Result;
use crate::loader::QuoteLibrary;

/// The category selector: "全部" first, then every category in sorted order.
pub fn categories(library: &QuoteLibrary) -> Result<CmdResult> {
    Ok(CmdResult::default().with_values(library.categories()))
}

pub fn tags(library: &QuoteLibrary) -> Result<CmdResult> {
    Ok(CmdResult::default().with_values(library.tags()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::library;

    #[test]
    fn categories_start_with_all() {
        let result = categories(&library()).unwrap();
        assert_eq!(result.values, vec!["全部", "励志", "友情", "学习"]);
    }

    #[test]
    fn tags_are_distinct_and_sorted() {
        let result = tags(&library()).unwrap();
        assert_eq!(result.values, vec!["友谊", "坚持", "学习", "思考"]);
    }

    #[test]
    fn empty_library_still_offers_all() {
        let result = categories(&QuoteLibrary::default()).unwrap();
        assert_eq!(result.values, vec!["全部"]);
        assert!(tags(&QuoteLibrary::default()).unwrap().values.is_empty());
    }
}
