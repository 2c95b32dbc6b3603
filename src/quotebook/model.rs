use serde::{Deserialize, Serialize};

/// Filter-only pseudo-category matching every quote. Never assigned to a quote.
pub const ALL_CATEGORY: &str = "全部";

/// Placeholder author used by the collection for unattributed quotes.
pub const UNKNOWN_AUTHOR: &str = "佚名";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u32,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub source: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quote {
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The text used when sharing or copying a quote:
    /// `"content" —— author 《source》`.
    pub fn share_text(&self) -> String {
        if self.has_source() {
            format!(
                "\"{}\" —— {} 《{}》",
                self.content, self.author, self.source
            )
        } else {
            format!("\"{}\" —— {}", self.content, self.author)
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Quote;

    pub fn quote(
        id: u32,
        category: &str,
        content: &str,
        author: &str,
        source: &str,
        tags: &[&str],
    ) -> Quote {
        Quote {
            id,
            content: content.to_string(),
            author: author.to_string(),
            source: source.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn qu_yuan() -> Quote {
        quote(1, "励志", "路漫漫其修远兮", "屈原", "离骚", &["坚持"])
    }

    pub fn confucius() -> Quote {
        quote(2, "学习", "知之者不如好之者", "孔子", "论语", &["学习"])
    }

    pub fn sample() -> Vec<Quote> {
        vec![qu_yuan(), confucius()]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_share_text_with_source() {
        assert_eq!(qu_yuan().share_text(), "\"路漫漫其修远兮\" —— 屈原 《离骚》");
    }

    #[test]
    fn test_share_text_without_source() {
        let q = quote(10, "友情", "桃李满天下", "佚名", "", &[]);
        assert_eq!(q.share_text(), "\"桃李满天下\" —— 佚名");
    }

    #[test]
    fn test_missing_source_and_tags_deserialize_empty() {
        let q: super::Quote = serde_json::from_str(
            r#"{"id":3,"content":"c","author":"a","category":"学习"}"#,
        )
        .unwrap();
        assert!(!q.has_source());
        assert!(q.tags.is_empty());
    }
}
