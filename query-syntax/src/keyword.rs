use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed keyword filters whose values name objects in a reference store.
/// Anything outside this set is plain content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `category:` by name, slug or id.
    Category,
    /// `feed:` by name or id.
    Feed,
    /// `search:` by query string or id.
    SavedSearch,
    /// `tag:` by name.
    Tag,
    /// `user:` by username or id.
    User,
    /// `playlist:` by id or `owner/slug`.
    Playlist,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 6] = [
        ReferenceKind::Category,
        ReferenceKind::Feed,
        ReferenceKind::SavedSearch,
        ReferenceKind::Tag,
        ReferenceKind::User,
        ReferenceKind::Playlist,
    ];

    /// Case-insensitive keyword lookup.
    ///
    /// ```
    /// use query_syntax::ReferenceKind;
    /// assert_eq!(ReferenceKind::from_keyword("Search"), Some(ReferenceKind::SavedSearch));
    /// assert_eq!(ReferenceKind::from_keyword("ext"), None);
    /// ```
    pub fn from_keyword(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "category" => Some(ReferenceKind::Category),
            "feed" => Some(ReferenceKind::Feed),
            "search" => Some(ReferenceKind::SavedSearch),
            "tag" => Some(ReferenceKind::Tag),
            "user" => Some(ReferenceKind::User),
            "playlist" => Some(ReferenceKind::Playlist),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ReferenceKind::Category => "category",
            ReferenceKind::Feed => "feed",
            ReferenceKind::SavedSearch => "search",
            ReferenceKind::Tag => "tag",
            ReferenceKind::User => "user",
            ReferenceKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Splits a literal of the form `keyword:value` when the keyword names a
/// [`ReferenceKind`]. Only the first `:` separates, so the value may contain
/// more colons.
pub fn split_reference(text: &str) -> Option<(ReferenceKind, &str)> {
    let (keyword, value) = text.split_once(':')?;
    ReferenceKind::from_keyword(keyword).map(|kind| (kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_the_table() {
        for kind in ReferenceKind::ALL {
            assert_eq!(ReferenceKind::from_keyword(kind.keyword()), Some(kind));
            assert_eq!(
                ReferenceKind::from_keyword(&kind.keyword().to_uppercase()),
                Some(kind)
            );
        }
    }

    #[test]
    fn splits_only_known_keywords() {
        assert_eq!(
            split_reference("CATEGORY:Funny"),
            Some((ReferenceKind::Category, "Funny"))
        );
        assert_eq!(
            split_reference("search:a:b"),
            Some((ReferenceKind::SavedSearch, "a:b"))
        );
        assert_eq!(split_reference("tag:"), Some((ReferenceKind::Tag, "")));
        assert_eq!(split_reference("http://example.com"), None);
        assert_eq!(split_reference("savedsearch:x"), None);
        assert_eq!(split_reference("plain"), None);
    }
}
