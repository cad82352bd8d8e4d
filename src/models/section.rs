use serde::Serialize;

/// The closed set of sections the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Overview,
    Requirements,
    UserStories,
    Technical,
}

impl SectionKey {
    /// Keys in assembly order.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Overview,
        SectionKey::Requirements,
        SectionKey::UserStories,
        SectionKey::Technical,
    ];

    /// Heading phrases that start this section.
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SectionKey::Overview => &["Project Overview", "Introduction"],
            SectionKey::Requirements => &["Requirements", "Functional Requirements"],
            SectionKey::UserStories => &["User Stories", "Use Cases"],
            SectionKey::Technical => &["Technical Specifications", "Architecture"],
        }
    }

    /// Heading written above the section in an assembled document.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Overview => "Project Overview",
            SectionKey::Requirements => "Requirements",
            SectionKey::UserStories => "User Stories",
            SectionKey::Technical => "Technical Specifications",
        }
    }
}

/// Optional text for each [`SectionKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<String>,
}

impl SectionMap {
    #[must_use]
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn insert(&mut self, key: SectionKey, text: impl Into<String>) {
        *self.slot_mut(key) = Some(text.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        SectionKey::ALL.iter().all(|k| self.slot(*k).is_none())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Present sections in assembly order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        SectionKey::ALL
            .into_iter()
            .filter_map(move |k| self.get(k).map(|text| (k, text)))
    }

    fn slot(&self, key: SectionKey) -> &Option<String> {
        match key {
            SectionKey::Overview => &self.overview,
            SectionKey::Requirements => &self.requirements,
            SectionKey::UserStories => &self.user_stories,
            SectionKey::Technical => &self.technical,
        }
    }

    fn slot_mut(&mut self, key: SectionKey) -> &mut Option<String> {
        match key {
            SectionKey::Overview => &mut self.overview,
            SectionKey::Requirements => &mut self.requirements,
            SectionKey::UserStories => &mut self.user_stories,
            SectionKey::Technical => &mut self.technical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map() {
        let map = SectionMap::default();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.get(SectionKey::Technical).is_none());
    }

    #[test]
    fn iter_follows_fixed_order() {
        let mut map = SectionMap::default();
        map.insert(SectionKey::Technical, "t");
        map.insert(SectionKey::Overview, "o");
        map.insert(SectionKey::UserStories, "u");
        let keys: Vec<SectionKey> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                SectionKey::Overview,
                SectionKey::UserStories,
                SectionKey::Technical
            ]
        );
    }

    #[test]
    fn serializes_present_keys_only() {
        let mut map = SectionMap::default();
        map.insert(SectionKey::UserStories, "As a user");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"userStories":"As a user"}"#);
    }
}
