//! Category tables: keyword lists and part-of-speech requirements.
//!
//! Tables are immutable values built once per run and handed to the
//! classifier. Built-in tables exist for every [`Language`]; a JSON file can
//! replace either table wholesale (see [`TablesFile`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use wordlist_types::{Category, Language};

const ENGLISH_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Nature,
        &["tree", "flower", "animal", "mountain", "river", "sea", "forest", "weather"],
    ),
    (
        Category::Technology,
        &["computer", "phone", "internet", "program", "device", "tech", "digital"],
    ),
    (
        Category::Science,
        &["science", "physics", "chemistry", "biology", "math", "research", "experiment"],
    ),
    (
        Category::Culture,
        &["art", "music", "theater", "movie", "literature", "culture", "dance"],
    ),
    (
        Category::Sports,
        &["sport", "game", "team", "win", "champion", "play", "competition"],
    ),
    (
        Category::Food,
        &["food", "meal", "dish", "drink", "recipe", "cook", "kitchen"],
    ),
    (
        Category::Professions,
        &["job", "work", "profession", "expert", "master", "specialist"],
    ),
];

const RUSSIAN_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Nature,
        &["природа", "животное", "растение", "погода", "река", "гора", "лес", "море"],
    ),
    (
        Category::Technology,
        &["техника", "компьютер", "телефон", "интернет", "программа", "устройство"],
    ),
    (
        Category::Science,
        &["наука", "физика", "химия", "биология", "математика", "исследование"],
    ),
    (
        Category::Culture,
        &["культура", "искусство", "музыка", "театр", "кино", "литература"],
    ),
    (
        Category::Sports,
        &["спорт", "игра", "соревнование", "команда", "победа", "чемпион"],
    ),
    (
        Category::Food,
        &["еда", "продукт", "блюдо", "напиток", "рецепт", "кухня"],
    ),
    (
        Category::Professions,
        &["профессия", "работа", "специалист", "мастер", "эксперт"],
    ),
];

/// OpenCorpora grammemes; WordNet sources are tagged with the same names.
const POS_TAGS: &[(Category, &[&str])] = &[
    (Category::Nouns, &["NOUN"]),
    (Category::Verbs, &["VERB", "INFN"]),
    (Category::Adjectives, &["ADJF", "ADJS"]),
    (Category::Nature, &["NOUN", "ADJF"]),
    (Category::Technology, &["NOUN", "ADJF"]),
    (Category::Science, &["NOUN", "ADJF"]),
    (Category::Culture, &["NOUN", "ADJF"]),
    (Category::Sports, &["NOUN", "ADJF"]),
    (Category::Food, &["NOUN", "ADJF"]),
    (Category::Professions, &["NOUN", "ADJF"]),
];

/// Category → ordered substring keywords.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CategoryKeywordTable {
    entries: BTreeMap<Category, Vec<String>>,
}

impl CategoryKeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in keyword lists for `language`.
    pub fn builtin(language: Language) -> Self {
        let source = match language {
            Language::English => ENGLISH_KEYWORDS,
            Language::Russian => RUSSIAN_KEYWORDS,
        };
        source
            .iter()
            .fold(Self::new(), |table, (category, keywords)| {
                table.with(*category, keywords.iter().copied())
            })
    }

    /// Set the keywords of `category`, lowercased, first occurrence kept.
    ///
    /// `common` takes no keywords and is ignored.
    pub fn with<I, S>(mut self, category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if category == Category::Common {
            warn!("ignoring keywords for universal category common");
            return self;
        }
        let mut list: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !list.contains(&keyword) {
                list.push(keyword);
            }
        }
        self.entries.insert(category, list);
        self
    }

    pub fn keywords(&self, category: Category) -> Option<&[String]> {
        self.entries.get(&category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    /// Build from a name-keyed map; unknown category names are skipped.
    pub fn from_names(map: BTreeMap<String, Vec<String>>) -> Self {
        resolve_names("keyword", map)
            .fold(Self::new(), |table, (category, keywords)| {
                table.with(category, keywords)
            })
    }
}

/// Category → grammar-tag substrings, one of which the tag must contain.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PosCategoryTable {
    entries: BTreeMap<Category, Vec<String>>,
}

impl PosCategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        POS_TAGS
            .iter()
            .fold(Self::new(), |table, (category, tags)| {
                table.with(*category, tags.iter().copied())
            })
    }

    /// Set the accepted tag substrings of `category`; `common` is ignored.
    pub fn with<I, S>(mut self, category: Category, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if category == Category::Common {
            warn!("ignoring part-of-speech tags for universal category common");
            return self;
        }
        let tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.entries.insert(category, tags);
        self
    }

    pub fn tags(&self, category: Category) -> Option<&[String]> {
        self.entries.get(&category).map(Vec::as_slice)
    }

    pub fn from_names(map: BTreeMap<String, Vec<String>>) -> Self {
        resolve_names("part-of-speech", map)
            .fold(Self::new(), |table, (category, tags)| table.with(category, tags))
    }
}

fn resolve_names(
    kind: &'static str,
    map: BTreeMap<String, Vec<String>>,
) -> impl Iterator<Item = (Category, Vec<String>)> {
    map.into_iter().filter_map(move |(name, values)| {
        match name.parse::<Category>() {
            Ok(category) => Some((category, values)),
            Err(err) => {
                warn!("skipping {kind} table entry: {err}");
                None
            }
        }
    })
}

/// On-disk override for the built-in tables.
///
/// ```json
/// { "keywords": { "nature": ["tree", "river"] }, "pos_tags": { "nouns": ["NOUN"] } }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesFile {
    #[serde(default)]
    pub keywords: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub pos_tags: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("failed to read tables file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tables file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Keyword and part-of-speech tables in effect for one run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tables {
    pub keywords: CategoryKeywordTable,
    pub pos_tags: PosCategoryTable,
}

impl Tables {
    pub fn builtin(language: Language) -> Self {
        Self {
            keywords: CategoryKeywordTable::builtin(language),
            pos_tags: PosCategoryTable::builtin(),
        }
    }

    /// Apply a parsed override; missing sections keep the built-in table.
    pub fn with_overrides(mut self, file: TablesFile) -> Self {
        if let Some(keywords) = file.keywords {
            self.keywords = CategoryKeywordTable::from_names(keywords);
        }
        if let Some(pos_tags) = file.pos_tags {
            self.pos_tags = PosCategoryTable::from_names(pos_tags);
        }
        self
    }

    pub fn load(path: impl AsRef<Path>, language: Language) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TablesFile = serde_json::from_str(&raw).map_err(|source| TablesError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::builtin(language).with_overrides(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_tables_cover_every_thematic_category() {
        for language in [Language::English, Language::Russian] {
            let table = CategoryKeywordTable::builtin(language);
            for category in Category::ALL.into_iter().filter(|c| c.is_thematic()) {
                assert!(
                    table.keywords(category).is_some_and(|k| !k.is_empty()),
                    "{language} lacks keywords for {category}"
                );
            }
            assert!(table.keywords(Category::Common).is_none());
        }
        let pos = PosCategoryTable::builtin();
        assert_eq!(
            pos.tags(Category::Verbs),
            Some(&["VERB".to_string(), "INFN".to_string()][..])
        );
        assert!(pos.tags(Category::Common).is_none());
    }

    #[test]
    fn keywords_keep_order_and_drop_duplicates() {
        let table =
            CategoryKeywordTable::new().with(Category::Food, ["Meal", "dish", "meal", " ", "cook"]);
        assert_eq!(
            table.keywords(Category::Food),
            Some(&["meal".to_string(), "dish".to_string(), "cook".to_string()][..])
        );
    }

    #[test]
    fn common_never_gets_a_table_entry() {
        let table = CategoryKeywordTable::new().with(Category::Common, ["anything"]);
        assert_eq!(table.categories().count(), 0);
        let pos = PosCategoryTable::new().with(Category::Common, ["NOUN"]);
        assert!(pos.tags(Category::Common).is_none());
    }

    #[test]
    fn unknown_category_names_are_skipped() {
        let map = BTreeMap::from([
            ("nature".to_string(), vec!["forest".to_string()]),
            ("weather".to_string(), vec!["rain".to_string()]),
        ]);
        let table = CategoryKeywordTable::from_names(map);
        assert_eq!(table.categories().collect::<Vec<_>>(), vec![Category::Nature]);
    }

    #[test]
    fn loads_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"keywords": {{"nature": ["forest"], "bogus": ["x"]}}}}"#
        )
        .unwrap();
        let tables = Tables::load(file.path(), Language::English).unwrap();
        assert_eq!(
            tables.keywords.categories().collect::<Vec<_>>(),
            vec![Category::Nature]
        );
        assert_eq!(tables.pos_tags, PosCategoryTable::builtin());
    }

    #[test]
    fn rejects_malformed_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"keyword": {{}}}}"#).unwrap();
        let err = Tables::load(file.path(), Language::English).unwrap_err();
        assert!(matches!(err, TablesError::Json { .. }));

        let err = Tables::load("/definitely/not/here.json", Language::English).unwrap_err();
        assert!(matches!(err, TablesError::Io { .. }));
    }
}
