//! Category assignment.
//!
//! Every category other than `common` is an independent [`CategoryRule`]: a
//! predicate over `(word, grammar tag)`. A word's category set is `common`
//! plus every rule that matches. Matching is unanchored substring containment
//! for both keywords and tags, so `"art"` also hits `"start"`; the heuristic
//! is cheap and tolerates false positives.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use wordlist_types::{Category, UnknownName};

use crate::tables::{CategoryKeywordTable, PosCategoryTable};

/// Which rules a classifier is built from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Strategy {
    /// Keyword containment only; for flat word lists.
    #[default]
    Keyword,
    /// Grammar-tag requirement, plus keywords for thematic categories.
    PosKeyword,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Keyword => "keyword",
            Strategy::PosKeyword => "pos-keyword",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "keyword" => Ok(Strategy::Keyword),
            "pos-keyword" | "pos" => Ok(Strategy::PosKeyword),
            _ => Err(UnknownName {
                kind: "classification strategy",
                name: s.to_string(),
            }),
        }
    }
}

/// Set of categories, iterated in [`Category::ALL`] order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CategorySet {
    bits: u16,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) {
        self.bits
            .view_bits_mut::<Lsb0>()
            .set(category.index(), true);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.bits.view_bits::<Lsb0>()[category.index()]
    }

    pub fn len(&self) -> usize {
        self.bits.view_bits::<Lsb0>().count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.bits
            .view_bits::<Lsb0>()
            .iter_ones()
            .filter_map(Category::from_index)
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        let mut set = Self::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

/// Predicate deciding membership in one category.
///
/// `None` means "no requirement"; an empty list never matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    pub required_tags: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

impl CategoryRule {
    pub fn matches(&self, word: &str, tag: Option<&str>) -> bool {
        let pos_ok = match &self.required_tags {
            None => true,
            Some(required) => {
                tag.is_some_and(|tag| required.iter().any(|req| tag.contains(req.as_str())))
            }
        };
        pos_ok
            && match &self.keywords {
                None => true,
                Some(keywords) => keywords.iter().any(|kw| word.contains(kw.as_str())),
            }
    }
}

/// Assigns normalized words to categories.
#[derive(Clone, Debug)]
pub struct Classifier {
    strategy: Strategy,
    rules: Vec<CategoryRule>,
}

impl Classifier {
    /// One keyword rule per non-`common` category present in `keywords`.
    pub fn keyword(keywords: &CategoryKeywordTable) -> Self {
        let rules = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::Common)
            .filter_map(|category| {
                keywords.keywords(category).map(|kws| CategoryRule {
                    category,
                    required_tags: None,
                    keywords: Some(kws.to_vec()),
                })
            })
            .collect();
        Self {
            strategy: Strategy::Keyword,
            rules,
        }
    }

    /// One rule per category present in `pos_tags`.
    ///
    /// Grammatical categories need only the tag; thematic ones also need a
    /// keyword from `keywords`, and never match when they have none.
    pub fn pos_keyword(pos_tags: &PosCategoryTable, keywords: &CategoryKeywordTable) -> Self {
        let rules = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::Common)
            .filter_map(|category| {
                let tags = pos_tags.tags(category)?;
                let keywords = if category.is_grammatical() {
                    None
                } else {
                    Some(
                        keywords
                            .keywords(category)
                            .map(<[String]>::to_vec)
                            .unwrap_or_default(),
                    )
                };
                Some(CategoryRule {
                    category,
                    required_tags: Some(tags.to_vec()),
                    keywords,
                })
            })
            .collect();
        Self {
            strategy: Strategy::PosKeyword,
            rules,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// `common` plus every category whose rule matches.
    pub fn classify(&self, word: &str, tag: Option<&str>) -> CategorySet {
        let mut set = CategorySet::new();
        set.insert(Category::Common);
        for rule in &self.rules {
            if rule.matches(word, tag) {
                set.insert(rule.category);
            }
        }
        set
    }
}
