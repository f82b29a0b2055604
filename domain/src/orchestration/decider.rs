//! Function-calling gate.
//!
//! A coarse keyword heuristic, not a classifier: each intent scores one point
//! per keyword found in the message, and the best score only has to be
//! positive. Ties are not broken.

use std::collections::{BTreeMap, HashSet};

use crate::core::language::Language;
use crate::tool::codes;

/// Intents the gate scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Intent {
    ProductSearch,
    CategorySearch,
    RenovationProject,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ProductSearch => "product_search",
            Intent::CategorySearch => "category_search",
            Intent::RenovationProject => "renovation_project",
        }
    }
}

/// Tools that justify function calling on their own
const DIRECT_TOOLS: [&str; 4] = [
    codes::PRODUCT_SEARCH,
    codes::MEILI_PRODUCT_SEARCH,
    codes::STOCK_CHECK,
    codes::COMPANY_INFO,
];

const DEFAULT_TABLE: &[(Intent, Language, &[&str])] = &[
    (
        Intent::ProductSearch,
        Language::RoRo,
        &["produs", "produse", "lac", "vopsea", "parchet", "pardoseala", "recomanzi", "aveti", "gasesc", "cauta"],
    ),
    (
        Intent::ProductSearch,
        Language::HuHu,
        &["termék", "termékek", "festék", "parketta", "ajánl", "van", "keres"],
    ),
    (
        Intent::ProductSearch,
        Language::EnUs,
        &["product", "products", "paint", "parquet", "flooring", "recommend", "have", "find", "search"],
    ),
    (Intent::CategorySearch, Language::RoRo, &["categorie", "categorii", "tip", "tipuri"]),
    (Intent::CategorySearch, Language::HuHu, &["kategória"]),
    (Intent::CategorySearch, Language::EnUs, &["category", "categories", "browse", "section"]),
    (Intent::RenovationProject, Language::RoRo, &["proiect", "renovare", "constructie", "acasa"]),
    (Intent::RenovationProject, Language::HuHu, &["projekt"]),
    (Intent::RenovationProject, Language::EnUs, &["project", "renovation", "construction", "home"]),
];

/// Keyword table keyed by intent, then language
#[derive(Debug, Clone)]
pub struct OrchestrationDecider {
    table: BTreeMap<Intent, BTreeMap<&'static str, Vec<String>>>,
}

impl Default for OrchestrationDecider {
    fn default() -> Self {
        let mut decider = Self {
            table: BTreeMap::new(),
        };
        for (intent, lang, keywords) in DEFAULT_TABLE {
            decider = decider.with_keywords(*intent, *lang, keywords.iter().copied());
        }
        decider
    }
}

impl OrchestrationDecider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keywords for an intent in one language
    pub fn with_keywords<I, S>(mut self, intent: Intent, lang: Language, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .entry(intent)
            .or_default()
            .entry(lang.code())
            .or_default()
            .extend(keywords.into_iter().map(|k| k.into().to_lowercase()));
        self
    }

    /// Per-intent count of keywords present in the message
    pub fn score(&self, message: &str) -> BTreeMap<Intent, usize> {
        let lower = message.to_lowercase();
        self.table
            .iter()
            .map(|(intent, by_lang)| {
                let score = by_lang
                    .values()
                    .flatten()
                    .filter(|keyword| lower.contains(keyword.as_str()))
                    .count();
                (*intent, score)
            })
            .collect()
    }

    pub fn max_score(&self, message: &str) -> usize {
        self.score(message).into_values().max().unwrap_or(0)
    }

    /// Decide whether the function-calling path is worth taking
    pub fn should_use_function_calling<S: AsRef<str>>(&self, message: &str, available: &[S]) -> bool {
        if self.max_score(message) == 0 {
            return false;
        }

        let codes: HashSet<&str> = available.iter().map(|c| c.as_ref()).collect();
        let chained_search = codes.contains(codes::KEYWORD_EXTRACTION)
            && codes::MULTISEARCH_TOOLS.iter().any(|c| codes.contains(c));

        chained_search || DIRECT_TOOLS.iter().any(|c| codes.contains(c))
    }
}
