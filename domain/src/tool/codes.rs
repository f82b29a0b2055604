//! Well-known tool codes

pub const KEYWORD_EXTRACTION: &str = "keyword_extraction";
pub const PRODUCT_MULTISEARCH: &str = "product_multisearch";
pub const CATEGORY_MULTISEARCH: &str = "category_multisearch";
pub const PRODUCT_SEARCH: &str = "product_search";
pub const MEILI_PRODUCT_SEARCH: &str = "meili_product_search";
pub const PRODUCT_CATEGORY: &str = "product_category";
pub const STOCK_CHECK: &str = "stock_check";
pub const COMPANY_INFO: &str = "company_info";

/// Tools that consume a keyword extraction result via `extracted_keywords`
pub const MULTISEARCH_TOOLS: &[&str] = &[PRODUCT_MULTISEARCH, CATEGORY_MULTISEARCH];

/// Parameter carrying the serialized extraction payload
pub const EXTRACTED_KEYWORDS_PARAM: &str = "extracted_keywords";

/// Parameter carrying the reply language
pub const LANG_PARAM: &str = "lang";

pub fn is_multisearch(code: &str) -> bool {
    MULTISEARCH_TOOLS.contains(&code)
}
