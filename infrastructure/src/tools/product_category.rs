//! product_category tool: category browsing over the product index

use super::common::{
    SearchContext, call_language, call_limit, category_filter, hit, lang_parameter,
    limit_parameter,
};
use agentic_domain::tool::codes::PRODUCT_CATEGORY;
use agentic_domain::{
    Language, ParamType, ParsedFunctionCall, SearchRequest, Tool, ToolCategory, ToolDefinition,
    ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryAction {
    SearchCategories,
    FindProducts,
    Hierarchy,
}

impl CategoryAction {
    const NAMES: [&'static str; 4] = [
        "search_categories",
        "find_products_in_category",
        "browse_by_category",
        "get_category_hierarchy",
    ];

    fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "search_categories" => Some(Self::SearchCategories),
            "find_products_in_category" | "browse_by_category" => Some(Self::FindProducts),
            "get_category_hierarchy" => Some(Self::Hierarchy),
            _ => None,
        }
    }
}

pub fn product_category_definition() -> ToolDefinition {
    ToolDefinition::new(
        PRODUCT_CATEGORY,
        "Product Categories",
        "Search categories, list products in a category or show the category tree",
        ToolCategory::Product,
    )
    .with_parameter(
        ToolParameter::new("action", "What to do (default: search_categories)", false)
            .with_allowed_values(CategoryAction::NAMES),
    )
    .with_parameter(ToolParameter::new("search_term", "Text to match category names", false))
    .with_parameter(ToolParameter::new(
        "category_name",
        "Category to list products from",
        false,
    ))
    .with_parameter(
        ToolParameter::new("include_product_count", "Count products per category", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(lang_parameter())
    .with_parameter(limit_parameter("Maximum entries (default: 20)"))
    .with_keywords([
        "categorie", "category", "kategória", "lista", "list", "browse", "rasfoieste",
        "böngész", "ierarhie", "hierarchy",
    ])
    .with_usage_context("Use when the user wants to browse categories or see what a category contains.")
    .with_priority(70)
    .with_timeout(15)
}

/// Order-preserving category tree built from `A / B / C` paths
#[derive(Debug, Default)]
struct CategoryTree {
    children: Vec<(String, CategoryTree)>,
}

impl CategoryTree {
    fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            let index = match node.children.iter().position(|(name, _)| name == segment) {
                Some(index) => index,
                None => {
                    node.children.push((segment.to_string(), CategoryTree::default()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index].1;
        }
    }

    /// Depth-first listing of every node as `(full path, depth)`
    fn flatten(&self) -> Vec<(String, usize)> {
        let mut out = Vec::new();
        self.walk(&mut Vec::new(), &mut out);
        out
    }

    fn walk<'a>(&'a self, prefix: &mut Vec<&'a str>, out: &mut Vec<(String, usize)>) {
        for (name, child) in &self.children {
            prefix.push(name);
            out.push((prefix.join(" / "), prefix.len() - 1));
            child.walk(prefix, out);
            prefix.pop();
        }
    }
}

fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().map(str::trim).unwrap_or(path)
}

fn push_unique(paths: &mut Vec<String>, path: String) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

pub struct ProductCategoryTool {
    definition: ToolDefinition,
    search: SearchContext,
}

impl ProductCategoryTool {
    pub fn new(search: SearchContext) -> Self {
        Self {
            definition: product_category_definition(),
            search,
        }
    }

    async fn collect_paths(&self, query: &str, fetch: usize, suffix: &str) -> Result<Vec<String>, ToolError> {
        let mut attributes = vec![format!("categories_{}", suffix)];
        if suffix != "en" {
            attributes.push("categories_en".to_string());
        }
        let request = SearchRequest::new(query).with_limit(fetch).retrieving(attributes);
        let response = self.search.search(&request).await?;

        let mut paths = Vec::new();
        for item in &response.hits {
            for path in hit::category_paths(item, suffix) {
                push_unique(&mut paths, path);
            }
        }
        Ok(paths)
    }

    async fn search_categories(
        &self,
        call: &ParsedFunctionCall,
        lang: Language,
        limit: usize,
    ) -> Result<Value, ToolError> {
        let suffix = lang.suffix();
        let term = call.get_str("search_term").unwrap_or_default();
        let query = if term.trim().is_empty() { "*" } else { term.trim() };
        let include_count = call.get_bool("include_product_count").unwrap_or(true);

        let paths = self.collect_paths(query, limit * 5, suffix).await?;
        let mut categories = Vec::new();
        for path in paths.into_iter().take(limit) {
            let mut entry = json!({
                "name": leaf_name(&path),
                "hierarchy_path": path,
                "language": lang.code(),
            });
            if include_count {
                entry["product_count"] = json!(self.search.count_in_category(&path, suffix).await);
            }
            categories.push(entry);
        }

        Ok(json!({
            "action": "search_categories",
            "search_term": term,
            "total_found": categories.len(),
            "categories": categories,
            "language_used": lang.code(),
        }))
    }

    async fn find_products(
        &self,
        call: &ParsedFunctionCall,
        lang: Language,
        limit: usize,
    ) -> Result<Value, ToolError> {
        let suffix = lang.suffix();
        let category = call.get_str("category_name").ok_or_else(|| {
            ToolError::invalid_argument("category_name is required for this action")
        })?;

        let request = SearchRequest::new("")
            .with_limit(limit)
            .with_filter(category_filter(category.trim(), &[suffix, "en"]));
        let response = self.search.search(&request).await?;

        let products: Vec<Value> = response
            .hits
            .iter()
            .map(|item| {
                let paths = hit::category_paths(item, suffix);
                let needle = category.trim().to_lowercase();
                let category_match = paths
                    .iter()
                    .find(|p| p.to_lowercase().contains(&needle))
                    .or(paths.first())
                    .cloned()
                    .unwrap_or_default();
                json!({
                    "id": hit::id(item),
                    "name": hit::localized(item, "name", suffix, "Unknown Product"),
                    "price": hit::number(item, "price"),
                    "currency": "RON",
                    "available": hit::flag(item, "available"),
                    "brand": hit::text(item, "brand"),
                    "category_match": category_match,
                })
            })
            .collect();

        Ok(json!({
            "action": "find_products_in_category",
            "category_name": category.trim(),
            "products": products,
            "total_found": response.total(),
            "language_used": lang.code(),
        }))
    }

    async fn hierarchy(&self, lang: Language, limit: usize) -> Result<Value, ToolError> {
        let paths = self.collect_paths("", limit * 2, lang.suffix()).await?;
        let mut tree = CategoryTree::default();
        for path in &paths {
            tree.insert(path);
        }

        let entries: Vec<Value> = tree
            .flatten()
            .into_iter()
            .take(limit)
            .map(|(path, depth)| {
                json!({
                    "name": leaf_name(&path),
                    "hierarchy_path": path,
                    "level": depth,
                })
            })
            .collect();

        Ok(json!({
            "action": "get_category_hierarchy",
            "total_found": entries.len(),
            "hierarchy": entries,
            "language_used": lang.code(),
        }))
    }
}

#[async_trait]
impl Tool for ProductCategoryTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let action_name = call
            .get_str("action")
            .unwrap_or_else(|| "search_categories".to_string());
        let action = CategoryAction::parse(&action_name)
            .ok_or_else(|| ToolError::invalid_argument(format!("Unknown action: {}", action_name)))?;
        let lang = call_language(call);
        let limit = call_limit(call, DEFAULT_LIMIT, MAX_LIMIT);
        info!(action = ?action, lang = %lang, limit, "Category request");

        match action {
            CategoryAction::SearchCategories => self.search_categories(call, lang, limit).await,
            CategoryAction::FindProducts => self.find_products(call, lang, limit).await,
            CategoryAction::Hierarchy => self.hierarchy(lang, limit).await,
        }
    }
}
