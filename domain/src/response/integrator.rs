//! Turns tool results into one localized answer.
//!
//! Failure details never reach the user: an all-failed batch yields the
//! fixed error text, and failed results are otherwise simply left out.

use serde_json::Value;

use super::payloads::{
    CategoryPayload, CompanyPayload, ExtractionPayload, ProductPayload, StockPayload,
};
use super::texts::{TextKey, localized};
use crate::core::language::Language;
use crate::core::text::format_quantity;
use crate::tool::codes;
use crate::tool::value_objects::ToolExecutionResult;

/// Formatter family picked from the tool code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Product,
    Category,
    Stock,
    Company,
}

fn family_of(code: &str) -> Option<Family> {
    if [codes::PRODUCT_MULTISEARCH, codes::PRODUCT_SEARCH, codes::MEILI_PRODUCT_SEARCH]
        .iter()
        .any(|c| code.contains(c))
    {
        Some(Family::Product)
    } else if code.contains("category") {
        Some(Family::Category)
    } else if code == codes::STOCK_CHECK {
        Some(Family::Stock)
    } else if code == codes::COMPANY_INFO {
        Some(Family::Company)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseIntegrator;

impl ResponseIntegrator {
    pub fn new() -> Self {
        Self
    }

    pub fn integrate(
        &self,
        _user_message: &str,
        results: &[ToolExecutionResult],
        lang: Language,
    ) -> String {
        if results.is_empty() {
            return localized(TextKey::Fallback, lang).to_string();
        }
        if results.iter().all(|r| !r.success) {
            return localized(TextKey::FunctionError, lang).to_string();
        }

        let extraction = results
            .iter()
            .filter(|r| r.tool == codes::KEYWORD_EXTRACTION)
            .find_map(|r| r.payload())
            .map(ExtractionPayload::from_value);

        let fragments: Vec<String> = results
            .iter()
            .filter(|r| r.tool != codes::KEYWORD_EXTRACTION)
            .filter_map(|r| {
                let payload = r.payload()?;
                let family = family_of(&r.tool)?;
                Some(self.format_fragment(family, payload, lang))
            })
            .collect();

        if fragments.is_empty() {
            return localized(TextKey::Fallback, lang).to_string();
        }

        let mut answer = fragments.join(" ");
        if let Some(extraction) = extraction
            && extraction.extraction_success
        {
            answer.push_str(&extraction_summary_line(
                &format_quantity(extraction.total_keywords),
                lang,
            ));
        }
        answer
    }

    fn format_fragment(&self, family: Family, payload: &Value, lang: Language) -> String {
        match family {
            Family::Product => format_products(&ProductPayload::from_value(payload), lang),
            Family::Category => {
                // category browsing tools may answer with products instead
                if payload.get("categories").is_none() && payload.get("products").is_some() {
                    format_products(&ProductPayload::from_value(payload), lang)
                } else {
                    format_categories(&CategoryPayload::from_value(payload), lang)
                }
            }
            Family::Stock => format_stock(&StockPayload::from_value(payload), lang),
            Family::Company => format_company(&CompanyPayload::from_value(payload)),
        }
    }
}

fn format_products(payload: &ProductPayload, lang: Language) -> String {
    let products = &payload.products;
    let Some(first) = products.first() else {
        return localized(TextKey::NoProductsFound, lang).to_string();
    };

    if products.len() == 1 {
        let price = format!("{:.2} {}", first.price, first.currency());
        let mut text = match lang {
            Language::RoRo => format!(
                "Am găsit acest produs: {} la {}. {}",
                first.name,
                price,
                if first.available { "Este disponibil în stoc." } else { "Nu este în stoc momentan." }
            ),
            Language::HuHu => format!(
                "Megtaláltam ezt a terméket: {} {} áron. {}",
                first.name,
                price,
                if first.available { "Raktáron van." } else { "Jelenleg nincs raktáron." }
            ),
            Language::EnUs => format!(
                "I found this product: {} at {}. {}",
                first.name,
                price,
                if first.available { "It is available in stock." } else { "Currently out of stock." }
            ),
        };
        if !payload.keywords_used.is_empty() {
            let keywords = payload
                .keywords_used
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let label = match lang {
                Language::RoRo => "căutare inteligentă pentru",
                Language::HuHu => "intelligens keresés",
                Language::EnUs => "intelligent search for",
            };
            text.push_str(&format!(" ({}: {})", label, keywords));
        }
        return text;
    }

    let total = format_quantity(payload.total_found);
    let mut text = match lang {
        Language::RoRo => format!("Am găsit {} produse relevante", total),
        Language::HuHu => format!("{} releváns terméket találtam", total),
        Language::EnUs => format!("I found {} relevant products", total),
    };
    if let Some(intent) = payload.intent() {
        let connector = match lang {
            Language::RoRo => "pentru",
            Language::HuHu => "erre:",
            Language::EnUs => "for",
        };
        text.push_str(&format!(" {} {}", connector, intent));
    }
    text.push_str(":\n");
    for (i, product) in products.iter().take(3).enumerate() {
        text.push_str(&format!(
            "{}. {} - {:.2} {}\n",
            i + 1,
            product.name,
            product.price,
            product.currency()
        ));
    }
    text
}

fn format_categories(payload: &CategoryPayload, lang: Language) -> String {
    let categories = &payload.categories;
    if categories.is_empty() {
        return localized(TextKey::NoCategoriesFound, lang).to_string();
    }

    let (mut text, unit) = match lang {
        Language::RoRo => (
            format!("Am găsit {} categorii relevante:\n", categories.len()),
            "produse",
        ),
        Language::HuHu => (
            format!("{} releváns kategóriát találtam:\n", categories.len()),
            "termék",
        ),
        Language::EnUs => (
            format!("I found {} relevant categories:\n", categories.len()),
            "products",
        ),
    };
    for category in categories.iter().take(5) {
        text.push_str(&format!(
            "• {} ({} {})\n",
            category.name,
            format_quantity(category.product_count),
            unit
        ));
    }
    text
}

fn format_stock(payload: &StockPayload, lang: Language) -> String {
    if let Some(error) = &payload.error {
        return error.clone();
    }
    let name = payload.product_name.as_deref().unwrap_or("Product");
    let quantity = format_quantity(payload.quantity);
    let status = payload.status.as_deref().unwrap_or("Unknown");

    match lang {
        Language::RoRo => format!("Stoc pentru {}: {} bucăți. Status: {}.", name, quantity, status),
        Language::HuHu => format!(
            "Készlet a {} termékből: {} darab. Állapot: {}.",
            name, quantity, status
        ),
        Language::EnUs => format!("Stock for {}: {} units. Status: {}.", name, quantity, status),
    }
}

fn format_company(payload: &CompanyPayload) -> String {
    let mut text = payload
        .company_name
        .clone()
        .unwrap_or_else(|| "Our Company".to_string());
    if let Some(email) = &payload.email {
        text.push_str(&format!("\n📧 {}", email));
    }
    if let Some(phone) = &payload.phone {
        text.push_str(&format!("\n📞 {}", phone));
    }
    if let Some(website) = &payload.website {
        text.push_str(&format!("\n🌐 {}", website));
    }
    text
}

fn extraction_summary_line(total: &str, lang: Language) -> String {
    match lang {
        Language::RoRo => format!(
            "\n\n💡 Am analizat {} cuvinte cheie din cererea dumneavoastră pentru a găsi cele mai relevante rezultate.",
            total
        ),
        Language::HuHu => format!(
            "\n\n💡 {} kulcsszót elemeztem a kéréséből a legmegfelelőbb eredmények megtalálásához.",
            total
        ),
        Language::EnUs => format!(
            "\n\n💡 I analyzed {} keywords from your request to find the most relevant results.",
            total
        ),
    }
}
