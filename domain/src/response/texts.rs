//! Fixed localized reply texts

use crate::core::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    /// Nothing usable came back
    Fallback,
    /// Every tool call failed
    FunctionError,
    NoProductsFound,
    NoCategoriesFound,
    ProductNotFound,
    InStock,
    OutOfStock,
}

pub fn localized(key: TextKey, lang: Language) -> &'static str {
    use Language::*;
    use TextKey::*;

    match (key, lang) {
        (Fallback, EnUs) => "I'm sorry, I didn't fully understand your request. Could you rephrase it?",
        (Fallback, RoRo) => {
            "Îmi pare rău, nu am înțeles complet cererea dumneavoastră. Puteți să o reformulați?"
        }
        (Fallback, HuHu) => "Sajnálom, nem értettem teljesen a kérését. Tudná másképp megfogalmazni?",

        (FunctionError, EnUs) => {
            "I encountered an error while analyzing your request. Please try again."
        }
        (FunctionError, RoRo) => {
            "Am întâmpinat o eroare în timpul analizării cererii. Vă rog să încercați din nou."
        }
        (FunctionError, HuHu) => "Hiba történt a kérés elemzése során. Kérem, próbálja újra.",

        (NoProductsFound, EnUs) => "No products found matching your criteria.",
        (NoProductsFound, RoRo) => {
            "Nu am găsit produse care să corespundă criteriilor dumneavoastră."
        }
        (NoProductsFound, HuHu) => "Nem találtam a kritériumoknak megfelelő termékeket.",

        (NoCategoriesFound, EnUs) => "No relevant categories found.",
        (NoCategoriesFound, RoRo) => "Nu am găsit categorii relevante.",
        (NoCategoriesFound, HuHu) => "Nem találtam releváns kategóriákat.",

        (ProductNotFound, EnUs) => "Product not found",
        (ProductNotFound, RoRo) => "Produs negăsit",
        (ProductNotFound, HuHu) => "Termék nem található",

        (InStock, EnUs) => "In Stock",
        (InStock, RoRo) => "În Stoc",
        (InStock, HuHu) => "Raktáron",

        (OutOfStock, EnUs) => "Out of Stock",
        (OutOfStock, RoRo) => "Lipsă Stoc",
        (OutOfStock, HuHu) => "Nincs Raktáron",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_distinct_texts_per_language() {
        for key in [
            TextKey::Fallback,
            TextKey::FunctionError,
            TextKey::NoProductsFound,
            TextKey::NoCategoriesFound,
            TextKey::ProductNotFound,
            TextKey::InStock,
            TextKey::OutOfStock,
        ] {
            let en = localized(key, Language::EnUs);
            assert_ne!(en, localized(key, Language::RoRo));
            assert_ne!(en, localized(key, Language::HuHu));
        }
    }
}
