use crate::pipeline::types::Category;

/// Maps the two classification code cells (columns I and J) to a [`Category`].
///
/// Codes are compared exactly and case-sensitively. Rules, first match wins:
///
/// | code 1 | code 2 | Category              |
/// |--------|--------|-----------------------|
/// | `P`    | `A`    | APPAREL FEATURES      |
/// | `P`    | `P`    | PACKS & BAG FEATURES  |
/// | `B`    | any    | BRAND/SUSTAINABILITY  |
/// | other  | other  | unclassified          |
pub fn categorize(code1: &str, code2: &str) -> Category {
    match (code1, code2) {
        ("P", "A") => Category::Apparel,
        ("P", "P") => Category::PacksAndBags,
        ("B", _) => Category::BrandSustainability,
        _ => Category::Unclassified,
    }
}
