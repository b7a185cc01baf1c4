use crate::domain::recommendation::Category;

pub const FAILURE_PREFIX: &str = "Gemini AI analysis failed: ";

/// Keyword classification of model output. "buy" wins over "sell" when both appear.
pub fn derive_category(analysis_text: &str) -> Category {
    let lower = analysis_text.to_lowercase();
    if lower.contains("buy") {
        Category::Buy
    } else if lower.contains("sell") {
        Category::Sell
    } else {
        Category::Hold
    }
}

/// Rationale and category for one generation attempt. A failed generation becomes
/// `Unknown` with the error embedded in the rationale.
pub fn from_generation(generated: anyhow::Result<String>) -> (String, Category) {
    match generated {
        Ok(text) => {
            let category = derive_category(&text);
            (text, category)
        }
        Err(err) => (format!("{FAILURE_PREFIX}{err:#}"), Category::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_in_any_case() {
        assert_eq!(derive_category("Strong BUY given momentum"), Category::Buy);
        assert_eq!(derive_category("We'd Buy."), Category::Buy);
    }

    #[test]
    fn sell_without_buy() {
        assert_eq!(derive_category("Consider SELLING into strength"), Category::Sell);
    }

    #[test]
    fn neither_keyword_is_hold() {
        assert_eq!(derive_category("Keep the position; outlook is neutral."), Category::Hold);
        assert_eq!(derive_category(""), Category::Hold);
    }

    #[test]
    fn both_keywords_resolve_to_buy() {
        assert_eq!(
            derive_category("Sell pressure is fading, so buy on dips"),
            Category::Buy
        );
    }

    #[test]
    fn substring_match_is_literal() {
        // "buyback" still contains "buy".
        assert_eq!(derive_category("Announced a share buyback"), Category::Buy);
        assert_eq!(derive_category("Analysts see upside"), Category::Hold);
    }

    #[test]
    fn failed_generation_is_unknown_with_error_detail() {
        let (rationale, category) = from_generation(Err(anyhow::anyhow!("quota exceeded")));
        assert_eq!(category, Category::Unknown);
        assert_eq!(rationale, "Gemini AI analysis failed: quota exceeded");
    }

    #[test]
    fn successful_generation_keeps_text() {
        let (rationale, category) = from_generation(Ok("Hold for now, sell later".to_string()));
        assert_eq!(category, Category::Sell);
        assert_eq!(rationale, "Hold for now, sell later");
    }
}
