use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    pub course: Option<CourseQuote>,
}

/// The course as the client sees it. Only `price` and `title` are read.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CourseQuote {
    pub price: Option<PriceInput>,
    pub title: Option<String>,
}

/// Clients send prices and amounts either as a JSON number or as a string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Whether the client sent a value at all. A numeric zero and an empty
    /// string count as absent; the string `"0"` does not.
    pub fn is_present(&self) -> bool {
        match self {
            PriceInput::Number(n) => *n != 0.0 && !n.is_nan(),
            PriceInput::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreated {
    pub client_secret: String,
    /// Price actually charged, in major units, after the minimum was applied.
    pub fixed_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_number_is_absent_but_zero_string_is_not() {
        assert!(!PriceInput::Number(0.0).is_present());
        assert!(!PriceInput::Text(String::new()).is_present());
        assert!(PriceInput::Text("0".into()).is_present());
        assert_eq!(PriceInput::Text("0".into()).as_f64(), Some(0.0));
    }

    #[test]
    fn text_values_are_parsed() {
        assert_eq!(PriceInput::Text(" 45.5 ".into()).as_f64(), Some(45.5));
        assert_eq!(PriceInput::Text("free".into()).as_f64(), None);
        assert_eq!(PriceInput::Text("inf".into()).as_f64(), None);
    }
}
