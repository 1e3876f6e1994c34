//! Serializable response shapes for outer surfaces.
//!
//! ```json
//! {"ltp":[{"pair":"BTC/EUR","amount":50000.12},{"pair":"BTC/USD","amount":52000.12}]}
//! {"error":"invalid pairs: invalid pair 'ETH/USD', ...","code":"pair.invalid"}
//! ```

use serde::{Deserialize, Serialize};

use crate::{Pair, Quote, QuoteError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtpItem {
    pub pair: Pair,
    pub amount: f64,
}

impl From<Quote> for LtpItem {
    fn from(quote: Quote) -> Self {
        Self {
            pair: quote.pair,
            amount: quote.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtpResponse {
    pub ltp: Vec<LtpItem>,
}

impl From<Vec<Quote>> for LtpResponse {
    fn from(quotes: Vec<Quote>) -> Self {
        Self {
            ltp: quotes.into_iter().map(LtpItem::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<&QuoteError> for ErrorResponse {
    fn from(error: &QuoteError) -> Self {
        Self {
            error: error.to_string(),
            code: error.code().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;

    #[test]
    fn ltp_response_matches_wire_shape() {
        let quotes = vec![
            Quote::new(Pair::BtcEur, 50000.12).expect("valid"),
            Quote::new(Pair::BtcUsd, 52000.12).expect("valid"),
        ];

        let json = serde_json::to_value(LtpResponse::from(quotes)).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "ltp": [
                    {"pair": "BTC/EUR", "amount": 50000.12},
                    {"pair": "BTC/USD", "amount": 52000.12}
                ]
            })
        );
    }

    #[test]
    fn error_response_carries_message_and_code() {
        let error = QuoteError::UpstreamUnavailable(FetchError::Protocol {
            errors: vec![String::from("EQuery:Unknown asset pair")],
        });

        let response = ErrorResponse::from(&error);

        assert_eq!(response.code, "upstream.protocol_error");
        assert!(response.error.contains("EQuery:Unknown asset pair"));
    }
}
