//! The message handed to the external messaging channel on confirmation.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::checkout::OrderSummary;

/// Characters a URI component may carry unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A confirmed order, ready to open in the messaging channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderHandoff {
    /// Plain-text message.
    pub message: String,
    /// `message` escaped as a URI component.
    pub encoded_message: String,
    /// `{base_url}?text={encoded_message}`
    pub url: String,
}

impl OrderHandoff {
    pub fn new(summary: &OrderSummary, base_url: &str) -> Self {
        let message = compose_message(summary);
        let encoded_message = encode_component(&message);
        let url = format!("{}?text={}", base_url, encoded_message);
        Self {
            message,
            encoded_message,
            url,
        }
    }
}

/// Render the order as the customer's opening message.
pub fn compose_message(summary: &OrderSummary) -> String {
    let mut message = String::from("Greetings, I am interested in acquiring:\n\n");
    message.push_str(&format!("\u{1f48e} Item: {}\n", summary.product_name));
    message.push_str(&format!("\u{1f4b0} Price: {}\n", summary.unit_price));
    message.push_str(&format!("\u{1f522} Quantity: {}\n", summary.quantity));

    if !summary.add_ons.is_empty() {
        message.push_str("\n\u{2728} Premium Additions:\n");
        for line in &summary.add_ons {
            message.push_str(&format!("  \u{2022} {} - {}\n", line.name, line.price));
        }
    }

    message.push_str(&format!(
        "\n\u{1f4b3} Total Investment: {}\n\n",
        summary.total_display
    ));
    message.push_str("Please assist me with the acquisition process.");
    message
}

/// Percent-encode like a browser's `encodeURIComponent`.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}
