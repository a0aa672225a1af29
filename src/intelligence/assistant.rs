use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::{ClassifierError, ClassifierGateway};
use crate::intelligence::arithmetic;

pub const GREETING: &str = "Hi! I'm your UPI safety assistant. How can I help you today?";
pub const REPLY_TROUBLE: &str =
    "I apologize, but I'm having trouble processing your request. Please try asking your question again.";

const REPLY_UPI_TIPS: &str = "For safe UPI transactions: 1) Verify recipient's ID 2) Never share OTP/PIN 3) Check transaction amount carefully 4) Use official apps only.";
const REPLY_FRAUD_TIPS: &str = "To avoid fraud: 1) Don't click suspicious links 2) Verify payment requests 3) Never share sensitive info 4) Report suspicious activity to your bank.";
const REPLY_CAPABILITIES: &str = "I can help you with: 1) UPI payment safety tips 2) Fraud prevention 3) Basic calculations 4) General banking questions. Feel free to ask anything!";

const FALLBACK_UPI: &str = "For UPI safety, always verify the recipient's ID and never share your PIN. Double-check all payment details before confirming.";
const FALLBACK_FRAUD: &str = "If you suspect fraud, immediately contact your bank and report the transaction. Don't share OTPs or sensitive information.";
const FALLBACK_DEFAULT: &str = "I can help you with UPI payment safety and fraud prevention. Could you please be more specific about your question?";

const DETAIL_BANKING: &str = "For banking related queries, always ensure you're using official banking channels and verified UPI IDs.";
const DETAIL_SECURITY: &str = "Your security is important! Always verify transaction details and never share sensitive information.";
const DETAIL_GENERAL: &str = "I'm here to help with any UPI or payment related questions. What specific information do you need?";
const DETAIL_CALCULATION: &str = "I can help you with basic calculations. Just type the math expression (e.g., 2+2).";

const MATH_EMPTY: &str = "Please provide a valid mathematical expression.";
const MATH_FAILED: &str =
    "Sorry, I couldn't calculate that. Please use simple arithmetic expressions (e.g., 2+2, 10*5).";

static MATH_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[+\-*/]\s*(\d+)").expect("math pattern"));

/// Reply to a chat message.
pub async fn assistant_reply(message: &str, gateway: &ClassifierGateway) -> String {
    counter!("assistant_replies_total").increment(1);

    if MATH_EXPR.is_match(message) {
        return calculate(message);
    }

    let ranked = match gateway.rank(message).await {
        Ok(ranked) => ranked,
        Err(ClassifierError::Unavailable) => return fallback_reply(message).to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Assistant classification failed");
            return REPLY_TROUBLE.to_string();
        }
    };

    let lower = message.to_lowercase();
    if lower.contains("upi") || lower.contains("payment") {
        return REPLY_UPI_TIPS.to_string();
    }
    if lower.contains("fraud") || lower.contains("scam") {
        return REPLY_FRAUD_TIPS.to_string();
    }
    if lower.contains("help") || lower.contains("what") || lower.contains("how") {
        return REPLY_CAPABILITIES.to_string();
    }

    let top = &ranked[0];
    if top.score > gateway.config().assistant_threshold {
        return detailed_reply(&top.label).to_string();
    }

    format!(
        "I understand you're asking about '{message}'. I'm primarily focused on helping with UPI payments, fraud prevention, and basic calculations. Could you please rephrase your question in that context?"
    )
}

/// Keyword replies used when no classifier backend is available.
fn fallback_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("upi") {
        FALLBACK_UPI
    } else if lower.contains("fraud") || lower.contains("scam") {
        FALLBACK_FRAUD
    } else {
        FALLBACK_DEFAULT
    }
}

fn detailed_reply(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("bank") {
        DETAIL_BANKING
    } else if label.contains("secure") {
        DETAIL_SECURITY
    } else if label.contains("math") {
        DETAIL_CALCULATION
    } else {
        DETAIL_GENERAL
    }
}

fn calculate(message: &str) -> String {
    let expression: String = message
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/().".contains(*c))
        .collect();
    if expression.is_empty() {
        return MATH_EMPTY.to_string();
    }

    match arithmetic::evaluate(&expression) {
        Ok(value) => format!("{message} = {value}"),
        Err(e) => {
            tracing::debug!(error = %e, expression = %expression, "Arithmetic evaluation failed");
            MATH_FAILED.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GatewayConfig;

    fn heuristic_gateway() -> ClassifierGateway {
        ClassifierGateway::fallback_only(GatewayConfig::default())
    }

    #[tokio::test]
    async fn test_arithmetic() {
        let gw = heuristic_gateway();
        assert_eq!(assistant_reply("2+2", &gw).await, "2+2 = 4");
        assert_eq!(assistant_reply("what is 10 / 4", &gw).await, "what is 10 / 4 = 2.5");
        assert_eq!(assistant_reply("7/0", &gw).await, MATH_FAILED);
    }

    #[tokio::test]
    async fn test_fallback_keywords() {
        let gw = heuristic_gateway();
        assert_eq!(assistant_reply("Is UPI safe?", &gw).await, FALLBACK_UPI);
        assert_eq!(assistant_reply("I got scammed", &gw).await, FALLBACK_FRAUD);
        assert_eq!(assistant_reply("hello there", &gw).await, FALLBACK_DEFAULT);
    }

    #[test]
    fn test_detailed_reply_by_label() {
        assert_eq!(detailed_reply("BANKING"), DETAIL_BANKING);
        assert_eq!(detailed_reply("insecure"), DETAIL_SECURITY);
        assert_eq!(detailed_reply("math_question"), DETAIL_CALCULATION);
        assert_eq!(detailed_reply("POSITIVE"), DETAIL_GENERAL);
    }
}
