//! Checkout webhook payload normalization.
//!
//! The checkout provider (CartPanda) delivers wildly inconsistent payloads
//! depending on integration mode: JSON or form-encoded, wrapped in an
//! `order` object or flat, customer fields nested or top-level, and the
//! shared secret in any of three places. This module reduces all of that to
//! a canonical [`Registration`] using one explicit priority chain per field.
//!
//! Everything here is pure: the HTTP layer hands us the decoded body as a
//! `serde_json::Value` plus the query-string map, and gets back either a
//! validated registration or the error to surface.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CoreError;
use crate::plan::SubscriptionPlan;
use crate::profile::ProfileType;

/// Password assigned to zero-amount (test) signups so the follow-up
/// verification flow can log them in before they set their own.
pub const DEFAULT_TEST_PASSWORD: &str = "TestUser123!";

/// Source tag recorded in the profile's `webhook_data` blob.
pub const WEBHOOK_SOURCE: &str = "cartpanda";

/// Body keys checked for the shared secret, in priority order.
const SECRET_KEYS: [&str; 3] = ["secret", "webhook_secret", "auth_token"];

/// SKU/title substrings that mark a line item as an annual plan.
const ANNUAL_MARKERS: [&str; 3] = ["ANNUAL", "YEARLY", "ANUAL"];

/// A canonical registration intent extracted from one webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub full_name: Option<String>,
    pub profile_type: ProfileType,
    pub plan: SubscriptionPlan,
    pub password: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    /// Raw SKU of the first line item, kept for audit in `webhook_data`.
    pub raw_sku: Option<String>,
}

impl Registration {
    /// Zero or absent amount means the test-signup path: the identity is
    /// left unconfirmed and assigned [`DEFAULT_TEST_PASSWORD`].
    pub fn is_test_signup(&self) -> bool {
        self.amount.unwrap_or(0.0) == 0.0
    }
}

/// Locate the presented webhook secret.
///
/// Priority: query string (`secret`, `webhook_secret`, `auth_token`) →
/// the same keys in the body → the `x-webhook-secret` header.
pub fn find_secret(
    query: &HashMap<String, String>,
    body: &Value,
    header: Option<&str>,
) -> Option<String> {
    for key in SECRET_KEYS {
        if let Some(v) = query.get(key) {
            if !v.is_empty() {
                return Some(v.clone());
            }
        }
    }
    for key in SECRET_KEYS {
        if let Some(v) = non_empty_str(body, key) {
            return Some(v.to_string());
        }
    }
    header.filter(|h| !h.is_empty()).map(str::to_string)
}

/// Normalize a decoded body plus query parameters into a [`Registration`].
///
/// Fails with `MissingField` when `email`, `profile_type`, or
/// `subscription_plan` cannot be resolved from any location, and with
/// `Validation` when a resolved value is outside its enum.
pub fn normalize(
    body: &Value,
    query: &HashMap<String, String>,
) -> Result<Registration, CoreError> {
    // The provider sometimes wraps everything in an `order` object and
    // sometimes sends the same fields flat.
    let (order, wrapped) = match body.get("order") {
        Some(inner) if inner.is_object() => (inner, true),
        _ => (body, false),
    };
    let customer = order.get("customer").filter(|c| c.is_object());

    let email = non_empty_str(order, "email")
        .or_else(|| customer.and_then(|c| non_empty_str(c, "email")))
        .map(str::to_string)
        .or_else(|| query.get("email").filter(|v| !v.is_empty()).cloned())
        .ok_or(CoreError::MissingField("email"))?;

    let full_name = resolve_full_name(order, customer, wrapped, query);

    let profile_type = non_empty_str(order, "profile_type")
        .map(str::to_string)
        .or_else(|| query.get("profile_type").filter(|v| !v.is_empty()).cloned())
        .ok_or(CoreError::MissingField("profile_type"))
        .and_then(|s| ProfileType::parse(&s))?;

    let (plan, raw_sku) = resolve_plan(order, query)?;

    let password = non_empty_str(order, "password")
        .map(str::to_string)
        .or_else(|| query.get("password").filter(|v| !v.is_empty()).cloned());

    let transaction_id = non_empty_str(order, "transaction_id")
        .map(str::to_string)
        // On wrapped payloads the order `id` is the transaction reference.
        .or_else(|| order.get("id").filter(|_| wrapped).and_then(value_to_string))
        .or_else(|| {
            query
                .get("transaction_id")
                .filter(|v| !v.is_empty())
                .cloned()
        });

    let amount = numeric_field(order, "total_price")
        .or_else(|| numeric_field(order, "amount"))
        .or_else(|| query.get("amount").and_then(|v| v.parse::<f64>().ok()));

    Ok(Registration {
        email,
        full_name,
        profile_type,
        plan,
        password,
        transaction_id,
        amount,
        raw_sku,
    })
}

/// Display-name chain. On wrapped payloads the top-level `name` is the
/// order number, so it is only trusted when the payload arrived flat.
fn resolve_full_name(
    order: &Value,
    customer: Option<&Value>,
    wrapped: bool,
    query: &HashMap<String, String>,
) -> Option<String> {
    if let Some(c) = customer {
        if let Some(full) = non_empty_str(c, "full_name") {
            return Some(full.to_string());
        }
        if let Some(first) = non_empty_str(c, "first_name") {
            return Some(match non_empty_str(c, "last_name") {
                Some(last) => format!("{first} {last}"),
                None => first.to_string(),
            });
        }
    }
    if !wrapped {
        if let Some(name) = non_empty_str(order, "name") {
            return Some(name.to_string());
        }
    }
    query.get("name").filter(|v| !v.is_empty()).cloned()
}

/// Plan chain: an explicit `subscription_plan` field (body, then query)
/// wins; otherwise the plan is inferred from the first line item's
/// SKU/title/variant; with neither the field is missing.
fn resolve_plan(
    order: &Value,
    query: &HashMap<String, String>,
) -> Result<(SubscriptionPlan, Option<String>), CoreError> {
    let raw_sku = order
        .get("line_items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| non_empty_str(item, "sku"))
        .map(str::to_string);

    let explicit = non_empty_str(order, "subscription_plan")
        .map(str::to_string)
        .or_else(|| {
            query
                .get("subscription_plan")
                .filter(|v| !v.is_empty())
                .cloned()
        });

    if let Some(raw) = explicit {
        return Ok((SubscriptionPlan::parse(&raw)?, raw_sku));
    }

    let inferred = order
        .get("line_items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .map(|item| {
            let haystack = format!(
                "{}{}{}",
                non_empty_str(item, "sku").unwrap_or(""),
                non_empty_str(item, "title").unwrap_or(""),
                non_empty_str(item, "variant_title").unwrap_or(""),
            )
            .to_uppercase();
            if ANNUAL_MARKERS.iter().any(|m| haystack.contains(m)) {
                SubscriptionPlan::Annual
            } else {
                SubscriptionPlan::Monthly
            }
        });

    match inferred {
        Some(plan) => Ok((plan, raw_sku)),
        None => Err(CoreError::MissingField("subscription_plan")),
    }
}

/// A non-empty string value at `key`, if present.
fn non_empty_str<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// A numeric value at `key`, coercing numeric-looking strings.
fn numeric_field(obj: &Value, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// String form of a value that may be a string or a number (order ids come
/// as either).
fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn no_query() -> HashMap<String, String> {
        HashMap::new()
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalizes_wrapped_order_payload() {
        let body = json!({
            "order": {
                "id": 882211,
                "email": "a@x.com",
                "total_price": "37.00",
                "profile_type": "hormonal",
                "customer": { "first_name": "Maria", "last_name": "Silva" },
                "line_items": [
                    { "sku": "SLIM-M1", "title": "SlimPath Monthly", "variant_title": "" }
                ]
            }
        });
        let reg = normalize(&body, &no_query()).unwrap();
        assert_eq!(reg.email, "a@x.com");
        assert_eq!(reg.full_name.as_deref(), Some("Maria Silva"));
        assert_eq!(reg.plan, SubscriptionPlan::Monthly);
        assert_eq!(reg.profile_type, ProfileType::Hormonal);
        assert_eq!(reg.transaction_id.as_deref(), Some("882211"));
        assert_eq!(reg.amount, Some(37.0));
        assert_eq!(reg.raw_sku.as_deref(), Some("SLIM-M1"));
        assert!(!reg.is_test_signup());
    }

    #[test]
    fn infers_annual_plan_from_sku_markers() {
        for marker in ["SLIM-ANNUAL", "PLAN-YEARLY-12", "PLANO-ANUAL"] {
            let body = json!({
                "order": {
                    "email": "a@x.com",
                    "profile_type": "metabolic",
                    "line_items": [{ "sku": marker }]
                }
            });
            let reg = normalize(&body, &no_query()).unwrap();
            assert_eq!(reg.plan, SubscriptionPlan::Annual, "marker {marker}");
        }
    }

    #[test]
    fn explicit_plan_overrides_sku_inference() {
        let body = json!({
            "order": {
                "email": "a@x.com",
                "profile_type": "cortisol",
                "subscription_plan": "MONTHLY",
                "line_items": [{ "sku": "SLIM-ANNUAL" }]
            }
        });
        let reg = normalize(&body, &no_query()).unwrap();
        assert_eq!(reg.plan, SubscriptionPlan::Monthly);
    }

    #[test]
    fn flat_payload_uses_top_level_fields() {
        let body = json!({
            "email": "flat@x.com",
            "name": "Flat User",
            "profile_type": "retention",
            "subscription_plan": "annual",
            "password": "hunter2hunter2",
            "amount": 297
        });
        let reg = normalize(&body, &no_query()).unwrap();
        assert_eq!(reg.email, "flat@x.com");
        assert_eq!(reg.full_name.as_deref(), Some("Flat User"));
        assert_eq!(reg.plan, SubscriptionPlan::Annual);
        assert_eq!(reg.password.as_deref(), Some("hunter2hunter2"));
        assert_eq!(reg.amount, Some(297.0));
    }

    #[test]
    fn wrapped_order_name_is_not_a_display_name() {
        // On wrapped payloads `name` is the order number.
        let body = json!({
            "order": {
                "name": "#88221",
                "email": "a@x.com",
                "profile_type": "hormonal",
                "subscription_plan": "monthly"
            }
        });
        let reg = normalize(&body, &no_query()).unwrap();
        assert_eq!(reg.full_name, None);
    }

    #[test]
    fn query_only_registration_works() {
        let q = query(&[
            ("email", "q@x.com"),
            ("name", "Query User"),
            ("profile_type", "insulinic"),
            ("subscription_plan", "monthly"),
            ("amount", "0"),
        ]);
        let reg = normalize(&json!({}), &q).unwrap();
        assert_eq!(reg.email, "q@x.com");
        assert_eq!(reg.full_name.as_deref(), Some("Query User"));
        assert!(reg.is_test_signup());
    }

    #[test]
    fn absent_amount_counts_as_test_signup() {
        let q = query(&[
            ("email", "q@x.com"),
            ("profile_type", "hormonal"),
            ("subscription_plan", "monthly"),
        ]);
        let reg = normalize(&json!({}), &q).unwrap();
        assert_eq!(reg.amount, None);
        assert!(reg.is_test_signup());
    }

    #[test]
    fn missing_email_fails() {
        let q = query(&[("profile_type", "hormonal"), ("subscription_plan", "monthly")]);
        let err = normalize(&json!({}), &q).unwrap_err();
        assert_matches!(err, CoreError::MissingField("email"));
    }

    #[test]
    fn missing_profile_type_fails() {
        let q = query(&[("email", "a@x.com"), ("subscription_plan", "monthly")]);
        let err = normalize(&json!({}), &q).unwrap_err();
        assert_matches!(err, CoreError::MissingField("profile_type"));
    }

    #[test]
    fn missing_plan_with_no_line_items_fails() {
        let q = query(&[("email", "a@x.com"), ("profile_type", "hormonal")]);
        let err = normalize(&json!({}), &q).unwrap_err();
        assert_matches!(err, CoreError::MissingField("subscription_plan"));
    }

    #[test]
    fn invalid_plan_value_fails_validation() {
        let q = query(&[
            ("email", "a@x.com"),
            ("profile_type", "hormonal"),
            ("subscription_plan", "weekly"),
        ]);
        let err = normalize(&json!({}), &q).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn secret_priority_is_query_then_body_then_header() {
        let q = query(&[("secret", "from-query")]);
        let body = json!({ "webhook_secret": "from-body" });

        assert_eq!(
            find_secret(&q, &body, Some("from-header")).as_deref(),
            Some("from-query")
        );
        assert_eq!(
            find_secret(&no_query(), &body, Some("from-header")).as_deref(),
            Some("from-body")
        );
        assert_eq!(
            find_secret(&no_query(), &json!({}), Some("from-header")).as_deref(),
            Some("from-header")
        );
        assert_eq!(find_secret(&no_query(), &json!({}), None), None);
    }

    #[test]
    fn auth_token_body_key_is_accepted() {
        let body = json!({ "auth_token": "tok" });
        assert_eq!(find_secret(&no_query(), &body, None).as_deref(), Some("tok"));
    }
}
