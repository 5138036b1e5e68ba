use serde_json::{Map, Value, json};

use super::TransportError;
use super::fields::Fields;
use crate::domain::{Account, ApiKey, CreateApiKey, CreditTransaction, Credits};

pub fn decode_account(fields: Fields<'_>) -> Account {
    Account {
        id: fields.string(&["id"]),
        email: fields.string(&["email"]),
        name: fields.opt_string(&["name"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_credits(fields: Fields<'_>) -> Credits {
    let balance = fields.i64_or(&["balance"], 0);
    let reserved_balance = fields.i64_or(&["reserved_balance", "reservedBalance"], 0);
    Credits {
        balance,
        reserved_balance,
        available_balance: fields.i64_or(
            &["available_balance", "availableBalance"],
            balance.saturating_sub(reserved_balance),
        ),
    }
}

pub fn decode_transaction(fields: Fields<'_>) -> CreditTransaction {
    CreditTransaction {
        id: fields.string(&["id"]),
        transaction_type: fields.string(&["type", "transaction_type", "transactionType"]),
        amount: fields.i64_or(&["amount"], 0),
        balance_after: fields.i64_or(&["balance_after", "balanceAfter"], 0),
        description: fields.opt_string(&["description"]),
        reference_id: fields.opt_string(&["reference_id", "referenceId"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_api_key(fields: Fields<'_>) -> ApiKey {
    ApiKey {
        id: fields.string(&["id"]),
        name: fields.string(&["name"]),
        prefix: fields.opt_string(&["prefix", "key_prefix", "keyPrefix"]),
        last_four: fields.opt_string(&["last_four", "lastFour"]),
        key: fields.opt_string(&["key"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
        last_used_at: fields.opt_string(&["last_used_at", "lastUsedAt"]),
        expires_at: fields.opt_string(&["expires_at", "expiresAt"]),
        is_revoked: fields.bool_or(&["is_revoked", "isRevoked"], false),
    }
}

pub fn decode_api_keys(object: &Map<String, Value>) -> Result<Vec<ApiKey>, TransportError> {
    super::decode_list(object, &["data", "api_keys", "apiKeys", "keys"], decode_api_key)
}

pub fn encode_create_api_key_body(request: &CreateApiKey) -> Value {
    let mut body = Map::new();
    body.insert("name".to_owned(), json!(request.name()));
    if let Some(expires_at) = request.expires_at.as_deref() {
        body.insert("expiresAt".to_owned(), json!(expires_at));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn credits_available_defaults_to_balance_minus_reserved() {
        let body = object(json!({ "balance": 100, "reservedBalance": 30 }));
        let credits = decode_credits(Fields::new(&body));
        assert_eq!(credits.available_balance, 70);
        assert!(credits.has_credits());

        let body = object(json!({ "balance": 5, "available_balance": 0 }));
        assert!(!decode_credits(Fields::new(&body)).has_credits());
    }

    #[test]
    fn credits_default_saturates_on_extreme_balances() {
        let body = object(json!({ "balance": i64::MIN, "reservedBalance": 1 }));
        let credits = decode_credits(Fields::new(&body));
        assert_eq!(credits.available_balance, i64::MIN);
        assert!(!credits.has_credits());

        let body = object(json!({ "balance": i64::MAX, "reserved_balance": -1 }));
        assert_eq!(decode_credits(Fields::new(&body)).available_balance, i64::MAX);
    }

    #[test]
    fn api_keys_accept_alternate_envelope() {
        let body = object(json!({
            "keys": [
                { "id": "key_1", "name": "ci", "lastFour": "abcd", "isRevoked": true }
            ]
        }));
        let keys = decode_api_keys(&body).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].last_four.as_deref(), Some("abcd"));
        assert!(keys[0].is_revoked);
        assert_eq!(keys[0].key, None);
    }

    #[test]
    fn transaction_reads_type_field() {
        let body = object(json!({ "id": "tx_1", "type": "purchase", "amount": "500" }));
        let transaction = decode_transaction(Fields::new(&body));
        assert_eq!(transaction.transaction_type, "purchase");
        assert_eq!(transaction.amount, 500);
    }

    #[test]
    fn create_api_key_body_omits_missing_expiry() {
        let request = CreateApiKey::new(" deploy ").unwrap();
        assert_eq!(encode_create_api_key_body(&request), json!({ "name": "deploy" }));
    }
}
