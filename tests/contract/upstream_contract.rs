//! Contract tests for the Kraken ticker adapter.
//!
//! Each case feeds a provider response body through the adapter and checks the
//! quotes or the error it produces.

use std::sync::Arc;

use ltp_core::{
    CannedHttpClient, FetchError, KrakenAdapter, Pair, Quote, QuoteFetcher,
};

struct ContractCase {
    name: &'static str,
    pairs: &'static [Pair],
    body: &'static str,
    expected: &'static [(Pair, f64)],
}

fn success_cases() -> Vec<ContractCase> {
    vec![
        ContractCase {
            name: "exact symbols",
            pairs: &[Pair::BtcUsd, Pair::BtcChf],
            body: r#"{"error":[],"result":{"XBTUSD":{"c":["52000.12","1"]},"XBTCHF":{"c":["47000.5","1"]}}}"#,
            expected: &[(Pair::BtcUsd, 52000.12), (Pair::BtcChf, 47000.5)],
        },
        ContractCase {
            name: "Z-decorated symbols",
            pairs: &[Pair::BtcUsd, Pair::BtcEur],
            body: r#"{"error":[],"result":{"XXBTZUSD":{"c":["52000.12"]},"XXBTZEUR":{"c":["50000.12"]}}}"#,
            expected: &[(Pair::BtcUsd, 52000.12), (Pair::BtcEur, 50000.12)],
        },
        ContractCase {
            name: "X-decorated symbol without separator",
            pairs: &[Pair::BtcChf],
            body: r#"{"error":[],"result":{"XXBTCHF":{"c":["47000.5"]},"OTHER":{"c":["1"]}}}"#,
            expected: &[(Pair::BtcChf, 47000.5)],
        },
        ContractCase {
            name: "singleton response under an unrelated key",
            pairs: &[Pair::BtcEur],
            body: r#"{"error":[],"result":{"BTCEURSPOT":{"c":["50000.12"]}}}"#,
            expected: &[(Pair::BtcEur, 50000.12)],
        },
        ContractCase {
            name: "extra fields are ignored",
            pairs: &[Pair::BtcUsd],
            body: r#"{"error":[],"result":{"XXBTZUSD":{"a":["1","1","1"],"b":["1","1","1"],"c":["52000.12","0.1"],"v":["1","2"]}}}"#,
            expected: &[(Pair::BtcUsd, 52000.12)],
        },
    ]
}

fn adapter_for(body: &str) -> (KrakenAdapter, Arc<CannedHttpClient>) {
    let client = Arc::new(CannedHttpClient::ok_json(body));
    let adapter = KrakenAdapter::new(client.clone(), "https://api.example.test/0/public");
    (adapter, client)
}

#[tokio::test]
async fn adapter_resolves_every_documented_response_shape() {
    for case in success_cases() {
        let (adapter, client) = adapter_for(case.body);

        let quotes = adapter
            .fetch_batch(case.pairs)
            .await
            .unwrap_or_else(|error| panic!("case '{}' failed: {error}", case.name));

        let expected: Vec<Quote> = case
            .expected
            .iter()
            .map(|(pair, amount)| Quote::new(*pair, *amount).expect("valid"))
            .collect();
        assert_eq!(quotes, expected, "case '{}': quotes in request order", case.name);
        assert_eq!(client.calls(), 1, "case '{}': one request", case.name);
    }
}

#[tokio::test]
async fn several_unrelated_keys_do_not_resolve() {
    let (adapter, _) = adapter_for(
        r#"{"error":[],"result":{"UNKNOWN1":{"c":["1"]},"UNKNOWN2":{"c":["2"]}}}"#,
    );

    let error = adapter
        .fetch_batch(&[Pair::BtcUsd])
        .await
        .expect_err("ambiguous response must fail");

    match error {
        FetchError::SymbolNotFound { pair, attempted } => {
            assert_eq!(pair, Pair::BtcUsd);
            assert_eq!(attempted, vec!["XBTUSD", "XXBTZUSD", "XXBTUSD"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn one_unresolvable_pair_fails_the_whole_batch() {
    let (adapter, _) = adapter_for(
        r#"{"error":[],"result":{"XXBTZUSD":{"c":["52000.12"]},"XXBTZEUR":{"c":["50000.12"]}}}"#,
    );

    let error = adapter
        .fetch_batch(&[Pair::BtcUsd, Pair::BtcChf])
        .await
        .expect_err("missing CHF must fail the batch");

    assert!(matches!(
        error,
        FetchError::SymbolNotFound { pair: Pair::BtcChf, .. }
    ));
}

#[tokio::test]
async fn provider_error_list_wins_over_parsed_symbols() {
    let (adapter, _) = adapter_for(
        r#"{"error":["EQuery:Unknown asset pair"],"result":{"XXBTZUSD":{"c":["52000.12"]}}}"#,
    );

    let error = adapter
        .fetch_batch(&[Pair::BtcUsd])
        .await
        .expect_err("provider errors must fail");

    assert_eq!(error.code(), "upstream.protocol_error");
    assert!(error.to_string().contains("EQuery:Unknown asset pair"));
}

#[tokio::test]
async fn missing_sections_are_treated_as_empty() {
    let (adapter, _) = adapter_for(r#"{}"#);

    let error = adapter
        .fetch_batch(&[Pair::BtcEur])
        .await
        .expect_err("empty result must fail");

    assert!(matches!(error, FetchError::SymbolNotFound { .. }));
}

#[tokio::test]
async fn single_key_response_answers_every_pair_in_the_batch() {
    // One decorated key: BTC/USD resolves by decoration, BTC/EUR falls back to the lone key.
    let (adapter, _) = adapter_for(r#"{"error":[],"result":{"XXBTZUSD":{"c":["52000.12"]}}}"#);

    let quotes = adapter
        .fetch_batch(&[Pair::BtcUsd, Pair::BtcEur])
        .await
        .expect("singleton fallback resolves both pairs");

    assert_eq!(
        quotes,
        vec![
            Quote::new(Pair::BtcUsd, 52000.12).expect("valid"),
            Quote::new(Pair::BtcEur, 52000.12).expect("valid"),
        ]
    );
}
