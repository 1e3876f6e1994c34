use ltp_core::Pair;
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PairsResponse {
    pairs: Vec<Pair>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn pairs() -> Result<Value, CliError> {
    Ok(serde_json::to_value(PairsResponse {
        pairs: Pair::catalog(),
    })?)
}

pub fn health() -> Result<Value, CliError> {
    Ok(serde_json::to_value(HealthResponse { status: "ok" })?)
}
