// serpshare-core/src/response_parser.rs
//! Reads recorded keyword-volume and SERP API responses into a [`KeywordQuery`].
//!
//! A recording is a JSON array of `{ "endpoint": ..., "data": { "tasks": [...] } }`
//! entries. Only two endpoints matter here: `ai_keyword_search_volume` gives
//! the keyword and its volume, `serp_google_organic_live_advanced` gives the
//! ranked organic results.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::candidate::{KeywordQuery, RawCandidate};

pub const VOLUME_ENDPOINT: &str = "ai_keyword_search_volume";
pub const SERP_ENDPOINT: &str = "serp_google_organic_live_advanced";

const STATUS_OK: i64 = 20000;

fn task_succeeded(task: &Value, endpoint: &str) -> bool {
    let status = task.get("status_code").and_then(Value::as_i64);
    if status == Some(STATUS_OK) {
        return true;
    }
    warn!(
        "Skipping {} task with status {:?}: {}",
        endpoint,
        status,
        task.get("status_message").and_then(Value::as_str).unwrap_or("no message")
    );
    false
}

fn items(value: &Value) -> impl Iterator<Item = &Value> {
    value.get("items").and_then(Value::as_array).into_iter().flatten()
}

fn results(task: &Value) -> impl Iterator<Item = &Value> {
    task.get("result").and_then(Value::as_array).into_iter().flatten()
}

fn parse_volume_task(task: &Value) -> Option<(String, Option<f64>)> {
    results(task).flat_map(|r| items(r)).find_map(|item| {
        let keyword = item.get("keyword")?.as_str()?.to_string();
        Some((keyword, item.get("ai_search_volume").and_then(Value::as_f64)))
    })
}

fn text_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_serp_task(task: &Value) -> Vec<RawCandidate> {
    let mut candidates = Vec::new();
    let mut paa_domains: HashSet<String> = HashSet::new();

    for item in results(task).flat_map(|r| items(r)) {
        match item.get("type").and_then(Value::as_str) {
            Some("organic") => candidates.push(RawCandidate {
                domain: text_field(item, "domain"),
                rank_absolute: item.get("rank_absolute").and_then(Value::as_i64),
                page: item
                    .get("page")
                    .and_then(Value::as_u64)
                    .and_then(|p| u32::try_from(p).ok()),
                title: text_field(item, "title"),
                description: text_field(item, "description"),
                in_people_also_ask: Some(false),
                is_featured_snippet: item.get("is_featured_snippet").and_then(Value::as_bool),
            }),
            Some("people_also_ask") => {
                for question in items(item) {
                    let expanded = question.get("expanded_element").and_then(Value::as_array);
                    for element in expanded.into_iter().flatten() {
                        if let Some(domain) = element.get("domain").and_then(Value::as_str) {
                            paa_domains.insert(domain.to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    for candidate in &mut candidates {
        if let Some(domain) = &candidate.domain {
            candidate.in_people_also_ask = Some(paa_domains.contains(domain));
        }
    }
    debug!(
        "Parsed {} organic results; {} domains appear in People Also Ask.",
        candidates.len(),
        paa_domains.len()
    );
    candidates
}

/// Builds a query from an already parsed response array.
///
/// Failed tasks are skipped with a warning. A missing keyword or a missing
/// SERP result is an error; a missing volume becomes zero.
pub fn parse_api_responses_value(responses: &Value) -> Result<KeywordQuery> {
    let Some(entries) = responses.as_array() else {
        bail!("API responses must be a JSON array");
    };

    let mut keyword_volume: Option<(String, Option<f64>)> = None;
    let mut serp: Option<Vec<RawCandidate>> = None;

    for entry in entries {
        let endpoint = entry.get("endpoint").and_then(Value::as_str).unwrap_or_default();
        let tasks = entry
            .get("data")
            .and_then(|d| d.get("tasks"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten();

        for task in tasks {
            match endpoint {
                VOLUME_ENDPOINT if task_succeeded(task, endpoint) => {
                    if let Some(found) = parse_volume_task(task) {
                        keyword_volume = Some(found);
                    }
                }
                SERP_ENDPOINT if task_succeeded(task, endpoint) => serp = Some(parse_serp_task(task)),
                VOLUME_ENDPOINT | SERP_ENDPOINT => {}
                other => debug!("Ignoring task from endpoint '{}'.", other),
            }
        }
    }

    let Some((keyword, volume)) = keyword_volume else {
        bail!("No keyword found in the {} responses", VOLUME_ENDPOINT);
    };
    let Some(candidates) = serp else {
        bail!("No {} result found for keyword '{}'", SERP_ENDPOINT, keyword);
    };

    Ok(KeywordQuery {
        keyword,
        keyword_volume: Some(volume.unwrap_or(0.0)),
        candidates,
    })
}

/// Parses a recorded response array from a JSON string.
pub fn parse_api_responses(json: &str) -> Result<KeywordQuery> {
    let value: Value = serde_json::from_str(json).context("API responses are not valid JSON")?;
    parse_api_responses_value(&value)
}

/// Loads a query from a file holding either a response array or a
/// `KeywordQuery` object.
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<KeywordQuery> {
    let path = path.as_ref();
    info!("Loading query data from: {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    let query = if value.is_array() {
        parse_api_responses_value(&value)
    } else {
        serde_json::from_value::<KeywordQuery>(value).context("Expected a keyword query object")
    }
    .with_context(|| format!("Invalid query data in {}", path.display()))?;

    info!(
        "Loaded keyword '{}' with volume {} and {} SERP results.",
        query.keyword,
        query.volume(),
        query.candidates.len()
    );
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recording() -> Value {
        json!([
            {
                "endpoint": "ai_keyword_search_volume",
                "data": { "tasks": [ { "status_code": 20000, "result": [ { "items": [
                    { "keyword": "faceless video ai", "ai_search_volume": 850 }
                ] } ] } ] }
            },
            {
                "endpoint": "serp_google_organic_live_advanced",
                "data": { "tasks": [ { "status_code": 20000, "result": [ { "items": [
                    { "type": "organic", "rank_absolute": 1, "page": 1, "domain": "faceless.video",
                      "title": "Faceless", "description": "AI video", "is_featured_snippet": false },
                    { "type": "people_also_ask", "items": [
                        { "expanded_element": [ { "domain": "www.videoinu.com" } ] }
                    ] },
                    { "type": "organic", "rank_absolute": 3, "domain": "www.videoinu.com",
                      "title": "Videoinu", "description": null }
                ] } ] } ] }
            }
        ])
    }

    #[test]
    fn test_parse_recording() {
        let query = parse_api_responses_value(&recording()).unwrap();
        assert_eq!(query.keyword, "faceless video ai");
        assert_eq!(query.volume(), 850.0);
        assert_eq!(query.candidates.len(), 2);
        assert_eq!(query.candidates[0].in_people_also_ask, Some(false));
        assert_eq!(query.candidates[1].in_people_also_ask, Some(true));
        assert_eq!(query.candidates[1].rank_absolute, Some(3));
        assert_eq!(query.candidates[1].description, None);
    }

    #[test]
    fn test_failed_volume_task_is_an_error() {
        let mut value = recording();
        value[0]["data"]["tasks"][0]["status_code"] = json!(40501);
        let err = parse_api_responses_value(&value).unwrap_err();
        assert!(err.to_string().contains("No keyword"));
    }

    #[test]
    fn test_missing_serp_is_an_error() {
        let value = json!([recording()[0].clone()]);
        assert!(parse_api_responses_value(&value).unwrap_err().to_string().contains(SERP_ENDPOINT));
    }

    #[test]
    fn test_missing_volume_is_zero() {
        let mut value = recording();
        value[0]["data"]["tasks"][0]["result"][0]["items"][0]["ai_search_volume"] = Value::Null;
        assert_eq!(parse_api_responses_value(&value).unwrap().volume(), 0.0);
    }

    #[test]
    fn test_not_an_array() {
        assert!(parse_api_responses("{}").is_err());
        assert!(parse_api_responses("not json").is_err());
    }
}
