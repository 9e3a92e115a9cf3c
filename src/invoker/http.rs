use crate::invoker::InvokerError;
use serde_json::{Map, Value};
use std::time::Duration;

/// POSTs `payload` as JSON and reads a JSON body back.
pub fn post_json(
    endpoint: &str,
    headers: &[(String, String)],
    payload: &Map<String, Value>,
    timeout: Option<Duration>,
) -> Result<Value, InvokerError> {
    let mut builder = ureq::AgentBuilder::new();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let agent = builder.build();

    let mut request = agent.post(endpoint);
    for (name, value) in headers {
        request = request.set(name, value);
    }

    let response = request
        .send_json(payload)
        .map_err(|err| InvokerError::Http(format!("POST {endpoint} failed: {err}")))?;
    response
        .into_json::<Value>()
        .map_err(|err| InvokerError::Http(format!("invalid json response from {endpoint}: {err}")))
}
