use serde::Serialize;

/// Payload for the health probe endpoint.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}
