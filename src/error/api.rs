#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("[api] upstream rejected the request with code {code}: {msg}")]
	Upstream { code: i64, msg: String },
	#[error("[api] malformed upstream response ({reason}): {body}")]
	UpstreamSchema { reason: String, body: String },
}
