#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("[service] no payouts configured in {path}")]
	NoPayouts { path: String },
}
