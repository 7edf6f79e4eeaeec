// crates.io
use bytes::Bytes;
use reqwest::{
	header::CONTENT_TYPE, Body, Client as RClient, ClientBuilder, IntoUrl, Method, RequestBuilder,
};
use serde::de::DeserializeOwned;
// self
use crate::prelude::*;

pub trait Http {
	async fn get<U>(&self, uri: U) -> Result<Bytes>
	where
		U: IntoUrl;

	async fn post<U, B>(&self, uri: U, body: B) -> Result<Bytes>
	where
		U: IntoUrl,
		B: Into<Body>;
}

pub trait Response
where
	Self: AsRef<[u8]>,
{
	fn json<D>(&self) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let s = self.as_ref();

		match serde_json::from_slice(s) {
			Ok(d) => Ok(d),
			Err(e) => {
				let body = String::from_utf8_lossy(s).into_owned();

				tracing::error!("{body}");

				Err(ApiError::UpstreamSchema { reason: e.to_string(), body })?
			},
		}
	}

	fn text(&self) -> String {
		String::from_utf8_lossy(self.as_ref()).into()
	}
}
impl Response for Bytes {}

#[derive(Debug)]
pub struct Client {
	http: RClient,
	pub(crate) bearer: Option<String>,
}
impl Client {
	pub fn new(user_agent: &str, bearer: Option<String>) -> Result<Self> {
		Ok(Self { http: ClientBuilder::new().user_agent(user_agent).build()?, bearer })
	}

	// Every request of this client goes through here, so the credential is attached exactly once.
	fn request<U>(&self, method: Method, uri: U) -> RequestBuilder
	where
		U: IntoUrl,
	{
		let req = self.http.request(method, uri);

		match &self.bearer {
			Some(b) => req.bearer_auth(b),
			None => req,
		}
	}

	fn post_request<U, B>(&self, uri: U, body: B) -> RequestBuilder
	where
		U: IntoUrl,
		B: Into<Body>,
	{
		self.request(Method::POST, uri).header(CONTENT_TYPE, "text/plain").body(body)
	}
}
impl Http for Client {
	async fn get<U>(&self, uri: U) -> Result<Bytes>
	where
		U: IntoUrl,
	{
		Ok(self.request(Method::GET, uri).send().await?.bytes().await?)
	}

	async fn post<U, B>(&self, uri: U, body: B) -> Result<Bytes>
	where
		U: IntoUrl,
		B: Into<Body>,
	{
		Ok(self.post_request(uri, body).send().await?.bytes().await?)
	}
}


#[cfg(test)]
pub mod mock {
	// std
	use std::{collections::HashMap, sync::Mutex};
	// self
	use super::*;

	// Canned responses keyed by the full request URI. Unknown URIs answer with an empty body.
	#[derive(Debug, Default)]
	pub struct MockHttp {
		gets: HashMap<String, String>,
		posts: HashMap<String, String>,
		posted: Mutex<Vec<(String, String)>>,
	}
	impl MockHttp {
		pub fn with_get(mut self, uri: &str, body: &str) -> Self {
			self.gets.insert(uri.into(), body.into());

			self
		}

		pub fn with_post(mut self, uri: &str, body: &str) -> Self {
			self.posts.insert(uri.into(), body.into());

			self
		}

		pub fn posted(&self) -> Vec<(String, String)> {
			self.posted.lock().unwrap().clone()
		}
	}
	impl Http for MockHttp {
		async fn get<U>(&self, uri: U) -> Result<Bytes>
		where
			U: IntoUrl,
		{
			Ok(self.gets.get(uri.as_str()).cloned().unwrap_or_default().into())
		}

		async fn post<U, B>(&self, uri: U, body: B) -> Result<Bytes>
		where
			U: IntoUrl,
			B: Into<Body>,
		{
			let uri = uri.as_str().to_owned();
			let body = body.into();
			let body = String::from_utf8_lossy(body.as_bytes().unwrap_or_default()).into_owned();
			let res = self.posts.get(&uri).cloned().unwrap_or_default();

			self.posted.lock().unwrap().push((uri, body));

			Ok(res.into())
		}
	}
}
