use reqwest::{Client, RequestBuilder, Response};

use crate::api::types::{LinkLookup, ServerMessage};
use crate::error::{CookError, Result};

#[derive(Clone)]
pub struct CookClient {
    client: Client,
    origin: String,
    token: Option<String>,
}

impl CookClient {
    /// `origin` is the server's base URL, e.g. `http://127.0.0.1:8080`.
    /// A non-empty `token` is sent as the session cookie.
    pub fn new(origin: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn new_recipe_url(&self) -> String {
        format!("{}/recipe/new", self.origin)
    }

    fn with_session(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header("Cookie", format!("token={}", token)),
            None => req,
        }
    }

    pub async fn lookup_link(&self, query: &str) -> Result<LinkLookup> {
        let req = self
            .client
            .get(format!("{}/recipe/link", self.origin))
            .query(&[("query", query)]);
        let resp = self.with_session(req).send().await?;
        let resp = ensure_success(resp).await?;

        let body = resp.text().await?;
        Ok(LinkLookup::decode(&body))
    }

    /// Posts the new-recipe form the way the page's htmx form does and
    /// returns the message the server attached, if any.
    ///
    /// Without a session the recipe is submitted as pending, the only kind
    /// of create the server accepts from anonymous users.
    pub async fn create_recipe(
        &self,
        fields: &[(&'static str, String)],
    ) -> Result<Option<ServerMessage>> {
        let mut req = self
            .client
            .post(format!("{}/recipe", self.origin))
            .header("HX-Request", "true")
            .form(fields);
        if self.token.is_none() {
            req = req.query(&[("pending", "true")]);
        }
        let resp = self.with_session(req).send().await?;
        let resp = ensure_success(resp).await?;

        let message = resp
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok())
            .and_then(ServerMessage::from_trigger_header);

        // Errors are rendered as a 200 component with the real code in a header.
        let error_code = resp
            .headers()
            .get("Errorcode")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u16>().ok());
        if let Some(status) = error_code {
            // An empty message falls back to the status wording in `user_message`.
            let message = message.map(|m| m.value).unwrap_or_default();
            return Err(CookError::Api { status, message });
        }

        Ok(message)
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(CookError::Api { status, message })
}
