//! Document upload.
//!
//! Uploads are the one call that cannot go through the JSON executor (the
//! body is multipart), so this path builds its own request but reuses the
//! same bearer header, response mapping, and hook lifecycle.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::NurseryApi;
use crate::api::{ApiError, RequestHooks};

impl NurseryApi {
    /// Upload a document (photo, consent form, medical note), optionally
    /// attached to a child. Returns the server's record of the upload.
    pub async fn upload_document(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        child_id: Option<i64>,
        hooks: RequestHooks,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/uploads", self.client().base_url());
        let token = self.client().session().token();
        let http = self.client().http().clone();
        let filename = filename.to_string();

        crate::api::drive(hooks, async move {
            let part = Part::bytes(bytes).file_name(filename);
            let mut form = Form::new().part("file", part);
            if let Some(id) = child_id {
                form = form.text("child_id", id.to_string());
            }

            let mut req = http.post(&url).multipart(form);
            if let Some(token) = token {
                req = req.bearer_auth(token);
            }

            let resp = req.send().await?;
            crate::api::read_json_response(resp).await
        })
        .await
    }
}
