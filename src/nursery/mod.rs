//! Typed endpoint surface over the shared executor.
//!
//! One method per logical operation. List endpoints go through the keyed
//! de-duplication path so that two concurrent loads of the same page
//! collapse into a single HTTP call.

pub mod models;
mod reports;
mod uploads;

pub use models::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiClient, ApiError, RequestHooks, RequestOptions};

/// The nursery API: children, classrooms, teachers, payments, reports,
/// and document uploads.
#[derive(Clone)]
pub struct NurseryApi {
    client: ApiClient,
}

impl NurseryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        hooks: RequestHooks,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        decode(self.client.request(endpoint, hooks, options).await?)
    }

    /// Keyed list fetch: identical endpoint + query attaches to the
    /// in-flight call instead of duplicating it.
    async fn call_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        hooks: RequestHooks,
        query: &[(String, String)],
    ) -> Result<Paged<T>, ApiError> {
        let key = dedup_key(endpoint, query);
        let options = RequestOptions::get().with_query(query);
        decode(
            self.client
                .request_deduped(&key, endpoint, hooks, options)
                .await?,
        )
    }

    // ── Children ─────────────────────────────────────────────────

    pub async fn list_children(
        &self,
        hooks: RequestHooks,
        query: &[(String, String)],
    ) -> Result<Paged<Child>, ApiError> {
        self.call_list("/children", hooks, query).await
    }

    pub async fn child(&self, id: i64, hooks: RequestHooks) -> Result<Child, ApiError> {
        self.call(&format!("/children/{id}"), hooks, RequestOptions::get())
            .await
    }

    pub async fn enroll_child(
        &self,
        child: &NewChild,
        hooks: RequestHooks,
    ) -> Result<Child, ApiError> {
        self.call("/children", hooks, RequestOptions::post(to_body(child)?))
            .await
    }

    pub async fn update_child(
        &self,
        id: i64,
        patch: Value,
        hooks: RequestHooks,
    ) -> Result<Child, ApiError> {
        self.call(&format!("/children/{id}"), hooks, RequestOptions::put(patch))
            .await
    }

    pub async fn remove_child(&self, id: i64, hooks: RequestHooks) -> Result<(), ApiError> {
        self.client
            .request(&format!("/children/{id}"), hooks, RequestOptions::delete())
            .await?;
        Ok(())
    }

    // ── Classrooms ───────────────────────────────────────────────

    pub async fn list_classrooms(
        &self,
        hooks: RequestHooks,
        query: &[(String, String)],
    ) -> Result<Paged<Classroom>, ApiError> {
        self.call_list("/classrooms", hooks, query).await
    }

    pub async fn classroom(&self, id: i64, hooks: RequestHooks) -> Result<Classroom, ApiError> {
        self.call(&format!("/classrooms/{id}"), hooks, RequestOptions::get())
            .await
    }

    pub async fn create_classroom(
        &self,
        classroom: &NewClassroom,
        hooks: RequestHooks,
    ) -> Result<Classroom, ApiError> {
        self.call("/classrooms", hooks, RequestOptions::post(to_body(classroom)?))
            .await
    }

    /// Put a teacher in charge of a classroom.
    pub async fn assign_teacher(
        &self,
        classroom_id: i64,
        teacher_id: i64,
        hooks: RequestHooks,
    ) -> Result<Classroom, ApiError> {
        let body = serde_json::json!({ "teacher_id": teacher_id });
        self.call(
            &format!("/classrooms/{classroom_id}/teacher"),
            hooks,
            RequestOptions::put(body),
        )
        .await
    }

    pub async fn remove_classroom(&self, id: i64, hooks: RequestHooks) -> Result<(), ApiError> {
        self.client
            .request(&format!("/classrooms/{id}"), hooks, RequestOptions::delete())
            .await?;
        Ok(())
    }

    // ── Teachers ─────────────────────────────────────────────────

    pub async fn list_teachers(
        &self,
        hooks: RequestHooks,
        query: &[(String, String)],
    ) -> Result<Paged<Teacher>, ApiError> {
        self.call_list("/teachers", hooks, query).await
    }

    pub async fn teacher(&self, id: i64, hooks: RequestHooks) -> Result<Teacher, ApiError> {
        self.call(&format!("/teachers/{id}"), hooks, RequestOptions::get())
            .await
    }

    pub async fn add_teacher(
        &self,
        teacher: &NewTeacher,
        hooks: RequestHooks,
    ) -> Result<Teacher, ApiError> {
        self.call("/teachers", hooks, RequestOptions::post(to_body(teacher)?))
            .await
    }

    pub async fn remove_teacher(&self, id: i64, hooks: RequestHooks) -> Result<(), ApiError> {
        self.client
            .request(&format!("/teachers/{id}"), hooks, RequestOptions::delete())
            .await?;
        Ok(())
    }

    // ── Payments ─────────────────────────────────────────────────

    pub async fn list_payments(
        &self,
        child_id: Option<i64>,
        hooks: RequestHooks,
        query: &[(String, String)],
    ) -> Result<Paged<Payment>, ApiError> {
        let mut query = query.to_vec();
        if let Some(id) = child_id {
            query.push(("child_id".to_string(), id.to_string()));
        }
        self.call_list("/payments", hooks, &query).await
    }

    pub async fn record_payment(
        &self,
        payment: &NewPayment,
        hooks: RequestHooks,
    ) -> Result<Payment, ApiError> {
        self.call("/payments", hooks, RequestOptions::post(to_body(payment)?))
            .await
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn dedup_key(endpoint: &str, query: &[(String, String)]) -> String {
    let mut key = endpoint.to_string();
    for (name, value) in query {
        key.push_str(&format!("&{name}={value}"));
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_includes_query() {
        let query = vec![("page".to_string(), "2".to_string())];
        assert_eq!(dedup_key("/children", &query), "/children&page=2");
    }

    #[test]
    fn dedup_key_differs_per_page() {
        let p1 = vec![("page".to_string(), "1".to_string())];
        let p2 = vec![("page".to_string(), "2".to_string())];
        assert_ne!(dedup_key("/children", &p1), dedup_key("/children", &p2));
    }

    #[test]
    fn decode_reports_shape_errors() {
        let result: Result<Child, ApiError> = decode(serde_json::json!({"id": "not a number"}));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
