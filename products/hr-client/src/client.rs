use products_hr::{Employee, EmployeeId, EmployeePatch, NewEmployee, search};
use reqwest::RequestBuilder;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Action, ClientError, ClientResult};

const EMPLOYEES_PATH: &str = "/api/employees";

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone, Debug)]
pub struct EmployeeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EmployeeClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        let base = base_url.as_ref().trim_end_matches('/');
        Self {
            http,
            endpoint: format!("{base}{EMPLOYEES_PATH}"),
        }
    }

    fn member_url(&self, id: EmployeeId) -> String {
        format!("{}/{id}", self.endpoint)
    }

    pub async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.send(Action::List, self.http.get(&self.endpoint)).await
    }

    /// One list request, filtered locally by name, position, department or email.
    pub async fn search(&self, term: &str) -> ClientResult<Vec<Employee>> {
        let employees = self.list().await?;
        Ok(search::filter(employees, term))
    }

    pub async fn get(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.send(Action::Get, self.http.get(self.member_url(id)))
            .await
    }

    pub async fn create(&self, employee: &NewEmployee) -> ClientResult<Employee> {
        self.send(Action::Create, self.http.post(&self.endpoint).json(employee))
            .await
    }

    pub async fn update(&self, id: EmployeeId, patch: &EmployeePatch) -> ClientResult<Employee> {
        self.send(Action::Update, self.http.put(self.member_url(id)).json(patch))
            .await
    }

    /// Returns the removed record.
    pub async fn delete(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.send(Action::Delete, self.http.delete(self.member_url(id)))
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        action: Action,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        debug!(%action, "sending directory request");
        let response = request
            .send()
            .await
            .map_err(|err| fail(action, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            };
            return Err(fail(action, format!("{}: {message}", status.as_u16())));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| fail(action, format!("invalid response body: {err}")))
    }
}

fn fail(action: Action, reason: String) -> ClientError {
    warn!(%action, %reason, "directory request failed");
    ClientError::new(action, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_rooted_at_api_employees() {
        let client = EmployeeClient::new("http://localhost:3001/");
        assert_eq!(client.endpoint, "http://localhost:3001/api/employees");
        assert_eq!(client.member_url(7), "http://localhost:3001/api/employees/7");
    }
}
