//! Contacts: people associated with a company who handle its tax collection
//! and filing responsibilities.

use crate::client::AvaTaxClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::options::{FetchOptions, QueryKey};
use crate::types::{ContactModel, ErrorDetail, FetchResult};

pub const CREATE_CONTACTS: Endpoint = Endpoint {
    name: "create_contacts",
    method: HttpMethod::Post,
    template: "/api/v2/companies/{companyId}/contacts",
    query: &[],
};

pub const DELETE_CONTACT: Endpoint = Endpoint {
    name: "delete_contact",
    method: HttpMethod::Delete,
    template: "/api/v2/companies/{companyId}/contacts/{id}",
    query: &[],
};

pub const GET_CONTACT: Endpoint = Endpoint {
    name: "get_contact",
    method: HttpMethod::Get,
    template: "/api/v2/companies/{companyId}/contacts/{id}",
    query: &[],
};

pub const LIST_CONTACTS_BY_COMPANY: Endpoint = Endpoint {
    name: "list_contacts_by_company",
    method: HttpMethod::Get,
    template: "/api/v2/companies/{companyId}/contacts",
    query: QueryKey::ALL,
};

pub const QUERY_CONTACTS: Endpoint = Endpoint {
    name: "query_contacts",
    method: HttpMethod::Get,
    template: "/api/v2/contacts",
    query: QueryKey::ALL,
};

pub const UPDATE_CONTACT: Endpoint = Endpoint {
    name: "update_contact",
    method: HttpMethod::Put,
    template: "/api/v2/companies/{companyId}/contacts/{id}",
    query: &[],
};

impl<T: Transport> AvaTaxClient<T> {
    pub fn create_contacts(&self, company_id: i32, contacts: &[ContactModel]) -> Result<Vec<ContactModel>, ApiError> {
        self.send(&CREATE_CONTACTS, &[company_id], contacts)
    }

    /// Mark a contact as deleted. Returns any warnings raised by the delete.
    pub fn delete_contact(&self, company_id: i32, id: i32) -> Result<Vec<ErrorDetail>, ApiError> {
        self.remove(&DELETE_CONTACT, &[company_id, id])
    }

    pub fn get_contact(&self, company_id: i32, id: i32) -> Result<ContactModel, ApiError> {
        self.fetch(&GET_CONTACT, &[company_id, id], None)
    }

    pub fn list_contacts_by_company(
        &self,
        company_id: i32,
        options: Option<&FetchOptions>,
    ) -> Result<FetchResult<ContactModel>, ApiError> {
        self.fetch(&LIST_CONTACTS_BY_COMPANY, &[company_id], options)
    }

    pub fn query_contacts(&self, options: Option<&FetchOptions>) -> Result<FetchResult<ContactModel>, ApiError> {
        self.fetch(&QUERY_CONTACTS, &[], options)
    }

    /// Replace the contact at this URL with `contact`.
    ///
    /// This is a full replace, not a patch: any field left as `None` is sent
    /// as `null` and cleared on the server.
    pub fn update_contact(&self, company_id: i32, id: i32, contact: &ContactModel) -> Result<ContactModel, ApiError> {
        self.send(&UPDATE_CONTACT, &[company_id, id], contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client_returning;

    #[test]
    fn update_contact_puts_full_body() {
        let client = client_returning(200, r#"{"id":7,"companyId":3,"contactCode":"AP","firstName":"Grace"}"#);
        let contact = ContactModel {
            contact_code: "AP".to_string(),
            first_name: Some("Grace".to_string()),
            ..Default::default()
        };
        let updated = client.update_contact(3, 7, &contact).unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Grace"));
        assert!(updated.email.is_none());

        let req = client.transport().last();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/v2/companies/3/contacts/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.as_object().unwrap().contains_key("email"));
        assert!(body["email"].is_null());
    }

    #[test]
    fn list_contacts_paginates() {
        let client = client_returning(
            200,
            r#"{"@recordsetCount":12,"value":[{"id":3,"contactCode":"C3"}],"@nextLink":"/api/v2/companies/1/contacts?$top=1&$skip=3"}"#,
        );
        let options = FetchOptions::new().top(1).skip(2).order_by("id ASC");
        let page = client.list_contacts_by_company(1, Some(&options)).unwrap();
        assert_eq!(page.count, 12);
        assert_eq!(page.value[0].contact_code, "C3");
        assert!(page.has_more());

        let req = client.transport().last();
        assert_eq!(
            req.query,
            vec![
                ("$top".to_string(), "1".to_string()),
                ("$skip".to_string(), "2".to_string()),
                ("$orderBy".to_string(), "id ASC".to_string()),
            ]
        );
    }

    #[test]
    fn query_contacts_hits_global_path() {
        let client = client_returning(200, r#"{"@recordsetCount":0,"value":[]}"#);
        client.query_contacts(None).unwrap();
        assert_eq!(client.transport().last().url, "http://localhost:3000/api/v2/contacts");
    }

    #[test]
    fn delete_contact_reports_warnings() {
        let client = client_returning(
            200,
            r#"[{"code":"ContactInUse","message":"Contact is referenced by a filing","severity":"Warning"}]"#,
        );
        let details = client.delete_contact(3, 7).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].code.as_deref(), Some("ContactInUse"));
    }

    #[test]
    fn get_missing_contact_is_not_found() {
        let client = client_returning(404, r#"{"error":{"code":"EntityNotFoundError"}}"#);
        let err = client.get_contact(3, 99).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
