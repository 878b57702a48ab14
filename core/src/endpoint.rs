//! Operation descriptors and path templating.
//!
//! Each exposed client method has one `Endpoint` constant naming its verb,
//! its path template and the query options it accepts. Templates use
//! `{name}` placeholders which are filled positionally from integer
//! identifiers, with no escaping.

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::options::QueryKey;

/// Immutable description of one REST operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub template: &'static str,
    pub query: &'static [QueryKey],
}

impl Endpoint {
    /// Placeholder names in the order they appear in the template.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        names
    }

    /// Substitute `params` into the template, left to right.
    pub fn path(&self, params: &[i32]) -> Result<String, ApiError> {
        let expected = self.placeholders().len();
        if expected != params.len() {
            return Err(ApiError::PathTemplate {
                template: self.template,
                expected,
                supplied: params.len(),
            });
        }

        let mut path = String::with_capacity(self.template.len() + params.len() * 8);
        let mut rest = self.template;
        for param in params {
            // Placeholder count was checked above.
            let (Some(start), Some(end)) = (rest.find('{'), rest.find('}')) else {
                break;
            };
            path.push_str(&rest[..start]);
            path.push_str(&param.to_string());
            rest = &rest[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: Endpoint = Endpoint {
        name: "download_batch",
        method: HttpMethod::Get,
        template: "/api/v2/companies/{companyId}/batches/{batchId}/files/{id}/attachment",
        query: &[],
    };

    const FLAT: Endpoint = Endpoint {
        name: "query_batches",
        method: HttpMethod::Get,
        template: "/api/v2/batches",
        query: QueryKey::ALL,
    };

    #[test]
    fn placeholders_in_order() {
        assert_eq!(NESTED.placeholders(), vec!["companyId", "batchId", "id"]);
        assert!(FLAT.placeholders().is_empty());
    }

    #[test]
    fn substitutes_positionally() {
        assert_eq!(
            NESTED.path(&[42, 7, 3]).unwrap(),
            "/api/v2/companies/42/batches/7/files/3/attachment"
        );
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        assert_eq!(FLAT.path(&[]).unwrap(), "/api/v2/batches");
    }

    #[test]
    fn negative_ids_are_rendered_verbatim() {
        let path = NESTED.path(&[-1, 0, 9]).unwrap();
        assert_eq!(path, "/api/v2/companies/-1/batches/0/files/9/attachment");
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let err = NESTED.path(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            ApiError::PathTemplate {
                expected: 3,
                supplied: 2,
                ..
            }
        ));
    }
}
