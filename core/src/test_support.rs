use std::cell::{Ref, RefCell};

use crate::client::AvaTaxClient;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

pub const BASE_URL: &str = "http://localhost:3000";

/// Answers every request with one fixed response and keeps what it saw.
pub struct Recorder {
    response: HttpResponse,
    seen: RefCell<Vec<HttpRequest>>,
}

impl Recorder {
    pub fn requests(&self) -> Ref<'_, Vec<HttpRequest>> {
        self.seen.borrow()
    }

    pub fn last(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("no request recorded")
    }
}

impl Transport for Recorder {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request);
        Ok(self.response.clone())
    }
}

pub fn client_answering(response: HttpResponse) -> AvaTaxClient<Recorder> {
    AvaTaxClient::new(
        BASE_URL,
        Recorder {
            response,
            seen: RefCell::new(Vec::new()),
        },
    )
}

pub fn client_returning(status: u16, body: &str) -> AvaTaxClient<Recorder> {
    client_answering(HttpResponse::new(status, body.as_bytes().to_vec()))
}
