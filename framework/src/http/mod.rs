mod body;
mod request;
mod response;

pub use body::{collect_body, parse_form, parse_json};
pub use request::Request;
pub use response::{HttpResponse, Redirect, Response};
