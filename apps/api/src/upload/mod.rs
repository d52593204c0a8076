// Resume upload: multipart intake → text extraction → analysis webhook.

pub mod handlers;
pub mod models;
