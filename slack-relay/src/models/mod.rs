pub mod message;

pub use message::{Message, SendMessageRequest, SendMessageResponse, StatusResponse};
