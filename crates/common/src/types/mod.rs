use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Reply envelope shared by every JSON endpoint.
///
/// `self_link` is the request path (plus query) that produced the reply;
/// `data` is omitted for error replies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: String,
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Reply<T> {
    pub fn with_data(message: impl Into<String>, self_link: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), self_link: self_link.into(), data: Some(data) }
    }

    pub fn message_only(message: impl Into<String>, self_link: impl Into<String>) -> Self {
        Self { message: message.into(), self_link: self_link.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_without_data_omits_field() {
        let r: Reply<()> = Reply::message_only("Not found", "/ventures?id=9");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["message"], "Not found");
        assert_eq!(v["self"], "/ventures?id=9");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn reply_with_data_serializes_payload() {
        let r = Reply::with_data("Found", "/things", vec![1, 2]);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["data"], serde_json::json!([1, 2]));
    }
}
