use serde::{Deserialize, Serialize};

use postcord_format::Embed;

/// Request body for a webhook execution.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    /// Plain message text, entities decoded.
    pub content: String,

    /// Bot display name.
    pub username: String,

    /// Bot avatar URL.
    pub avatar_url: String,

    /// At most one rich embed; absent when none was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
}

/// Response from a webhook execution, when the endpoint returns a body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookResponse {
    /// Message ID.
    pub id: Option<String>,
    /// Channel ID.
    pub channel_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use postcord_format::WireField;

    use super::*;

    fn embed() -> Embed {
        Embed {
            title: Some("Hello".into()),
            kind: "rich".into(),
            description: None,
            url: Some("https://blog.test/hello".into()),
            timestamp: "2024-01-01T00:00:00+00:00".into(),
            footer: None,
            author: None,
            fields: vec![WireField {
                name: "Tags".into(),
                value: "news".into(),
                inline: None,
            }],
            image: None,
        }
    }

    #[test]
    fn payload_without_embed() {
        let payload = WebhookPayload {
            content: "Hi".into(),
            username: "Postcord".into(),
            avatar_url: String::new(),
            embeds: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["content"], "Hi");
        assert_eq!(json["username"], "Postcord");
        assert_eq!(json["avatar_url"], "");
        assert!(json.get("embeds").is_none());
    }

    #[test]
    fn payload_with_single_embed() {
        let payload = WebhookPayload {
            content: String::new(),
            username: "Postcord".into(),
            avatar_url: String::new(),
            embeds: Some(vec![embed()]),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["embeds"].as_array().unwrap().len(), 1);
        assert_eq!(json["embeds"][0]["type"], "rich");
        assert_eq!(json["embeds"][0]["fields"][0]["name"], "Tags");
        assert!(json["embeds"][0].get("description").is_none());
    }

    #[test]
    fn webhook_response_deserializes() {
        let json = r#"{"id":"12345","channel_id":"67890"}"#;
        let resp: WebhookResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id.as_deref(), Some("12345"));
        assert_eq!(resp.channel_id.as_deref(), Some("67890"));
    }
}
