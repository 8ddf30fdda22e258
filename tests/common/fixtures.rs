//! Canned provider payloads and blog exports used across harnesses.

use serde_json::json;

/// Model output for a remedies query: prose around a single-plant array.
pub const REMEDY_CONTENT: &str = concat!(
    "Sure! Here are some plants:\n",
    r#"{"plants": [{"name": "Mint", "scientific_name": "Mentha", "#,
    r#""uses": "Tea after meals", "healing_properties": "Eases digestion"}]}"#,
    "\nHope this helps."
);

/// Model output for the common remedies list.
pub const COMMON_REMEDY_CONTENT: &str = concat!(
    r#"{"plants": [{"name": "Chamomile", "scientific_name": "Matricaria chamomilla", "#,
    r#""uses": "Evening infusion", "healing_properties": "Calming"}, "#,
    r#"{"name": "Aloe", "scientific_name": "Aloe vera", "#,
    r#""uses": "Gel on burns", "healing_properties": "Soothes skin"}]}"#
);

/// Model output for a care query.
pub const CARE_CONTENT: &str = concat!(
    r#"{"plants": [{"name": "Basil", "scientific_name": "Ocimum basilicum", "#,
    r#""care": [{"watering": "keep soil moist"}, {"light": "full sun"}], "#,
    r#""climate": "warm"}]}"#
);

/// Model output missing a required field.
pub const INCOMPLETE_CONTENT: &str =
    r#"[{"name": "Mint", "scientific_name": "Mentha", "uses": "Tea"}]"#;

/// Wrap `content` in a chat-completions response body.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A chat-completions response with no choices.
pub fn empty_completion_body() -> serde_json::Value {
    json!({ "id": "chatcmpl-test", "object": "chat.completion", "choices": [] })
}

/// Image-search response whose first result has `thumbnail`.
pub fn image_body(thumbnail: &str) -> serde_json::Value {
    json!({ "images_results": [{ "position": 1, "thumbnail": thumbnail }] })
}

/// Blog export with three entries, in the collection's document layout.
pub const BLOG_EXPORT: &str = r#"[
  {
    "$id": "e1", "id_user": "u1", "name_user": "Ana",
    "entry_title": "Chamomile nights", "entry_content": "Helps me sleep.",
    "entry_image_url": "", "posted": true,
    "plants": ["Manzanilla", "Té verde"], "symptoms": ["Insomnio"],
    "$createdAt": "2024-03-01T10:00:00.000+00:00", "$updatedAt": "2024-03-01T10:00:00.000+00:00"
  },
  {
    "$id": "e2", "id_user": "u2", "name_user": "Luis",
    "entry_title": "Aloe for burns", "entry_content": "Works on sunburn.",
    "entry_image_url": "https://img.example/aloe.png", "posted": true,
    "plants": ["Aloe vera"], "symptoms": ["Quemaduras"],
    "$createdAt": "2024-03-02T10:00:00.000+00:00", "$updatedAt": "2024-03-02T11:00:00.000+00:00"
  },
  {
    "$id": "e3", "id_user": "u1", "name_user": "Ana",
    "entry_title": "Mint tea", "entry_content": "After lunch.",
    "entry_image_url": "", "posted": false,
    "plants": ["Menta"], "symptoms": ["Indigestión"],
    "$createdAt": "2024-03-03T10:00:00.000+00:00", "$updatedAt": "2024-03-03T10:00:00.000+00:00"
  }
]"#;
