//! JSON request bodies, one per processing endpoint.
//!
//! Fields are kept as raw JSON values until validation. Absent keys and
//! falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) are all rejected
//! with [`ComposeError::MissingData`]; any other non-string value is an
//! invalid body.

use serde::Deserialize;
use serde_json::Value;

use crate::services::compose::{ComposeError, CompositionRequest};

/// Body of `POST /process-image1`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeadlineBody {
    pub image_url_1: Option<Value>,
    pub image_1_text: Option<Value>,
    pub footer_text: Option<Value>,
}

/// Body of `POST /process-image2`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BulletsBody {
    pub image_url_2: Option<Value>,
    pub image_2_text: Option<Value>,
    pub footer_text: Option<Value>,
}

/// Body of `POST /process-image3`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OverlayBody {
    pub background_url: Option<Value>,
    pub overlay_url: Option<Value>,
    pub overlay_text: Option<Value>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Every field must be present and truthy.
fn ensure_present(fields: [&Option<Value>; 3]) -> Result<(), ComposeError> {
    if fields.iter().all(|field| field.as_ref().is_some_and(is_truthy)) {
        Ok(())
    } else {
        Err(ComposeError::MissingData)
    }
}

fn text(value: Option<Value>) -> Result<String, ComposeError> {
    Ok(serde_json::from_value(value.unwrap_or_default())?)
}

impl HeadlineBody {
    pub fn into_request(self) -> Result<CompositionRequest, ComposeError> {
        ensure_present([&self.image_url_1, &self.image_1_text, &self.footer_text])?;
        Ok(CompositionRequest::Headline {
            image_url: text(self.image_url_1)?,
            text: text(self.image_1_text)?,
            footer: text(self.footer_text)?,
        })
    }
}

impl BulletsBody {
    pub fn into_request(self) -> Result<CompositionRequest, ComposeError> {
        ensure_present([&self.image_url_2, &self.image_2_text, &self.footer_text])?;
        Ok(CompositionRequest::Bullets {
            image_url: text(self.image_url_2)?,
            text: text(self.image_2_text)?,
            footer: text(self.footer_text)?,
        })
    }
}

impl OverlayBody {
    pub fn into_request(self) -> Result<CompositionRequest, ComposeError> {
        ensure_present([&self.background_url, &self.overlay_url, &self.overlay_text])?;
        Ok(CompositionRequest::Overlay {
            background_url: text(self.background_url)?,
            overlay_url: text(self.overlay_url)?,
            title: text(self.overlay_text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headline(value: serde_json::Value) -> Result<CompositionRequest, ComposeError> {
        serde_json::from_value::<HeadlineBody>(value).unwrap().into_request()
    }

    #[test]
    fn complete_body_becomes_request() {
        let request = headline(json!({
            "image_url_1": "https://img/a.jpg",
            "image_1_text": "Big news",
            "footer_text": "@handle",
        }))
        .unwrap();
        assert_eq!(
            request,
            CompositionRequest::Headline {
                image_url: "https://img/a.jpg".into(),
                text: "Big news".into(),
                footer: "@handle".into(),
            }
        );
    }

    #[test]
    fn absent_null_and_empty_fields_are_missing() {
        for body in [
            json!({ "image_1_text": "t", "footer_text": "f" }),
            json!({ "image_url_1": null, "image_1_text": "t", "footer_text": "f" }),
            json!({ "image_url_1": "u", "image_1_text": "", "footer_text": "f" }),
            json!({}),
        ] {
            assert!(matches!(headline(body), Err(ComposeError::MissingData)));
        }
    }

    #[test]
    fn falsy_values_are_missing() {
        for falsy in [json!(false), json!(0), json!(0.0), json!([]), json!({}), json!("")] {
            let body = json!({ "image_url_1": "u", "image_1_text": falsy, "footer_text": "f" });
            assert!(matches!(headline(body), Err(ComposeError::MissingData)));
        }
    }

    #[test]
    fn truthy_non_string_is_an_invalid_body() {
        for value in [json!(true), json!(5), json!(["a"]), json!({ "a": 1 })] {
            let body = json!({ "image_url_1": value, "image_1_text": "t", "footer_text": "f" });
            assert!(matches!(headline(body), Err(ComposeError::InvalidBody(_))));
        }
    }

    #[test]
    fn missing_data_wins_over_a_wrong_type() {
        let body = json!({ "image_url_1": 5, "image_1_text": "t" });
        assert!(matches!(headline(body), Err(ComposeError::MissingData)));
    }

    #[test]
    fn whitespace_only_text_is_present() {
        assert!(headline(json!({ "image_url_1": "u", "image_1_text": " ", "footer_text": "f" })).is_ok());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let body: OverlayBody = serde_json::from_value(json!({
            "background_url": "b",
            "overlay_url": "o",
            "overlay_text": "t",
            "extra": 1,
        }))
        .unwrap();
        assert!(body.into_request().is_ok());
    }

    #[test]
    fn bullets_fields_do_not_satisfy_headline() {
        let body: BulletsBody = serde_json::from_value(json!({
            "image_url_1": "u",
            "image_1_text": "t",
            "footer_text": "f",
        }))
        .unwrap();
        assert!(matches!(body.into_request(), Err(ComposeError::MissingData)));
    }
}
