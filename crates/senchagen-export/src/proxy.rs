//! REST proxy descriptor derived from the model name.

use crate::jsobject::JsValue;

/// Ajax proxy configuration for one model.
///
/// A pure function of the model name: the lower-cased name becomes the
/// REST resource segment and the reader/writer root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    resource: String,
}

impl ProxyConfig {
    pub fn for_model(model_name: &str) -> Self {
        Self {
            resource: model_name.to_lowercase(),
        }
    }

    pub fn to_value(&self) -> JsValue {
        JsValue::Obj(vec![
            ("type".to_string(), JsValue::string("ajax")),
            ("url".to_string(), JsValue::string(format!("/data/{}", self.resource))),
            ("api".to_string(), self.api()),
            ("reader".to_string(), self.reader()),
            ("writer".to_string(), self.writer()),
        ])
    }

    fn api(&self) -> JsValue {
        let resource = &self.resource;
        JsValue::Obj(vec![
            ("read".to_string(), JsValue::string(format!("/data/{resource}"))),
            (
                "update".to_string(),
                JsValue::string(format!("/data/{resource}/update")),
            ),
            (
                "create".to_string(),
                JsValue::string(format!("/data/{resource}/add")),
            ),
            (
                "destroy".to_string(),
                JsValue::string(format!("/data/{resource}/destroy")),
            ),
        ])
    }

    fn reader(&self) -> JsValue {
        JsValue::Obj(vec![
            ("type".to_string(), JsValue::string("json")),
            ("root".to_string(), JsValue::string(&self.resource)),
            ("messageProperty".to_string(), JsValue::string("message")),
        ])
    }

    fn writer(&self) -> JsValue {
        JsValue::Obj(vec![
            ("type".to_string(), JsValue::string("json")),
            ("root".to_string(), JsValue::string(&self.resource)),
            ("encode".to_string(), JsValue::Bool(true)),
            ("expandData".to_string(), JsValue::Bool(true)),
        ])
    }
}
