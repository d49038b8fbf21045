//! Row value resolution.
//!
//! Turns raw query result rows into display values: selector decode,
//! then a per-field transform or declared type coercion, then optional
//! translation.

use crate::config::ListConfig;
use crate::error::{ListError, ListResult};
use crate::selector::SelectorRegistry;
use crate::types::ListField;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Message catalog lookup.
///
/// Returns the translated message for a key, or the key itself when no
/// translation exists, matching the usual translator contract.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, domain: Option<&str>) -> String;
}

/// Resolves header labels and row cell values for a list.
pub struct ValueAccessor {
    config: ListConfig,
    selectors: Arc<SelectorRegistry>,
    translator: Option<Arc<dyn Translator>>,
    /// Output format name passed through to value transforms.
    format: String,
}

impl ValueAccessor {
    pub fn new(
        config: ListConfig,
        selectors: Arc<SelectorRegistry>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        Self {
            config,
            selectors,
            translator,
            format: "html".to_string(),
        }
    }

    /// Change the output format name handed to value transforms.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Header value for a field: the label, translated when the list-level
    /// translate toggle is on.
    pub fn header_value(&self, field: &ListField) -> ListResult<String> {
        if !self.config.translate {
            return Ok(field.label.clone());
        }

        let translator = self.translator()?;
        Ok(translator.translate(&field.label, self.config.translation_domain.as_deref()))
    }

    /// Cell value for a field in a result row.
    ///
    /// The field's selector decodes the raw row, then the value passes
    /// through the field's transform (or, absent one, its declared type
    /// coercion), then through translation when configured.
    pub fn field_value(&self, field: &ListField, row: &Map<String, Value>) -> ListResult<Value> {
        let selector = self.selectors.get(&field.selector).ok_or_else(|| {
            ListError::UnknownSelector {
                field_id: field.id.clone(),
                name: field.selector.clone(),
            }
        })?;

        let mut value = selector.get_value(row, &field.id);

        if let Some(transform) = &field.value_transform {
            value = (transform.0)(value, &self.format);
        } else if let Some(field_type) = &field.field_type {
            value = field_type.coerce(value, &self.format);
        }

        self.translate_value(field, value)
    }

    /// Translate a resolved value when the field asks for it.
    ///
    /// String values translate when `translate` is set; nulls translate
    /// when `translate_null` is set. The translation key is the value
    /// prefixed with the field's translation prefix.
    fn translate_value(&self, field: &ListField, value: Value) -> ListResult<Value> {
        let wants_translation = (field.translate && value.is_string())
            || (field.translate_null && value.is_null());
        if !wants_translation {
            return Ok(value);
        }

        let translator = self.translator()?;
        let prefix = field.translation_prefix.as_deref().unwrap_or("");
        let raw = value.as_str().unwrap_or("");
        let key = format!("{prefix}{raw}");

        Ok(Value::String(
            translator.translate(&key, field.translation_domain.as_deref()),
        ))
    }

    fn translator(&self) -> ListResult<&Arc<dyn Translator>> {
        self.translator.as_ref().ok_or(ListError::MissingTranslator)
    }
}
