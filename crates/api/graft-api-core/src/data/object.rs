use serde::{Deserialize, Serialize};

use crate::fields::{FieldPath, References, Visit};
use crate::ids::AssetId;

/// Free-form serialized object: user data assets and custom components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericObject {
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Reference(Option<AssetId>),
    List(Vec<FieldValue>),
    Struct(Vec<Field>),
}

impl GenericObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

impl References for GenericObject {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        // Values can nest lists in structs in lists; walk with a stack.
        let mut stack: Vec<(FieldPath, &mut FieldValue)> = self
            .fields
            .iter_mut()
            .rev()
            .map(|f| (at.field(&f.name), &mut f.value))
            .collect();
        while let Some((path, value)) = stack.pop() {
            match value {
                FieldValue::Reference(slot) => visit(&path, slot, None),
                FieldValue::List(items) => {
                    for (i, item) in items.iter_mut().enumerate().rev() {
                        stack.push((path.index(i), item));
                    }
                }
                FieldValue::Struct(fields) => {
                    for f in fields.iter_mut().rev() {
                        stack.push((path.field(&f.name), &mut f.value));
                    }
                }
                FieldValue::Bool(_) | FieldValue::Int(_) | FieldValue::Float(_) | FieldValue::Text(_) => {}
            }
        }
    }
}
