use serde::{Deserialize, Serialize};

/// A validation rule attached to a form-designer field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub required: Option<bool>,
}

/// A field of a form-designer layout. Containers (rows, tabs, cards) carry `children`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormField {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub input: bool,
    #[serde(default)]
    pub rules: Option<Vec<FieldRule>>,
    #[serde(default)]
    pub children: Option<Vec<FormField>>,
}

/// A column of the task table derived from a process form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormColumn {
    pub label: String,
    pub field: String,
    pub required: bool,
}

/// Collects the input fields of a form layout, descending into containers in order.
pub fn form_columns(fields: &[FormField]) -> Vec<FormColumn> {
    let mut columns = Vec::new();
    collect_columns(fields, &mut columns);
    columns
}

fn collect_columns(fields: &[FormField], columns: &mut Vec<FormColumn>) {
    for element in fields {
        if element.input {
            columns.push(FormColumn {
                label: element.label.clone().unwrap_or_default(),
                field: element.field.clone().unwrap_or_default(),
                required: element
                    .rules
                    .as_ref()
                    .and_then(|rules| rules.first())
                    .and_then(|rule| rule.required)
                    .unwrap_or(false),
            });
        } else if let Some(children) = &element.children {
            collect_columns(children, columns);
        }
    }
}
