//! FMF test case importer
//!
//! Converts the loosely typed data of an FMF node into a `TestCaseRecord`.
//! Every field defaults independently: strings become `""`, lists `[]` and
//! mappings `{}`. Scalars of the wrong type are stringified rather than rejected.

use super::fmf::FmfNode;
use crate::models::testcase::{OneOrMany, Relationship, Step, TestCaseRecord, TestSuite};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::warn;

impl TestCaseRecord {
    /// Build a record out of an FMF node
    pub fn from_fmf_node(node: &FmfNode) -> Self {
        Self::from_fmf_data(&node.name, &node.data)
    }

    /// Build a record out of a node name and its (already inherited) data
    pub fn from_fmf_data(name: &str, data: &Mapping) -> Self {
        let get = |keys: &[&str]| keys.iter().find_map(|k| data.get(*k));

        TestCaseRecord {
            name: name.to_string(),
            summary: get(&["summary"]).map(scalar_string).unwrap_or_default(),
            description: get(&["description"]).map(scalar_string).unwrap_or_default(),
            tags: get(&["tags", "tag"])
                .map(string_list)
                .unwrap_or_default()
                .into_iter()
                .collect(),

            authors: get(&["authors", "author"]).map(string_list).unwrap_or_default(),
            approvals: get(&["approvals"]).map(string_list).unwrap_or_default(),

            test_type: get(&["type"]).map(scalar_string).unwrap_or_default(),
            level: get(&["level"]).map(scalar_string).unwrap_or_default(),
            subtypes: get(&["subtypes", "subtype"]).map(string_list).unwrap_or_default(),
            importance: get(&["importance"]).map(scalar_string).unwrap_or_default(),
            estimate: get(&["estimate"]).map(scalar_string).unwrap_or_default(),

            components: get(&["components", "component"])
                .map(one_or_many)
                .unwrap_or_default(),
            sub_components: get(&["sub-components", "subcomponents", "sub_components"])
                .map(one_or_many)
                .unwrap_or_default(),

            defects: get(&["defects"]).map(relationships).unwrap_or_default(),
            requirements: get(&["requirements"]).map(relationships).unwrap_or_default(),

            test_setup: get(&["test-setup", "test_setup"]).map(steps).unwrap_or_default(),
            test_teardown: get(&["test-teardown", "test_teardown"])
                .map(steps)
                .unwrap_or_default(),
            test_steps: get(&["test-steps", "test_steps"]).map(steps).unwrap_or_default(),

            parameters: get(&["parameters"]).map(string_list).unwrap_or_default(),
            testsuite: get(&["testsuite"]).map(testsuite).unwrap_or_default(),
            adapter: get(&["adapter"]).map(adapter_settings).unwrap_or_default(),
        }
    }
}

/// Stringify a scalar, `""` for null and for collections
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

/// A list of scalars, accepting a lone scalar as a one element list
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(scalar_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::Null | Value::Mapping(_) => Vec::new(),
        scalar => {
            let s = scalar_string(scalar);
            if s.is_empty() { Vec::new() } else { vec![s] }
        }
    }
}

fn one_or_many(value: &Value) -> OneOrMany {
    match value {
        Value::Sequence(_) => OneOrMany::Many(string_list(value)),
        Value::Null | Value::Mapping(_) => OneOrMany::default(),
        scalar => OneOrMany::One(scalar_string(scalar)),
    }
}

/// Truthiness of a YAML value, used for flags such as `customer-case`
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "on"),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
        Value::Null => false,
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(mapping) => !mapping.is_empty(),
    }
}

/// Relationship list. A plain string entry is taken as a JIRA reference.
fn relationships(value: &Value) -> Vec<Relationship> {
    let Value::Sequence(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Mapping(mapping) => Some(relationship(mapping)),
            Value::Null => None,
            scalar => {
                let reference = scalar_string(scalar);
                (!reference.is_empty()).then(|| Relationship::jira(reference))
            }
        })
        .collect()
}

fn relationship(mapping: &Mapping) -> Relationship {
    let mut rel = Relationship::default();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        match key {
            "jira" => rel.jira = Some(scalar_string(value)),
            "polarion" => rel.polarion = Some(scalar_string(value)),
            "bugzilla" => rel.bugzilla = Some(scalar_string(value)),
            "customer-case" => rel.customer_case = is_truthy(value),
            other => {
                rel.extra.insert(other.to_string(), scalar_string(value));
            }
        }
    }
    rel
}

fn steps(value: &Value) -> Vec<Step> {
    let Value::Sequence(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Mapping(mapping) => Some(Step {
                step: mapping.get("step").map(scalar_string).unwrap_or_default(),
                expected: mapping.get("expected").map(scalar_string).unwrap_or_default(),
            }),
            Value::Null => None,
            scalar => Some(Step::new(scalar_string(scalar), "")),
        })
        .collect()
}

fn string_map(value: &Value) -> BTreeMap<String, String> {
    let Value::Mapping(mapping) = value else {
        return BTreeMap::new();
    };
    mapping
        .iter()
        .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), scalar_string(v))))
        .collect()
}

fn testsuite(value: &Value) -> TestSuite {
    let Value::Mapping(mapping) = value else {
        warn!("Ignoring testsuite metadata that is not a mapping");
        return TestSuite::default();
    };

    TestSuite {
        parameters: mapping.get("parameters").map(string_list).unwrap_or_default(),
        properties: mapping.get("properties").map(string_map).unwrap_or_default(),
        compatible_topologies: mapping
            .get("compatible_topologies")
            .or_else(|| mapping.get("compatible-topologies"))
            .map(string_list)
            .unwrap_or_default(),
    }
}

fn adapter_settings(value: &Value) -> BTreeMap<String, BTreeMap<String, String>> {
    let Value::Mapping(mapping) = value else {
        return BTreeMap::new();
    };
    mapping
        .iter()
        .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), string_map(v))))
        .collect()
}
