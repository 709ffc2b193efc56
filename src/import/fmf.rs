//! FMF tree loader
//!
//! Grows an in-memory tree out of a directory holding FMF metadata.
//!
//! Tree layout:
//! - Root directory, marked by `.fmf/version`
//!   - `main.fmf` - data for the directory node itself
//!   - `{name}.fmf` - a child node named after the file
//!   - `{dir}/` - a child node named after the directory
//!   - keys starting with `/` inside any file - inline child nodes
//!
//! Children inherit the data of their parent. A key suffixed with `+` extends the
//! inherited value (lists are concatenated, strings appended, mappings merged)
//! instead of replacing it. Only leaf nodes describe test cases.

use super::TreeLoadError;
use crate::models::TestCaseRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the file holding the data of a directory node
pub const MAIN_FILE: &str = "main.fmf";

/// Extension of FMF metadata files
pub const FMF_EXTENSION: &str = ".fmf";

static RE_TEST_PARAMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*").expect("Invalid regex"));

/// A node of the FMF tree
#[derive(Debug, Clone, PartialEq)]
pub struct FmfNode {
    /// `/`-delimited path of the node inside the tree
    pub name: String,
    /// Node data, already merged with everything inherited from ancestors
    pub data: Mapping,
    /// Files that contributed data to this node
    pub sources: Vec<PathBuf>,
    pub children: Vec<FmfNode>,
}

impl FmfNode {
    fn new(name: String, data: Mapping, sources: Vec<PathBuf>) -> Self {
        Self {
            name,
            data,
            sources,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Leaf nodes below (and including) this node, in tree order
    pub fn climb(&self) -> Vec<&FmfNode> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a FmfNode>) {
        if self.is_leaf() {
            leaves.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(leaves);
        }
    }

    /// Find a node by its full name
    pub fn find(&self, name: &str) -> Option<&FmfNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// FMF tree rooted at the directory holding `.fmf/version`
#[derive(Debug, Clone)]
pub struct FmfTree {
    root_path: PathBuf,
    root: FmfNode,
}

impl FmfTree {
    /// Load the tree that contains `path`
    ///
    /// The root is looked up from `path` upwards. Fails when `path` is not a
    /// directory, when no root marker exists, or when a metadata file cannot be
    /// read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeLoadError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(TreeLoadError::InvalidPath(path.to_path_buf()));
        }

        let absolute = path
            .canonicalize()
            .map_err(|e| TreeLoadError::IoError(path.to_path_buf(), e.to_string()))?;
        let root_path = find_root(&absolute)?;

        let root = grow_directory(&root_path, "/".to_string(), &Mapping::new(), true)?
            .unwrap_or_else(|| FmfNode::new("/".to_string(), Mapping::new(), Vec::new()));

        let tree = Self { root_path, root };
        info!(
            "Loaded FMF tree {} ({} leaf nodes)",
            tree.root_path.display(),
            tree.root.climb().len()
        );
        Ok(tree)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn root(&self) -> &FmfNode {
        &self.root
    }

    /// Leaf nodes of the whole tree
    pub fn climb(&self) -> Vec<&FmfNode> {
        self.root.climb()
    }

    pub fn find(&self, name: &str) -> Option<&FmfNode> {
        self.root.find(name)
    }

    /// Test cases whose name contains any of the given filters (case-insensitive)
    ///
    /// An empty filter list matches every leaf. Records are materialized lazily
    /// as the iterator is consumed.
    pub fn testcases_matching(&self, filters: &[String]) -> impl Iterator<Item = TestCaseRecord> {
        let filters: Vec<String> = filters
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.to_lowercase())
            .collect();

        self.climb()
            .into_iter()
            .filter(move |node| {
                let name = node.name.to_lowercase();
                filters.is_empty() || filters.iter().any(|f| name.contains(f.as_str()))
            })
            .map(TestCaseRecord::from_fmf_node)
    }

    /// Test case identified by a `classname` and `testname` pair
    ///
    /// `pkg.module.Class` + `test_name[param-1]` resolves to `/pkg/module/Class/test_name`.
    pub fn get_testcase(&self, classname: &str, testname: &str) -> Option<TestCaseRecord> {
        let name = Self::name_in_tree(classname, testname);
        self.find(&name).map(TestCaseRecord::from_fmf_node)
    }

    /// Tree name for a `classname` and `testname` pair, dropping test parameters
    pub fn name_in_tree(classname: &str, testname: &str) -> String {
        format!(
            "/{}/{}",
            classname.replace('.', "/"),
            RE_TEST_PARAMS.replace(testname, "")
        )
    }
}

fn find_root(path: &Path) -> Result<PathBuf, TreeLoadError> {
    path.ancestors()
        .find(|dir| dir.join(".fmf").join("version").is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| TreeLoadError::RootNotFound(path.to_path_buf()))
}

fn child_name(parent: &str, child: &str) -> String {
    let child = child.trim_start_matches('/');
    if parent == "/" {
        format!("/{}", child)
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Grow a directory node. Directories without metadata and without children are pruned.
fn grow_directory(
    dir: &Path,
    name: String,
    inherited: &Mapping,
    is_root: bool,
) -> Result<Option<FmfNode>, TreeLoadError> {
    let mut data = inherited.clone();
    let mut sources = Vec::new();
    let mut inline_children = Vec::new();

    let main_file = dir.join(MAIN_FILE);
    if main_file.is_file() {
        let (attributes, children) = split_children(read_mapping(&main_file)?, &main_file)?;
        merge_data(&mut data, attributes)?;
        inline_children = children;
        sources.push(main_file);
    }

    let mut node = FmfNode::new(name, data, sources);

    for (key, mapping) in inline_children {
        let child = grow_mapping(
            child_name(&node.name, &key),
            &node.data,
            mapping,
            node.sources.clone(),
        )?;
        node.children.push(child);
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| TreeLoadError::IoError(dir.to_path_buf(), e.to_string()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'))
        })
        .collect();
    entries.sort();

    let (directories, files): (Vec<PathBuf>, Vec<PathBuf>) =
        entries.into_iter().partition(|path| path.is_dir());

    for file in files {
        let Some(file_name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name == MAIN_FILE {
            continue;
        }
        let Some(stem) = file_name.strip_suffix(FMF_EXTENSION) else {
            continue;
        };
        let mapping = read_mapping(&file)?;
        let child = grow_mapping(
            child_name(&node.name, stem),
            &node.data,
            mapping,
            vec![file.clone()],
        )?;
        node.children.push(child);
    }

    for directory in directories {
        let Some(dir_name) = directory.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let child_node_name = child_name(&node.name, dir_name);
        if let Some(child) = grow_directory(&directory, child_node_name, &node.data, false)? {
            node.children.push(child);
        }
    }

    if !is_root && node.sources.is_empty() && node.children.is_empty() {
        debug!("Skipping directory without metadata: {}", dir.display());
        return Ok(None);
    }

    Ok(Some(node))
}

/// Grow a node (and its inline children) out of a YAML mapping
fn grow_mapping(
    name: String,
    inherited: &Mapping,
    own: Mapping,
    sources: Vec<PathBuf>,
) -> Result<FmfNode, TreeLoadError> {
    let source = sources.first().cloned().unwrap_or_default();
    let (attributes, children) = split_children(own, &source)?;

    let mut data = inherited.clone();
    merge_data(&mut data, attributes)?;

    let mut node = FmfNode::new(name, data, sources);
    for (key, mapping) in children {
        let child = grow_mapping(
            child_name(&node.name, &key),
            &node.data,
            mapping,
            node.sources.clone(),
        )?;
        node.children.push(child);
    }
    Ok(node)
}

fn read_mapping(path: &Path) -> Result<Mapping, TreeLoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TreeLoadError::IoError(path.to_path_buf(), e.to_string()))?;
    let value: Value = serde_yaml::from_str(&content)
        .map_err(|e| TreeLoadError::ParseError(path.to_path_buf(), e.to_string()))?;
    into_mapping(value, path)
}

fn into_mapping(value: Value, path: &Path) -> Result<Mapping, TreeLoadError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(TreeLoadError::ParseError(
            path.to_path_buf(),
            format!("expected a mapping, found {:?}", other),
        )),
    }
}

/// Separate plain attributes from `/child` keys
fn split_children(
    mapping: Mapping,
    path: &Path,
) -> Result<(Mapping, Vec<(String, Mapping)>), TreeLoadError> {
    let mut attributes = Mapping::new();
    let mut children = Vec::new();

    for (key, value) in mapping {
        match key.as_str() {
            Some(child) if child.starts_with('/') => {
                children.push((child.to_string(), into_mapping(value, path)?));
            }
            _ => {
                attributes.insert(key, value);
            }
        }
    }
    Ok((attributes, children))
}

/// Merge attributes into inherited data, honoring the `key+` extension syntax
fn merge_data(data: &mut Mapping, attributes: Mapping) -> Result<(), TreeLoadError> {
    for (key, value) in attributes {
        let Some(base) = key.as_str().and_then(|k| k.strip_suffix('+')) else {
            data.insert(key, value);
            continue;
        };
        let base = base.to_string();
        match data.get_mut(base.as_str()) {
            Some(existing) => extend_value(existing, value, &base)?,
            None => {
                data.insert(Value::String(base), value);
            }
        }
    }
    Ok(())
}

fn extend_value(existing: &mut Value, value: Value, key: &str) -> Result<(), TreeLoadError> {
    match (existing, value) {
        (Value::Sequence(current), Value::Sequence(extra)) => current.extend(extra),
        (Value::String(current), Value::String(extra)) => current.push_str(&extra),
        (Value::Mapping(current), Value::Mapping(extra)) => {
            for (k, v) in extra {
                current.insert(k, v);
            }
        }
        (current, extra) => {
            return Err(TreeLoadError::MergeError(
                key.to_string(),
                format!("cannot extend {:?} with {:?}", current, extra),
            ));
        }
    }
    Ok(())
}
