//! Template store
//!
//! Templates live in `<base>/templates/<name>.{yaml,yml,json}`. Only the
//! names under the top-level `Parameters` key are interpreted; the body is
//! submitted exactly as read.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use stacker_fs::constants::TEMPLATE_EXTENSIONS;
use stacker_fs::{DocumentFormat, NormalizedPath, io};

use crate::config::null_as_default;
use crate::{Error, Result};

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub path: NormalizedPath,
    /// File contents, byte for byte.
    pub body: String,
    /// Declared parameter names.
    pub parameters: BTreeSet<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateHeader {
    #[serde(rename = "Parameters", deserialize_with = "null_as_default")]
    parameters: BTreeMap<String, serde_yaml::Value>,
}

impl Template {
    /// Read and parse the template at `path`.
    pub fn load(name: &str, path: &NormalizedPath) -> Result<Self> {
        let invalid = |message: String| Error::InvalidTemplate {
            path: path.to_native(),
            message,
        };

        let body = io::read_verbatim(path).map_err(|e| match e {
            err @ stacker_fs::Error::InvalidUtf8 { .. } => invalid(err.to_string()),
            other => Error::Fs(other),
        })?;
        let format = DocumentFormat::from_path(path)?;
        let header: TemplateHeader = format.parse_or_default(path, &body).map_err(|e| match e {
            stacker_fs::Error::Parse { message, .. } => invalid(message),
            other => Error::Fs(other),
        })?;

        Ok(Self {
            name: name.to_string(),
            path: path.clone(),
            body,
            parameters: header.parameters.into_keys().collect(),
        })
    }

    pub fn declares(&self, parameter: &str) -> bool {
        self.parameters.contains(parameter)
    }
}

/// A source of templates by logical name.
pub trait TemplateSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<Arc<Template>>;
}

/// Memoizing template lookup rooted at a templates directory.
#[derive(Debug)]
pub struct TemplateStore {
    root: NormalizedPath,
    cache: Mutex<HashMap<String, Arc<Template>>>,
}

impl TemplateStore {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// First existing `<root>/<name>.<ext>`, probing extensions in order.
    pub fn locate(&self, name: &str) -> Option<NormalizedPath> {
        TEMPLATE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(&format!("{name}.{ext}")))
            .find(NormalizedPath::is_file)
    }
}

impl TemplateSource for TemplateStore {
    fn fetch(&self, name: &str) -> Result<Arc<Template>> {
        if let Some(template) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            tracing::trace!(template = name, "Template cache hit");
            return Ok(Arc::clone(template));
        }

        let path = self.locate(name).ok_or_else(|| Error::TemplateNotFound {
            name: name.to_string(),
            root: self.root.to_native(),
        })?;
        let template = Arc::new(Template::load(name, &path)?);
        tracing::debug!(
            template = name,
            path = %path,
            parameters = template.parameters.len(),
            "Loaded template"
        );

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            cache.entry(name.to_string()).or_insert(template),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VPC: &str = "AWSTemplateFormatVersion: '2010-09-09'\n\
Parameters:\n  Name:\n    Type: String\n  VpcCIDR:\n    Type: String\n\
Resources:\n  Vpc:\n    Type: AWS::EC2::VPC\n    Properties:\n      CidrBlock: !Ref VpcCIDR\n";

    fn store(files: &[(&str, &str)]) -> (TempDir, TemplateStore) {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp.path().join(name), content).unwrap();
        }
        let store = TemplateStore::new(NormalizedPath::new(temp.path()));
        (temp, store)
    }

    #[test]
    fn body_is_verbatim_and_parameters_extracted() {
        let (_temp, store) = store(&[("VPC.yml", VPC)]);
        let template = store.fetch("VPC").unwrap();
        assert_eq!(template.body, VPC);
        assert_eq!(
            template.parameters.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Name", "VpcCIDR"]
        );
    }

    #[test]
    fn yaml_extension_wins_over_yml_and_json() {
        let (_temp, store) = store(&[
            ("App.yaml", "Parameters:\n  FromYaml: {}\n"),
            ("App.yml", "Parameters:\n  FromYml: {}\n"),
            ("App.json", r#"{"Parameters": {"FromJson": {}}}"#),
        ]);
        assert!(store.fetch("App").unwrap().declares("FromYaml"));
    }

    #[test]
    fn json_templates_are_supported() {
        let (_temp, store) = store(&[("App.json", r#"{"Parameters": {"Env": {"Type": "String"}}}"#)]);
        assert!(store.fetch("App").unwrap().declares("Env"));
    }

    #[test]
    fn template_without_parameters_declares_none() {
        let (_temp, store) = store(&[("Bare.yml", "Resources: {}\n")]);
        assert!(store.fetch("Bare").unwrap().parameters.is_empty());
    }

    #[test]
    fn fetch_is_memoized() {
        let (temp, store) = store(&[("VPC.yml", VPC)]);
        let first = store.fetch("VPC").unwrap();
        fs::remove_file(temp.path().join("VPC.yml")).unwrap();
        let second = store.fetch("VPC").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_template_is_reported() {
        let (_temp, store) = store(&[]);
        let err = store.fetch("Nope").unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { name, .. } if name == "Nope"));
    }

    #[test]
    fn malformed_template_is_invalid() {
        let (_temp, store) = store(&[("Bad.yml", "Parameters: [unclosed\n")]);
        let err = store.fetch("Bad").unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn non_mapping_parameters_is_invalid() {
        let (_temp, store) = store(&[("Bad.yml", "Parameters: just-a-string\n")]);
        assert!(matches!(store.fetch("Bad").unwrap_err(), Error::InvalidTemplate { .. }));
    }
}
