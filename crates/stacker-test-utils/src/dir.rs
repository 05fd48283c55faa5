//! [`TestStackerDir`] builder for stacker test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Parameters `Name` and `VpcCIDR` over a single VPC resource.
pub const VPC_TEMPLATE: &str = "AWSTemplateFormatVersion: '2010-09-09'
Parameters:
  Name:
    Type: String
  VpcCIDR:
    Type: String
Resources:
  Vpc:
    Type: AWS::EC2::VPC
    Properties:
      CidrBlock: !Ref VpcCIDR
      Tags:
        - Key: Name
          Value: !Ref Name
Outputs:
  VpcId:
    Value: !Ref Vpc
";

/// A temporary stacker base directory.
///
/// # Example
///
/// ```rust,no_run
/// use stacker_test_utils::TestStackerDir;
///
/// let dir = TestStackerDir::new()
///     .config("production.yml", "defaults:\n  region: us-west-2\n")
///     .template("VPC.yml", stacker_test_utils::dir::VPC_TEMPLATE);
/// assert!(dir.root().join("environments/production.yml").exists());
/// ```
pub struct TestStackerDir {
    temp_dir: TempDir,
    config_dir: String,
}

impl Default for TestStackerDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStackerDir {
    /// An empty base directory; configs go under `environments/`.
    pub fn new() -> Self {
        Self::with_config_dir("environments")
    }

    /// An empty base directory with configs under `dir` (`regions`, `stacks`).
    pub fn with_config_dir(dir: &str) -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            config_dir: dir.to_string(),
        }
    }

    /// The base directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The configuration root.
    pub fn config_root(&self) -> PathBuf {
        self.root().join(&self.config_dir)
    }

    /// Write a configuration document at `relative` under the config root.
    pub fn config(self, relative: &str, content: &str) -> Self {
        let path = self.config_root().join(relative);
        write(&path, content);
        self
    }

    /// Write a template file (name including extension).
    pub fn template(self, file_name: &str, content: &str) -> Self {
        let path = self.root().join("templates").join(file_name);
        write(&path, content);
        self
    }

    /// Write an arbitrary file relative to the base directory.
    pub fn file(self, relative: &str, content: &str) -> Self {
        write(&self.root().join(relative), content);
        self
    }

    /// Create the config root even if no document is written.
    pub fn empty_config_root(self) -> Self {
        fs::create_dir_all(self.config_root()).unwrap();
        self
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
