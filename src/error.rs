use std::path::PathBuf;

/// Structural problems found while normalizing a server descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorIssue {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("top-level value must be an object")]
    NotAnObject,

    #[error("environments.{port}: {reason}")]
    Environment { port: String, reason: String },

    #[error("names.{name}: {reason}")]
    Name { name: String, reason: String },
}

/// Errors that abort identity resolution.
///
/// Both variants mean a descriptor exists but cannot be trusted. Callers are
/// expected to stop startup; a missing descriptor or a match miss is never an
/// error.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("your {} is malformed, please fix or remove it", .path.display())]
    MalformedDescriptor {
        path: PathBuf,
        #[source]
        issue: DescriptorIssue,
    },

    #[error("failed to read {}", .path.display())]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Path of the descriptor that caused the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::MalformedDescriptor { path, .. } | Self::ReadDescriptor { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn malformed_message_leaves_issue_to_source_chain() {
        let err = ResolveError::MalformedDescriptor {
            path: PathBuf::from("/srv/app/config/server.json"),
            issue: DescriptorIssue::NotAnObject,
        };
        let message = err.to_string();
        assert!(message.contains("/srv/app/config/server.json"));
        assert!(!message.contains("top-level value must be an object"));

        let source = err.source().expect("issue is the error source");
        assert_eq!(source.to_string(), "top-level value must be an object");

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("top-level value must be an object").count(), 1);
    }
}
