use super::descriptor::ServerDescriptor;
use crate::error::DescriptorIssue;

/// Validate a `ServerDescriptor` after normalization.
///
/// Returns an error if a logical name maps to no domains.
///
/// Logs a warning, without failing, for entries that can never match or
/// produce odd paths:
/// - an environment entry with a blank `name`
/// - a blank logical name
/// - a domain that is empty or contains whitespace
pub fn validate_descriptor(descriptor: &ServerDescriptor) -> Result<(), DescriptorIssue> {
    for (port, spec) in &descriptor.environments {
        if spec.name.trim().is_empty() {
            tracing::warn!(port = %port, "server environment has a blank name");
        }
    }

    for (name, domains) in &descriptor.names {
        if domains.is_empty() {
            return Err(DescriptorIssue::Name {
                name: name.clone(),
                reason: "at least one domain is required".to_string(),
            });
        }
        if name.trim().is_empty() {
            tracing::warn!(domains = ?domains, "server name is blank");
        }
        for domain in domains
            .iter()
            .filter(|domain| domain.is_empty() || domain.chars().any(char::is_whitespace))
        {
            tracing::warn!(name = %name, domain = %domain, "domain can never match a hostname");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::descriptor::{EnvironmentSpec, parse_descriptor};

    fn minimal_descriptor() -> ServerDescriptor {
        ServerDescriptor {
            environments: vec![(
                "80".to_string(),
                EnvironmentSpec {
                    name: "prod".to_string(),
                    debug: None,
                },
            )],
            names: vec![("acme".to_string(), vec!["acme.com".to_string()])],
            fallback: None,
        }
    }

    #[test]
    fn valid_minimal_descriptor() {
        assert!(validate_descriptor(&minimal_descriptor()).is_ok());
    }

    #[test]
    fn empty_descriptor_is_valid() {
        assert!(validate_descriptor(&ServerDescriptor::default()).is_ok());
    }

    #[test]
    fn empty_domain_list_rejected() {
        let mut descriptor = minimal_descriptor();
        descriptor.names[0].1.clear();
        assert!(validate_descriptor(&descriptor).is_err());
    }

    #[test]
    fn blank_names_and_odd_domains_only_warn() {
        let mut descriptor = minimal_descriptor();
        descriptor.environments[0].1.name = "  ".to_string();
        descriptor.names[0].0 = String::new();
        descriptor.names[0].1.push(String::new());
        descriptor.names[0].1.push("legacy host".to_string());
        assert!(validate_descriptor(&descriptor).is_ok());
    }

    #[test]
    fn blank_environment_and_spaced_domain_files_load() {
        let blank_env = parse_descriptor(r#"{"environments":{"80":""},"names":{"acme":"a.com"}}"#)
            .expect("blank environment name loads");
        assert_eq!(blank_env.environments[0].1.name, "");

        let spaced = parse_descriptor(r#"{"names":{"acme":["a.com","legacy host"]}}"#)
            .expect("spaced domain loads");
        assert_eq!(
            spaced.names[0].1,
            vec!["a.com".to_string(), "legacy host".to_string()]
        );
    }
}
